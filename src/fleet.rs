use std::fmt;
use std::fmt::Display;

use crate::car::{Car, CarSnapshot};
use crate::error::{Error, Result};
use crate::strategies::fitness::FitnessStrategy;
use crate::strategy::Strategy;
use crate::types::direction::CallDirection;

/// The bank of cars serving one building, floors `0..=floor_count`.
#[derive(Debug, Clone)]
pub struct Fleet<ST = FitnessStrategy> {
    cars: Vec<Car>,
    floor_count: u32,
    strategy: ST,
}

impl Fleet<FitnessStrategy> {
    pub fn new(car_count: usize, floor_count: u32) -> Self {
        Self::with_strategy(car_count, floor_count, FitnessStrategy::new(floor_count))
    }
}

impl<ST: Strategy> Fleet<ST> {
    pub fn with_strategy(car_count: usize, floor_count: u32, strategy: ST) -> Self {
        Fleet {
            cars: (0..car_count).map(|id| Car::new(id, floor_count)).collect(),
            floor_count,
            strategy,
        }
    }

    pub fn floor_count(&self) -> u32 {
        self.floor_count
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn snapshots(&self) -> Vec<CarSnapshot> {
        self.cars.iter().map(CarSnapshot::from).collect()
    }

    pub fn is_idle(&self) -> bool {
        self.cars.iter().all(Car::is_idle)
    }

    /// Hall call. Returns the id of the car that will come.
    pub fn request_pickup(&mut self, floor: u32, direction: CallDirection) -> Result<usize> {
        self.check_floor(floor)?;
        let id = self.strategy.assign(floor, direction, &mut self.cars)?;
        tracing::debug!(floor, %direction, car = id, "pickup assigned");
        Ok(id)
    }

    /// Panel button pressed inside car `car`.
    pub fn request_destination(&mut self, car: usize, floor: u32) -> Result<()> {
        if car >= self.cars.len() {
            return Err(Error::InvalidCarId(car));
        }
        self.check_floor(floor)?;
        self.cars[car].add_request(floor);
        Ok(())
    }

    /// Moves every car by one tick.
    pub fn step(&mut self) {
        for car in &mut self.cars {
            if let Some(floor) = car.tick() {
                tracing::debug!(car = car.id(), floor, "served");
            }
        }
    }

    fn check_floor(&self, floor: u32) -> Result<()> {
        if floor > self.floor_count {
            return Err(Error::FloorOutOfRange {
                floor,
                top: self.floor_count,
            });
        }
        Ok(())
    }
}

impl<ST> Display for Fleet<ST> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Elevator shaft has {} carts, and handles {} floors. Carts are:",
            self.cars.len(),
            self.floor_count
        )?;
        for car in &self.cars {
            writeln!(f, "{car}")?;
        }
        Ok(())
    }
}
