use crate::car::Car;
use crate::error::{Error, Result};
use crate::strategy::Strategy;
use crate::types::direction::{CallDirection, Direction};

/// How many requests the whole fleet is carrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetLoad {
    total: usize,
    cars: usize,
}

impl FleetLoad {
    pub fn new(total: usize, cars: usize) -> Self {
        Self { total, cars }
    }

    pub fn of(cars: &[Car]) -> Self {
        Self::new(cars.iter().map(Car::pending_requests).sum(), cars.len())
    }

    /// A car is busy when it carries more requests than the fleet average.
    pub fn is_busy(&self, pending: usize) -> bool {
        pending > 0 && pending * self.cars > self.total
    }
}

/// Scores every car for a hall call and picks the highest.
///
/// Idle cars and cars already heading the caller's way score
/// `floor_count + 1 - distance`, cars that must turn around after the pickup
/// score one less, cars moving away score 1 and busy cars score 0. A car is
/// only chosen with a score above zero.
#[derive(Debug, Clone, Copy)]
pub struct FitnessStrategy {
    floor_count: u32,
}

impl FitnessStrategy {
    pub fn new(floor_count: u32) -> Self {
        Self { floor_count }
    }

    pub fn fitness(
        &self,
        car: &Car,
        floor: u32,
        direction: CallDirection,
        load: &FleetLoad,
    ) -> i64 {
        if load.is_busy(car.pending_requests()) {
            return 0;
        }
        let distance = i64::from(car.current_floor().abs_diff(floor));
        let near = i64::from(self.floor_count) + 1 - distance;
        if car.is_idle() {
            near
        } else if Self::is_towards_call(car, floor) {
            if car.direction().matches(direction) {
                near
            } else {
                near - 1
            }
        } else {
            1
        }
    }

    // A car standing on the call floor counts as heading towards it.
    fn is_towards_call(car: &Car, floor: u32) -> bool {
        match car.direction() {
            Direction::MovingDown => car.current_floor() >= floor,
            Direction::MovingUp => car.current_floor() <= floor,
            Direction::Idle => false,
        }
    }
}

impl Strategy for FitnessStrategy {
    fn select(&self, floor: u32, direction: CallDirection, cars: &[Car]) -> Result<usize> {
        let load = FleetLoad::of(cars);
        let mut best = 0;
        let mut chosen = None;
        for (index, car) in cars.iter().enumerate() {
            let fitness = self.fitness(car, floor, direction, &load);
            if fitness > best {
                best = fitness;
                chosen = Some(index);
            }
        }
        chosen.ok_or(Error::NoSuitableCar { floor, direction })
    }
}
