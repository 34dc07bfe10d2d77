use std::fmt;
use std::fmt::Display;

use rand::Rng;

use crate::types::direction::CallDirection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passenger {
    pub name: String,
    pub starting_floor: u32,
    pub destination_floor: u32,
    pub direction: CallDirection,
    pub assigned_car: Option<usize>,
}

impl Passenger {
    pub fn new(name: impl Into<String>, starting_floor: u32, destination_floor: u32) -> Self {
        Passenger {
            name: name.into(),
            starting_floor,
            destination_floor,
            direction: CallDirection::between(starting_floor, destination_floor),
            assigned_car: None,
        }
    }
}

impl Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}({} => {})[",
            self.name, self.starting_floor, self.destination_floor
        )?;
        match self.assigned_car {
            Some(car) => write!(f, "{car}]}}"),
            None => write!(f, "-]}}"),
        }
    }
}

/// Produces passengers named `P0`, `P1`, ... travelling between floors
/// `1..=max_floor`.
pub struct PassengerFactory<R> {
    max_floor: u32,
    rng: R,
    next_id: usize,
}

impl<R: Rng> PassengerFactory<R> {
    pub fn new(max_floor: u32, rng: R) -> Self {
        Self {
            max_floor,
            rng,
            next_id: 0,
        }
    }

    pub fn passenger(&mut self, starting_floor: u32, destination_floor: u32) -> Passenger {
        let name = format!("P{}", self.next_id);
        self.next_id += 1;
        Passenger::new(name, starting_floor, destination_floor)
    }

    /// A passenger with random, distinct start and destination floors.
    ///
    /// With a single floor to pick from both ends coincide.
    pub fn random_passenger(&mut self) -> Passenger {
        let starting_floor = self.rng.random_range(1..=self.max_floor);
        let mut destination_floor = starting_floor;
        if self.max_floor > 1 {
            while destination_floor == starting_floor {
                destination_floor = self.rng.random_range(1..=self.max_floor);
            }
        }
        self.passenger(starting_floor, destination_floor)
    }
}
