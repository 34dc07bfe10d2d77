pub mod car;
pub mod config;
pub mod error;
pub mod fleet;
pub mod passenger;
pub mod simulation;
pub mod strategy;

pub mod strategies {
    pub mod fitness;
}

pub mod services {
    pub mod fleet;
    pub mod trace;
    pub mod validate;
}

pub mod types {
    pub mod direction;
    pub mod request;
}

pub use car::{Car, CarSnapshot};
pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use fleet::Fleet;
pub use simulation::{Simulation, SimulationSummary, fleet_stack};
pub use strategies::fitness::FitnessStrategy;
pub use strategy::Strategy;
pub use types::direction::{CallDirection, Direction};
pub use types::request::{Reply, Request};
