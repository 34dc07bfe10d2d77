use thiserror::Error;

use crate::types::direction::CallDirection;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Every car scored zero for this call.
    #[error("no suitable car found to handle {direction} request from floor {floor}")]
    NoSuitableCar { floor: u32, direction: CallDirection },

    #[error("car {0} does not exist")]
    InvalidCarId(usize),

    /// A queue's nearest element was read without checking it first.
    #[error("request queue is empty")]
    EmptyQueue,

    #[error("floor {floor} is above the top floor {top}")]
    FloorOutOfRange { floor: u32, top: u32 },

    #[error("there is no {direction} call button on floor {floor}")]
    UnavailableCall { floor: u32, direction: CallDirection },
}
