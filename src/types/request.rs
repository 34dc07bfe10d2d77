use crate::car::CarSnapshot;
use crate::types::direction::CallDirection;

/// Everything a driver can ask of the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Pickup { floor: u32, direction: CallDirection },
    Destination { car: usize, floor: u32 },
    Step,
    Snapshot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Assigned(usize),
    Queued,
    Cars(Vec<CarSnapshot>),
}

impl Reply {
    pub fn into_cars(self) -> Option<Vec<CarSnapshot>> {
        match self {
            Reply::Cars(cars) => Some(cars),
            _ => None,
        }
    }
}
