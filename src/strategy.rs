use crate::car::Car;
use crate::error::{Error, Result};
use crate::types::direction::CallDirection;

/// Picks the car that answers a hall call.
pub trait Strategy {
    /// Index of the car that should serve `floor`. Must not mutate anything.
    fn select(&self, floor: u32, direction: CallDirection, cars: &[Car]) -> Result<usize>;

    /// Selects a car and queues the call on it. Nothing is queued on failure.
    fn assign(&self, floor: u32, direction: CallDirection, cars: &mut [Car]) -> Result<usize> {
        let index = self.select(floor, direction, cars)?;
        let car = cars.get_mut(index).ok_or(Error::InvalidCarId(index))?;
        car.add_request(floor);
        Ok(car.id())
    }
}
