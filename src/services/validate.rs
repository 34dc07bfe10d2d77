use tower::BoxError;
use tower::filter::Predicate;

use crate::error::Error;
use crate::types::direction::CallDirection;
use crate::types::request::Request;

/// Rejects hall calls no real call panel can make: up from the top floor,
/// down from the ground floor.
#[derive(Debug, Clone, Copy)]
pub struct CallPanel {
    top_floor: u32,
}

impl CallPanel {
    pub fn new(top_floor: u32) -> Self {
        Self { top_floor }
    }
}

impl Predicate<Request> for CallPanel {
    type Request = Request;

    fn check(&mut self, request: Request) -> Result<Self::Request, BoxError> {
        if let Request::Pickup { floor, direction } = request {
            let missing = match direction {
                CallDirection::Up => floor == self.top_floor,
                CallDirection::Down => floor == 0,
            };
            if missing {
                return Err(Error::UnavailableCall { floor, direction }.into());
            }
        }
        Ok(request)
    }
}
