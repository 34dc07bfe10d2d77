use std::future::{Ready, ready};
use std::task::{Context, Poll};

use tower::Service;

use crate::error::Error;
use crate::fleet::Fleet;
use crate::strategy::Strategy;
use crate::types::request::{Reply, Request};

/// Innermost service: applies requests to the fleet it owns.
///
/// The fleet is synchronous, so every call is answered before `call`
/// returns and the future is already resolved.
pub struct FleetService<ST> {
    fleet: Fleet<ST>,
}

impl<ST> FleetService<ST> {
    pub fn new(fleet: Fleet<ST>) -> Self {
        FleetService { fleet }
    }

    pub fn fleet(&self) -> &Fleet<ST> {
        &self.fleet
    }
}

impl<ST: Strategy> Service<Request> for FleetService<ST> {
    type Response = Reply;
    type Error = Error;
    type Future = Ready<Result<Reply, Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let reply = match request {
            Request::Pickup { floor, direction } => {
                self.fleet.request_pickup(floor, direction).map(Reply::Assigned)
            }
            Request::Destination { car, floor } => self
                .fleet
                .request_destination(car, floor)
                .map(|()| Reply::Queued),
            Request::Step => {
                self.fleet.step();
                Ok(Reply::Cars(self.fleet.snapshots()))
            }
            Request::Snapshot => Ok(Reply::Cars(self.fleet.snapshots())),
        };
        ready(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::direction::CallDirection;
    use tower::ServiceExt;

    #[tokio::test]
    async fn requests_reach_the_fleet() {
        let mut svc = FleetService::new(Fleet::new(2, 10));

        let reply = svc
            .ready()
            .await
            .unwrap()
            .call(Request::Pickup {
                floor: 3,
                direction: CallDirection::Up,
            })
            .await;
        assert_eq!(reply, Ok(Reply::Assigned(0)));
        assert_eq!(svc.fleet().cars()[0].next_above_request(), Ok(3));

        let reply = svc
            .ready()
            .await
            .unwrap()
            .call(Request::Destination { car: 1, floor: 8 })
            .await;
        assert_eq!(reply, Ok(Reply::Queued));

        let cars = svc.oneshot(Request::Step).await.unwrap().into_cars().unwrap();
        assert_eq!(cars.len(), 2);
        assert!(cars.iter().all(|c| c.current_floor == 0));
    }

    #[tokio::test]
    async fn fleet_errors_pass_through() {
        let svc = FleetService::new(Fleet::new(1, 10));
        let err = svc
            .oneshot(Request::Destination { car: 4, floor: 1 })
            .await
            .unwrap_err();
        assert_eq!(err, Error::InvalidCarId(4));
    }
}
