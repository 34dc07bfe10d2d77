use std::collections::VecDeque;

use tower::filter::Filter;
use tower::{BoxError, Service, ServiceBuilder, ServiceExt};

use crate::car::CarSnapshot;
use crate::config::SimulationConfig;
use crate::error::Error;
use crate::fleet::Fleet;
use crate::passenger::Passenger;
use crate::services::fleet::FleetService;
use crate::services::trace::{TraceLayer, TraceService};
use crate::services::validate::CallPanel;
use crate::strategy::Strategy;
use crate::types::direction::Direction;
use crate::types::request::{Reply, Request};

pub type FleetStack<ST> = TraceService<Filter<FleetService<ST>, CallPanel>>;

/// Wraps a fleet in the request pipeline the simulation talks to.
pub fn fleet_stack<ST: Strategy>(fleet: Fleet<ST>) -> FleetStack<ST> {
    ServiceBuilder::new()
        .layer(TraceLayer)
        .filter(CallPanel::new(fleet.floor_count()))
        .service(FleetService::new(fleet))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationSummary {
    pub steps: usize,
    /// Passengers that reached their car and chose a destination.
    pub boarded: usize,
    /// Pickups that found no car and were retried later.
    pub deferred: usize,
    /// Passengers dropped because their call could not be made.
    pub rejected: usize,
}

/// State of one simulation run, owned by whoever drives it.
pub struct Simulation<Svc> {
    service: Svc,
    config: SimulationConfig,
    to_call: VecDeque<Passenger>,
    waiting: Vec<Passenger>,
    cars: Vec<CarSnapshot>,
    summary: SimulationSummary,
}

impl<Svc> Simulation<Svc>
where
    Svc: Service<Request, Response = Reply, Error = BoxError>,
{
    pub async fn new(
        mut service: Svc,
        config: SimulationConfig,
        passengers: impl IntoIterator<Item = Passenger>,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        let cars = Self::send(&mut service, Request::Snapshot)
            .await
            .map_err(|e| anyhow::anyhow!(e))?
            .into_cars()
            .ok_or_else(|| anyhow::anyhow!("snapshot request returned no cars"))?;
        Ok(Simulation {
            service,
            config,
            to_call: passengers.into_iter().collect(),
            waiting: Vec::new(),
            cars,
            summary: SimulationSummary::default(),
        })
    }

    pub fn cars(&self) -> &[CarSnapshot] {
        &self.cars
    }

    pub fn waiting(&self) -> &[Passenger] {
        &self.waiting
    }

    pub fn summary(&self) -> SimulationSummary {
        self.summary
    }

    pub fn is_finished(&self) -> bool {
        self.to_call.is_empty()
            && self.waiting.is_empty()
            && self.summary.steps >= self.config.min_steps_amount
            && self.cars.iter().all(|c| c.direction == Direction::Idle)
    }

    pub async fn run(mut self) -> anyhow::Result<SimulationSummary> {
        while !self.is_finished() {
            self.step().await?;
        }
        tracing::info!(
            steps = self.summary.steps,
            boarded = self.summary.boarded,
            deferred = self.summary.deferred,
            rejected = self.summary.rejected,
            "simulation finished"
        );
        Ok(self.summary)
    }

    /// One iteration: maybe call a car, board passengers, move the fleet.
    pub async fn step(&mut self) -> anyhow::Result<()> {
        if self.summary.steps % self.config.passengers_frequency == 0 {
            self.call_next().await?;
        }
        self.summary.steps += 1;
        self.board().await?;

        self.cars = Self::send(&mut self.service, Request::Step)
            .await
            .map_err(|e| anyhow::anyhow!(e))?
            .into_cars()
            .ok_or_else(|| anyhow::anyhow!("step request returned no cars"))?;
        self.report();
        Ok(())
    }

    async fn call_next(&mut self) -> anyhow::Result<()> {
        let Some(mut passenger) = self.to_call.pop_front() else {
            return Ok(());
        };
        let request = Request::Pickup {
            floor: passenger.starting_floor,
            direction: passenger.direction,
        };
        match Self::send(&mut self.service, request).await {
            Ok(Reply::Assigned(car)) => {
                passenger.assigned_car = Some(car);
                self.waiting.push(passenger);
            }
            Ok(other) => anyhow::bail!("unexpected reply to pickup: {other:?}"),
            Err(e) => match e.downcast_ref::<Error>() {
                Some(Error::NoSuitableCar { .. }) => {
                    tracing::warn!("{passenger} deferred: {e}");
                    self.summary.deferred += 1;
                    self.to_call.push_front(passenger);
                }
                Some(Error::UnavailableCall { .. } | Error::FloorOutOfRange { .. }) => {
                    tracing::warn!("{passenger} dropped: {e}");
                    self.summary.rejected += 1;
                }
                _ => return Err(anyhow::anyhow!(e)),
            },
        }
        Ok(())
    }

    // Passengers whose car stands on their floor get in and press a button.
    async fn board(&mut self) -> anyhow::Result<()> {
        let mut still_waiting = Vec::with_capacity(self.waiting.len());
        for passenger in std::mem::take(&mut self.waiting) {
            let car = match passenger.assigned_car {
                Some(car)
                    if self
                        .cars
                        .get(car)
                        .is_some_and(|c| c.current_floor == passenger.starting_floor) =>
                {
                    car
                }
                _ => {
                    still_waiting.push(passenger);
                    continue;
                }
            };
            let request = Request::Destination {
                car,
                floor: passenger.destination_floor,
            };
            Self::send(&mut self.service, request)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            tracing::debug!("{passenger} boarded");
            self.summary.boarded += 1;
        }
        self.waiting = still_waiting;
        Ok(())
    }

    fn report(&self) {
        let cars = self
            .cars
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let waiting = self
            .waiting
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        tracing::info!("Step {}: {cars}", self.summary.steps);
        tracing::info!("Waiting: [{waiting}]");
    }

    async fn send(service: &mut Svc, request: Request) -> Result<Reply, BoxError> {
        service.ready().await?.call(request).await
    }
}
