use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt;
use std::fmt::Display;

use crate::error::{Error, Result};
use crate::types::direction::Direction;

/// A single elevator car.
///
/// Requests are split on insertion: floors above the car go to `above`
/// (nearest first, ascending), floors below go to `below` (nearest first,
/// descending). A request for the floor the car stands on is dropped.
#[derive(Debug, Clone)]
pub struct Car {
    id: usize,
    current_floor: u32,
    top_floor: u32,
    direction: Direction,
    above: BTreeSet<u32>,
    below: BTreeSet<Reverse<u32>>,
}

impl Car {
    pub fn new(id: usize, top_floor: u32) -> Self {
        Self {
            id,
            current_floor: 0,
            top_floor,
            direction: Direction::Idle,
            above: BTreeSet::new(),
            below: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn current_floor(&self) -> u32 {
        self.current_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_idle(&self) -> bool {
        self.direction == Direction::Idle
    }

    pub fn add_request(&mut self, floor: u32) {
        if floor > self.current_floor {
            self.above.insert(floor);
        } else if floor < self.current_floor {
            self.below.insert(Reverse(floor));
        }
    }

    pub fn has_above_requests(&self) -> bool {
        !self.above.is_empty()
    }

    pub fn has_below_requests(&self) -> bool {
        !self.below.is_empty()
    }

    pub fn next_above_request(&self) -> Result<u32> {
        self.above.first().copied().ok_or(Error::EmptyQueue)
    }

    pub fn next_below_request(&self) -> Result<u32> {
        self.below
            .first()
            .map(|&Reverse(f)| f)
            .ok_or(Error::EmptyQueue)
    }

    pub fn pending_requests(&self) -> usize {
        self.above.len() + self.below.len()
    }

    pub fn above_requests(&self) -> impl Iterator<Item = u32> + '_ {
        self.above.iter().copied()
    }

    pub fn below_requests(&self) -> impl Iterator<Item = u32> + '_ {
        self.below.iter().map(|&Reverse(f)| f)
    }

    /// Drops the nearest request in the direction of travel.
    pub fn remove_nearest_request(&mut self) {
        match self.direction {
            Direction::MovingUp => {
                self.above.pop_first();
            }
            Direction::MovingDown => {
                self.below.pop_first();
            }
            Direction::Idle => {}
        }
    }

    /// Nearest request in the direction of travel, or the current floor.
    pub fn target_floor(&self) -> u32 {
        let next = match self.direction {
            Direction::MovingUp => self.next_above_request(),
            Direction::MovingDown => self.next_below_request(),
            Direction::Idle => Err(Error::EmptyQueue),
        };
        next.unwrap_or(self.current_floor)
    }

    /// Advances the car by one step and returns the floor it served, if any.
    ///
    /// Direction is only re-evaluated after the move, so a car reaching the
    /// last floor of one queue turns straight around when the other queue
    /// has work.
    pub fn tick(&mut self) -> Option<u32> {
        let (served, next) = match self.direction {
            Direction::MovingUp => self.step_up(),
            Direction::MovingDown => self.step_down(),
            Direction::Idle => (None, self.wake()),
        };
        self.direction = next;
        served
    }

    fn step_up(&mut self) -> (Option<u32>, Direction) {
        if self.current_floor < self.top_floor {
            self.current_floor += 1;
        }
        let served = self.serve_if_next(self.next_above_request());
        let next = if self.has_above_requests() {
            Direction::MovingUp
        } else if self.has_below_requests() {
            Direction::MovingDown
        } else {
            Direction::Idle
        };
        (served, next)
    }

    fn step_down(&mut self) -> (Option<u32>, Direction) {
        self.current_floor = self.current_floor.saturating_sub(1);
        let served = self.serve_if_next(self.next_below_request());
        let next = if self.has_below_requests() {
            Direction::MovingDown
        } else if self.has_above_requests() {
            Direction::MovingUp
        } else {
            Direction::Idle
        };
        (served, next)
    }

    fn serve_if_next(&mut self, next: Result<u32>) -> Option<u32> {
        match next {
            Ok(floor) if floor == self.current_floor => {
                self.remove_nearest_request();
                Some(floor)
            }
            _ => None,
        }
    }

    fn wake(&self) -> Direction {
        if self.has_above_requests() && self.current_floor < self.top_floor {
            Direction::MovingUp
        } else if self.has_below_requests() && self.current_floor > 0 {
            Direction::MovingDown
        } else {
            Direction::Idle
        }
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, floor: u32, direction: Direction) {
        self.current_floor = floor;
        self.direction = direction;
    }
}

/// Read-only view of a car for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarSnapshot {
    pub id: usize,
    pub current_floor: u32,
    pub direction: Direction,
    pub target_floor: u32,
}

impl From<&Car> for CarSnapshot {
    fn from(car: &Car) -> Self {
        CarSnapshot {
            id: car.id(),
            current_floor: car.current_floor(),
            direction: car.direction(),
            target_floor: car.target_floor(),
        }
    }
}

impl Display for CarSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{[C{}][{}]CF: {}, TF: {}}}",
            self.id,
            self.direction.arrow(),
            self.current_floor,
            self.target_floor
        )
    }
}

impl Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        CarSnapshot::from(self).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Car at floor 5 holding {6, 7, 8} above and {3, 2} below.
    fn loaded_car() -> Car {
        let mut car = Car::new(0, 50);
        car.place(5, Direction::Idle);
        for floor in [8, 7, 6, 3, 2] {
            car.add_request(floor);
        }
        car
    }

    fn assert_disjoint(car: &Car) {
        for floor in car.above_requests() {
            assert!(
                !car.below_requests().any(|f| f == floor),
                "floor {floor} queued both ways on car {}",
                car.id()
            );
        }
    }

    #[test]
    fn requests_are_bucketed_against_current_floor() {
        let mut car = Car::new(0, 50);
        car.place(5, Direction::Idle);
        car.add_request(8);
        car.add_request(3);
        car.add_request(2);

        assert_eq!(car.above_requests().collect::<Vec<_>>(), vec![8]);
        assert_eq!(car.below_requests().collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(car.next_below_request(), Ok(3));

        car.place(5, Direction::MovingDown);
        car.remove_nearest_request();
        assert_eq!(car.next_below_request(), Ok(2));
    }

    #[test]
    fn request_for_current_floor_is_dropped() {
        let mut car = Car::new(0, 10);
        car.add_request(0);
        assert_eq!(car.pending_requests(), 0);
    }

    #[test]
    fn insertion_is_idempotent() {
        let mut car = loaded_car();
        let before = car.pending_requests();
        car.add_request(7);
        car.add_request(3);
        assert_eq!(car.pending_requests(), before);
    }

    #[test]
    fn nearest_requests() {
        let car = loaded_car();
        assert_eq!(car.next_above_request(), Ok(6));
        assert_eq!(car.next_below_request(), Ok(3));
    }

    #[test]
    fn empty_queue_is_an_error() {
        let car = Car::new(0, 10);
        assert_eq!(car.next_above_request(), Err(Error::EmptyQueue));
        assert_eq!(car.next_below_request(), Err(Error::EmptyQueue));
    }

    #[test]
    fn target_floor_follows_direction() {
        let mut car = loaded_car();
        assert_eq!(car.target_floor(), 5);

        car.place(5, Direction::MovingDown);
        assert_eq!(car.target_floor(), 3);

        car.place(5, Direction::MovingUp);
        assert_eq!(car.target_floor(), 6);
    }

    #[test]
    fn remove_walks_queue_in_order() {
        let mut car = loaded_car();
        car.place(5, Direction::MovingUp);
        car.remove_nearest_request();
        car.remove_nearest_request();
        assert_eq!(car.next_above_request(), Ok(8));

        car.add_request(7);
        assert_eq!(car.next_above_request(), Ok(7));
        car.remove_nearest_request();
        assert_eq!(car.next_above_request(), Ok(8));
        car.remove_nearest_request();
        assert!(!car.has_above_requests());
        assert_eq!(car.pending_requests(), 2);
    }

    #[test]
    fn remove_while_idle_is_noop() {
        let mut car = loaded_car();
        car.remove_nearest_request();
        assert_eq!(car.pending_requests(), 5);
    }

    #[test]
    fn idle_car_wakes_without_moving() {
        let mut car = Car::new(0, 10);
        car.add_request(3);
        assert_eq!(car.tick(), None);
        assert_eq!(car.direction(), Direction::MovingUp);
        assert_eq!(car.current_floor(), 0);
    }

    #[test]
    fn idle_car_with_nothing_to_do_stays_idle() {
        let mut car = Car::new(0, 10);
        car.tick();
        assert!(car.is_idle());
        assert_eq!(car.current_floor(), 0);
    }

    #[test]
    fn idle_car_at_top_does_not_wake_upwards() {
        let mut car = Car::new(0, 10);
        car.place(10, Direction::Idle);
        car.add_request(11);
        assert!(car.has_above_requests());

        assert_eq!(car.tick(), None);
        assert!(car.is_idle());
        assert_eq!(car.current_floor(), 10);
    }

    #[test]
    fn direction_flips_without_idle_tick() {
        let mut car = Car::new(0, 10);
        car.place(5, Direction::Idle);
        car.add_request(6);
        car.add_request(4);
        car.place(5, Direction::MovingUp);

        assert_eq!(car.tick(), Some(6));
        assert_eq!(car.current_floor(), 6);
        assert!(!car.has_above_requests());
        assert_eq!(car.direction(), Direction::MovingDown);
    }

    #[test]
    fn moving_car_passes_unrequested_floors() {
        let mut car = Car::new(0, 10);
        car.add_request(3);
        car.tick();
        assert_eq!(car.tick(), None);
        assert_eq!(car.current_floor(), 1);
        assert_eq!(car.direction(), Direction::MovingUp);
    }

    #[test]
    fn movement_is_clamped_to_shaft() {
        let mut car = Car::new(0, 3);
        car.place(3, Direction::MovingUp);
        car.tick();
        assert_eq!(car.current_floor(), 3);
        assert!(car.is_idle());

        car.place(0, Direction::MovingDown);
        car.tick();
        assert_eq!(car.current_floor(), 0);
        assert!(car.is_idle());
    }

    #[test]
    fn every_request_is_served_once() {
        let mut car = loaded_car();
        let mut served = Vec::new();
        for _ in 0..64 {
            assert_disjoint(&car);
            if let Some(floor) = car.tick() {
                served.push(floor);
            }
        }
        assert_eq!(served, vec![6, 7, 8, 3, 2]);
        assert_eq!(car.pending_requests(), 0);
        assert!(car.is_idle());
    }

    #[test]
    fn display_matches_report_format() {
        let mut car = loaded_car();
        car.place(5, Direction::MovingDown);
        assert_eq!(car.to_string(), "{[C0][\\/]CF: 5, TF: 3}");
    }
}
