use std::fmt;
use std::fmt::Display;

/// Where a car is heading.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Idle,
    MovingUp,
    MovingDown,
}

impl Direction {
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Idle => "-",
            Direction::MovingUp => "/\\",
            Direction::MovingDown => "\\/",
        }
    }

    /// Whether a car heading this way travels the way a caller asked to go.
    pub fn matches(self, call: CallDirection) -> bool {
        matches!(
            (self, call),
            (Direction::MovingUp, CallDirection::Up) | (Direction::MovingDown, CallDirection::Down)
        )
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Idle => write!(f, "idle"),
            Direction::MovingUp => write!(f, "upwards"),
            Direction::MovingDown => write!(f, "downwards"),
        }
    }
}

/// The hall button a caller pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallDirection {
    Up,
    Down,
}

impl CallDirection {
    /// Direction of a trip from `from` to `to`. Equal floors count as up.
    pub fn between(from: u32, to: u32) -> CallDirection {
        if from > to {
            CallDirection::Down
        } else {
            CallDirection::Up
        }
    }
}

impl Display for CallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallDirection::Up => write!(f, "upwards"),
            CallDirection::Down => write!(f, "downwards"),
        }
    }
}
