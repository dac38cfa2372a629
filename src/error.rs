use crate::flight::{FlightId, MAX_DURATION};
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The text is not a valid `HH:MM` time of day.
    InvalidTimeFormat(String),
    /// A pool needs at least one runway.
    InvalidRunwayCount(usize),
    /// A flight must occupy its runway for 1 to `MAX_DURATION` minutes, and
    /// its end time must be representable.
    InvalidDuration { flight: FlightId, duration: u32 },
    PoolExhausted,
}

impl Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::InvalidTimeFormat(text) => write!(
                f,
                "Invalid time '{}': expected HH:MM between 00:00 and 23:59",
                text
            ),
            SchedulerError::InvalidRunwayCount(count) => {
                write!(f, "Invalid runway count {}: at least one runway is required", count)
            }
            SchedulerError::InvalidDuration { flight, duration } => write!(
                f,
                "Flight {} has invalid duration {}: must be between 1 and {} minutes",
                flight, duration, MAX_DURATION
            ),
            SchedulerError::PoolExhausted => write!(f, "No runway left in the pool"),
        }
    }
}

impl std::error::Error for SchedulerError {}
