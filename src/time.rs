use crate::error::SchedulerError;
use serde::{Deserialize, Serialize};
use std::ops::Add;
use std::str::FromStr;

pub const MINUTES_PER_DAY: u32 = 1440;

/// Minutes since the start of the operating day.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, Serialize, Deserialize, PartialOrd, Default)]
#[serde(transparent)]
pub struct Time(pub u32);

impl Time {
    /// Parses a strict `HH:MM` time of day, `00:00` through `23:59`.
    pub fn parse(text: &str) -> Result<Time, SchedulerError> {
        let invalid = || SchedulerError::InvalidTimeFormat(text.to_string());

        let (hh, mm) = text.split_once(':').ok_or_else(invalid)?;
        let field = |s: &str| -> Option<u32> {
            if s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit()) {
                s.parse().ok()
            } else {
                None
            }
        };
        let hours = field(hh).ok_or_else(invalid)?;
        let minutes = field(mm).ok_or_else(invalid)?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }
        Ok(Time(hours * 60 + minutes))
    }

    pub fn checked_add(self, minutes: u32) -> Option<Time> {
        self.0.checked_add(minutes).map(Time)
    }

    pub fn saturating_minutes_since(self, earlier: Time) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl FromStr for Time {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Time::parse(s)
    }
}

// Hours are not wrapped: a start queued past midnight prints as 24:10.
impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hours = self.0 / 60;
        let mins = self.0 % 60;
        write!(f, "{:02}:{:02}", hours, mins)
    }
}

impl Add<u32> for Time {
    type Output = Self;

    fn add(self, rhs: u32) -> Self::Output {
        Time(self.0 + rhs)
    }
}
