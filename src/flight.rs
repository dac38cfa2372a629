use crate::error::SchedulerError;
use crate::time::{MINUTES_PER_DAY, Time};
use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::Tabled;

/// Caller-supplied flight number. Uniqueness is not enforced: two requests
/// sharing an id are scheduled as two independent flights.
pub type FlightId = u32;

/// Longest runway occupancy a single request may ask for.
pub const MAX_DURATION: u32 = MINUTES_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunwayId(pub usize);

impl fmt::Display for RunwayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A flight waiting for a runway slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightRequest {
    pub id: FlightId,
    pub scheduled_time: Time,
    pub duration: u32,
}

impl FlightRequest {
    pub fn new(id: FlightId, scheduled_time: &str, duration: u32) -> Result<Self, SchedulerError> {
        let request = FlightRequest {
            id,
            scheduled_time: Time::parse(scheduled_time)?,
            duration,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.duration == 0 || self.duration > MAX_DURATION {
            return Err(SchedulerError::InvalidDuration {
                flight: self.id,
                duration: self.duration,
            });
        }
        Ok(())
    }

    /// Moves the request into its terminal scheduled state.
    pub(crate) fn into_scheduled(self, start_time: Time, runway: RunwayId) -> ScheduledFlight {
        debug_assert!(start_time >= self.scheduled_time, "Start before scheduled time");
        ScheduledFlight {
            request: self,
            start_time,
            runway,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledFlight {
    pub request: FlightRequest,
    pub start_time: Time,
    pub runway: RunwayId,
}

impl ScheduledFlight {
    pub fn id(&self) -> FlightId {
        self.request.id
    }

    pub fn delay(&self) -> u32 {
        self.start_time.saturating_minutes_since(self.request.scheduled_time)
    }

    /// First minute the runway is free again.
    pub fn end_time(&self) -> Time {
        self.start_time + self.request.duration
    }

    pub fn record(&self) -> FlightRecord {
        FlightRecord {
            id: self.request.id,
            scheduled_time: self.request.scheduled_time,
            duration: self.request.duration,
            start_time: self.start_time,
            delay: self.delay(),
            runway: self.runway,
        }
    }
}

/// Outcome row handed to the history store and the delay report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct FlightRecord {
    #[tabled(rename = "Flight ID")]
    pub id: FlightId,
    #[tabled(rename = "Scheduled")]
    pub scheduled_time: Time,
    #[tabled(rename = "Duration (min)")]
    pub duration: u32,
    #[tabled(rename = "Start")]
    pub start_time: Time,
    #[tabled(rename = "Delay (min)")]
    pub delay: u32,
    #[tabled(rename = "Runway")]
    pub runway: RunwayId,
}

/// Console view of a request that has not been scheduled yet.
#[derive(Tabled)]
pub struct PendingRow {
    #[tabled(rename = "Flight ID")]
    pub id: FlightId,
    #[tabled(rename = "Scheduled")]
    pub scheduled_time: Time,
    #[tabled(rename = "Duration (min)")]
    pub duration: u32,
}

impl From<&FlightRequest> for PendingRow {
    fn from(request: &FlightRequest) -> Self {
        PendingRow {
            id: request.id,
            scheduled_time: request.scheduled_time,
            duration: request.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_time_and_duration() {
        assert_eq!(
            Err(SchedulerError::InvalidTimeFormat("9:5".to_string())),
            FlightRequest::new(1, "9:5", 30)
        );
        assert_eq!(
            Err(SchedulerError::InvalidDuration { flight: 1, duration: 0 }),
            FlightRequest::new(1, "09:05", 0)
        );
        assert_eq!(
            Err(SchedulerError::InvalidDuration { flight: 1, duration: u32::MAX }),
            FlightRequest::new(1, "09:05", u32::MAX)
        );
        assert!(FlightRequest::new(1, "09:05", MAX_DURATION).is_ok());
        assert_eq!(Time(545), FlightRequest::new(1, "09:05", 30).unwrap().scheduled_time);
    }

    #[test]
    fn test_record_carries_delay() {
        let flight = FlightRequest::new(2, "10:10", 20)
            .unwrap()
            .into_scheduled(Time(630), RunwayId(0));

        assert_eq!(20, flight.delay());
        assert_eq!(Time(650), flight.end_time());

        let record = flight.record();
        assert_eq!(2, record.id);
        assert_eq!("10:10", record.scheduled_time.to_string());
        assert_eq!("10:30", record.start_time.to_string());
        assert_eq!(20, record.delay);
        assert_eq!(RunwayId(0), record.runway);
    }

    #[test]
    fn test_record_json_keeps_raw_minutes() {
        let record = FlightRequest::new(3, "08:00", 10)
            .unwrap()
            .into_scheduled(Time(480), RunwayId(1))
            .record();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            r#"{"id":3,"scheduled_time":480,"duration":10,"start_time":480,"delay":0,"runway":1}"#,
            json
        );
        assert_eq!(record, serde_json::from_str(&json).unwrap());
    }
}
