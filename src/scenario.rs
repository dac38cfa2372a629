use crate::flight::{FlightId, FlightRequest};
use serde::Deserialize;
use std::io;

/// Flights to queue at startup, read from a JSON file.
pub struct Scenario {
    pub runways: Option<usize>,
    pub flights: Vec<FlightRequest>,
}

impl Scenario {
    pub fn load_from_file(path: &str) -> io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> io::Result<Self> {
        #[derive(Deserialize)]
        struct RawFlight {
            id: FlightId,
            scheduled_time: String,
            duration: u32,
        }
        #[derive(Deserialize)]
        struct RawData {
            runways: Option<usize>,
            flights: Vec<RawFlight>,
        }
        let raw: RawData = serde_json::from_str(data)?;

        let flights = raw
            .flights
            .into_iter()
            .map(|f| FlightRequest::new(f.id, &f.scheduled_time, f.duration))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(Scenario {
            runways: raw.runways,
            flights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Time;

    #[test]
    fn test_from_json() {
        let scenario = Scenario::from_json(
            r#"{"runways": 2, "flights": [{"id": 1, "scheduled_time": "09:00", "duration": 60}]}"#,
        )
        .unwrap();
        assert_eq!(Some(2), scenario.runways);
        assert_eq!(1, scenario.flights.len());
        assert_eq!(Time(540), scenario.flights[0].scheduled_time);
    }

    #[test]
    fn test_runways_optional() {
        let scenario = Scenario::from_json(r#"{"flights": []}"#).unwrap();
        assert_eq!(None, scenario.runways);
        assert!(scenario.flights.is_empty());
    }

    #[test]
    fn test_invalid_time_rejected() {
        let err = Scenario::from_json(
            r#"{"flights": [{"id": 1, "scheduled_time": "24:00", "duration": 60}]}"#,
        )
        .err()
        .unwrap();
        assert_eq!(io::ErrorKind::InvalidData, err.kind());
        assert!(err.to_string().contains("24:00"));
    }

    #[test]
    fn test_bundled_default_scenario_loads() {
        let scenario = Scenario::load_from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/data/default.json")).unwrap();
        assert_eq!(Some(2), scenario.runways);
        assert_eq!(6, scenario.flights.len());
    }
}
