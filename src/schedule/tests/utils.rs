use crate::flight::{FlightId, FlightRequest, RunwayId, ScheduledFlight};
use crate::runway::RunwayPool;
use crate::schedule::allocator::schedule;
use crate::time::{MINUTES_PER_DAY, Time};
use proptest::prelude::Strategy;
use std::collections::HashMap;

pub fn request(id: FlightId, scheduled_time: &str, duration: u32) -> FlightRequest {
    FlightRequest::new(id, scheduled_time, duration).unwrap()
}

pub fn requests(data: &[(FlightId, &str, u32)]) -> Vec<FlightRequest> {
    data.iter()
        .map(|(id, time, duration)| request(*id, time, *duration))
        .collect()
}

pub fn run(runway_count: usize, data: &[(FlightId, &str, u32)]) -> Vec<ScheduledFlight> {
    let mut pool = RunwayPool::new(runway_count).unwrap();
    schedule(requests(data), &mut pool).unwrap()
}

pub fn find(flights: &[ScheduledFlight], id: FlightId) -> &ScheduledFlight {
    flights.iter().find(|f| f.id() == id).unwrap()
}

pub fn ids(flights: &[ScheduledFlight]) -> Vec<FlightId> {
    flights.iter().map(|f| f.id()).collect()
}

pub fn starts(flights: &[ScheduledFlight]) -> Vec<String> {
    flights.iter().map(|f| f.start_time.to_string()).collect()
}

pub fn delays(flights: &[ScheduledFlight]) -> Vec<u32> {
    flights.iter().map(|f| f.delay()).collect()
}

/// Occupied `[start, end)` intervals per runway, ordered by start.
pub fn occupancy(flights: &[ScheduledFlight]) -> HashMap<RunwayId, Vec<(Time, Time)>> {
    let mut by_runway: HashMap<RunwayId, Vec<(Time, Time)>> = HashMap::new();
    for flight in flights {
        by_runway
            .entry(flight.runway)
            .or_default()
            .push((flight.start_time, flight.end_time()));
    }
    by_runway.values_mut().for_each(|v| v.sort());
    by_runway
}

pub fn arb_request() -> impl Strategy<Value = FlightRequest> {
    (0..20u32, 0..MINUTES_PER_DAY, 1..120u32).prop_map(|(id, minute, duration)| FlightRequest {
        id,
        scheduled_time: Time(minute),
        duration,
    })
}
