use crate::error::SchedulerError;
use crate::flight::{FlightRequest, RunwayId, ScheduledFlight};
use crate::runway::{RunwayPool, RunwaySlot};
use std::collections::HashMap;
use tracing::{debug, info};

/// Greedy earliest-available-runway assignment.
///
/// Requests are stably sorted by scheduled time, so simultaneous arrivals keep
/// their input order. Each one takes the runway that frees up first and starts
/// at `max(free_at, scheduled_time)`. The output follows that sorted order.
/// The batch runs against a copy of the pool that replaces it only once every
/// request is placed; on error the pool is left as it was.
pub fn schedule(
    mut requests: Vec<FlightRequest>,
    pool: &mut RunwayPool,
) -> Result<Vec<ScheduledFlight>, SchedulerError> {
    requests.iter().try_for_each(FlightRequest::validate)?;
    requests.sort_by_key(|r| r.scheduled_time);

    let mut working = pool.clone();
    let mut scheduled = Vec::with_capacity(requests.len());
    for request in requests {
        scheduled.push(assign(request, &mut working)?);
    }
    debug_assert_eq!(working.runway_count(), working.len(), "Runway lost from pool");
    *pool = working;

    info!(
        flights = scheduled.len(),
        runways = pool.runway_count(),
        total_delay = scheduled.iter().map(|f| u64::from(f.delay())).sum::<u64>(),
        "Scheduled batch"
    );
    assert_invariants(&scheduled);
    Ok(scheduled)
}

/// Puts one validated request on the earliest free runway.
///
/// Every fallible step happens before the pop, so the runway always goes
/// back into the pool.
pub(crate) fn assign(
    request: FlightRequest,
    pool: &mut RunwayPool,
) -> Result<ScheduledFlight, SchedulerError> {
    let RunwaySlot { free_at, runway } = pool.peek_earliest().ok_or(SchedulerError::PoolExhausted)?;
    let start_time = free_at.max(request.scheduled_time);
    let end_time = start_time
        .checked_add(request.duration)
        .ok_or(SchedulerError::InvalidDuration {
            flight: request.id,
            duration: request.duration,
        })?;

    pool.pop_earliest()?;
    pool.push(RunwaySlot {
        free_at: end_time,
        runway,
    });
    let flight = request.into_scheduled(start_time, runway);
    debug!(
        flight = flight.id(),
        runway = %runway,
        start = %flight.start_time,
        delay = flight.delay(),
        "Assigned runway"
    );
    Ok(flight)
}

fn assert_invariants(flights: &[ScheduledFlight]) {
    if !cfg!(debug_assertions) {
        return;
    }

    debug_assert!(
        flights.iter().all(|f| f.start_time >= f.request.scheduled_time),
        "Start before scheduled time invariant violated"
    );

    let mut by_runway: HashMap<RunwayId, Vec<&ScheduledFlight>> = HashMap::new();
    for flight in flights {
        by_runway.entry(flight.runway).or_default().push(flight);
    }
    for (_, mut flights) in by_runway {
        flights.sort_by_key(|f| f.start_time);
        debug_assert!(
            flights.windows(2).all(|fs| fs[0].end_time() <= fs[1].start_time),
            "Runway occupancy overlap invariant violated"
        );
    }
}
