use crate::error::SchedulerError;
use crate::flight::{FlightRequest, ScheduledFlight};
use crate::runway::{RunwayPool, RunwaySlot};
use crate::schedule::allocator;
use crate::time::Time;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

/// A long-lived runway pool that admits flights one at a time.
///
/// Every admission holds the pool lock across its pop and push, so concurrent
/// callers see the same greedy semantics as a batch run in lock order.
/// Admitted flights are final.
#[derive(Debug)]
pub struct SchedulingService {
    pool: Mutex<RunwayPool>,
}

impl SchedulingService {
    #[cfg(test)]
    pub fn new(runway_count: usize) -> Result<Self, SchedulerError> {
        Self::open_at(runway_count, Time(0))
    }

    pub fn open_at(runway_count: usize, now: Time) -> Result<Self, SchedulerError> {
        let pool = RunwayPool::open_at(runway_count, now)?;
        info!(runways = runway_count, open_at = %now, "Scheduling service open");
        Ok(SchedulingService {
            pool: Mutex::new(pool),
        })
    }

    // `assign` has no fallible or panicking step between its pop and push, and
    // batches commit a finished copy, so a poisoned pool still holds every runway.
    fn pool(&self) -> MutexGuard<'_, RunwayPool> {
        self.pool.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn admit(&self, request: FlightRequest) -> Result<ScheduledFlight, SchedulerError> {
        request.validate()?;
        let mut pool = self.pool();
        allocator::assign(request, &mut pool)
    }

    /// Schedules a whole batch under a single lock acquisition.
    pub fn admit_batch(
        &self,
        requests: Vec<FlightRequest>,
    ) -> Result<Vec<ScheduledFlight>, SchedulerError> {
        let mut pool = self.pool();
        allocator::schedule(requests, &mut pool)
    }

    pub fn runway_count(&self) -> usize {
        self.pool().runway_count()
    }

    pub fn free_times(&self) -> Vec<RunwaySlot> {
        self.pool().free_times()
    }
}
