use crate::error::SchedulerError;
use crate::flight::RunwayId;
use crate::time::Time;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A runway and the minute it can take its next flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunwaySlot {
    pub free_at: Time,
    pub runway: RunwayId,
}

/// Earliest `free_at` first; on a tie the lower runway index wins.
impl Ord for RunwaySlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.free_at
            .cmp(&other.free_at)
            .then_with(|| self.runway.cmp(&other.runway))
    }
}

impl PartialOrd for RunwaySlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of runway free-at times.
///
/// Every `pop_earliest` is expected to be followed by a `push` of the same
/// runway, which keeps the pool at `runway_count` entries.
#[derive(Debug, Clone)]
pub struct RunwayPool {
    heap: BinaryHeap<Reverse<RunwaySlot>>,
    runway_count: usize,
}

impl RunwayPool {
    pub fn new(runway_count: usize) -> Result<Self, SchedulerError> {
        Self::open_at(runway_count, Time(0))
    }

    /// Pool whose runways all become free at `now`.
    pub fn open_at(runway_count: usize, now: Time) -> Result<Self, SchedulerError> {
        if runway_count == 0 {
            return Err(SchedulerError::InvalidRunwayCount(runway_count));
        }
        let heap = (0..runway_count)
            .map(|i| {
                Reverse(RunwaySlot {
                    free_at: now,
                    runway: RunwayId(i),
                })
            })
            .collect();
        Ok(RunwayPool { heap, runway_count })
    }

    pub fn pop_earliest(&mut self) -> Result<RunwaySlot, SchedulerError> {
        self.heap
            .pop()
            .map(|Reverse(slot)| slot)
            .ok_or(SchedulerError::PoolExhausted)
    }

    pub fn push(&mut self, slot: RunwaySlot) {
        debug_assert!(slot.runway.0 < self.runway_count, "Unknown runway {}", slot.runway);
        self.heap.push(Reverse(slot));
    }

    pub fn peek_earliest(&self) -> Option<RunwaySlot> {
        self.heap.peek().map(|Reverse(slot)| *slot)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn runway_count(&self) -> usize {
        self.runway_count
    }

    /// Snapshot of every runway in index order.
    pub fn free_times(&self) -> Vec<RunwaySlot> {
        let mut slots = self.heap.iter().map(|Reverse(slot)| *slot).collect::<Vec<_>>();
        slots.sort_by_key(|s| s.runway);
        slots
    }
}
