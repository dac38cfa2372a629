use crate::runway::RunwayPool;
use crate::schedule::allocator::schedule;
use crate::schedule::tests::utils::{arb_request, occupancy};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_no_overlap_and_lower_bound(
        runway_count in 1..5usize,
        batch in prop::collection::vec(arb_request(), 0..40)
    ) {
        let mut pool = RunwayPool::new(runway_count).unwrap();
        let flights = schedule(batch.clone(), &mut pool).unwrap();

        prop_assert_eq!(batch.len(), flights.len());
        prop_assert_eq!(runway_count, pool.len());

        for flight in &flights {
            prop_assert!(
                flight.start_time >= flight.request.scheduled_time,
                "\nFlight {} starts at {} before its scheduled {}",
                flight.id(), flight.start_time, flight.request.scheduled_time
            );
            prop_assert!(flight.runway.0 < runway_count);
        }

        for (runway, intervals) in occupancy(&flights) {
            for pair in intervals.windows(2) {
                prop_assert!(
                    pair[0].1 <= pair[1].0,
                    "\nOverlap on runway {}:\n[{}, {}) vs [{}, {})",
                    runway, pair[0].0, pair[0].1, pair[1].0, pair[1].1
                );
            }
        }
    }

    #[test]
    fn test_stable_on_equal_scheduled_time(
        runway_count in 1..4usize,
        batch in prop::collection::vec(arb_request(), 0..40)
    ) {
        let mut pool = RunwayPool::new(runway_count).unwrap();
        let flights = schedule(batch.clone(), &mut pool).unwrap();

        let mut expected = batch.clone();
        expected.sort_by_key(|r| r.scheduled_time);
        let order = flights.iter().map(|f| f.request.clone()).collect::<Vec<_>>();
        prop_assert_eq!(expected, order);

        // Earlier in the queue never starts later than a simultaneous arrival behind it.
        for pair in flights.windows(2) {
            if pair[0].request.scheduled_time == pair[1].request.scheduled_time {
                prop_assert!(pair[0].start_time <= pair[1].start_time);
            }
        }
    }

    #[test]
    fn test_no_delay_when_runways_suffice(
        batch in prop::collection::vec(arb_request(), 1..10)
    ) {
        let mut pool = RunwayPool::new(batch.len()).unwrap();
        let flights = schedule(batch, &mut pool).unwrap();

        prop_assert!(flights.iter().all(|f| f.delay() == 0));
    }
}
