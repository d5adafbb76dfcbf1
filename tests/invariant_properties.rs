//! Property tests for log growth and decision-engine bounds

use proptest::prelude::*;
use stronghold::ai::{DecisionEngine, RESOURCE_TYPE_COUNT, UNIT_TYPE_COUNT};
use stronghold::history::GrowableLog;

proptest! {
    #[test]
    fn prop_log_keeps_every_append(values in prop::collection::vec(any::<i64>(), 0..200)) {
        let mut log = GrowableLog::new();
        for v in &values {
            log.append(*v);
        }

        prop_assert_eq!(log.len(), values.len());
        prop_assert!(log.capacity() >= log.len());
        for (i, v) in values.iter().enumerate() {
            prop_assert_eq!(log.get(i).unwrap(), v);
        }
        prop_assert!(log.get(values.len()).is_err());
    }

    #[test]
    fn prop_log_capacity_is_power_of_two_multiple(count in 0usize..500) {
        let mut log = GrowableLog::new();
        for i in 0..count {
            log.append(i);
        }
        let cap = log.capacity();
        prop_assert_eq!(cap % 10, 0);
        prop_assert!((cap / 10).is_power_of_two());
        // Never more than double what is needed
        prop_assert!(count <= 10 || cap < 2 * count);
    }

    #[test]
    fn prop_unit_strengths_clamped(
        updates in prop::collection::vec((0usize..UNIT_TYPE_COUNT, -10.0f32..10.0), 0..50)
    ) {
        let mut engine = DecisionEngine::new();
        for (unit, value) in updates {
            engine.update_unit_strength(unit, value).unwrap();
        }
        for strength in engine.unit_strengths() {
            prop_assert!((0.5..=2.0).contains(strength));
        }
    }

    #[test]
    fn prop_priorities_renormalize_near_hundred(
        updates in prop::collection::vec((0usize..RESOURCE_TYPE_COUNT, -50i32..200), 1..30)
    ) {
        let mut engine = DecisionEngine::new();
        for (slot, priority) in updates {
            engine.set_resource_priority(slot, priority).unwrap();
            let sum: u32 = engine.resource_priorities().iter().sum();
            prop_assert!(engine.resource_priorities().iter().all(|w| *w <= 100));
            prop_assert!(
                sum == 0 || (sum <= 100 && sum + (RESOURCE_TYPE_COUNT as u32 - 1) >= 100),
                "sum {} out of tolerance",
                sum
            );
        }
    }
}
