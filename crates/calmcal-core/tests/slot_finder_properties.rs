//! Property tests for the slot finder.
//!
//! Whatever the calendar looks like, a returned slot must not overlap any
//! task on its day and must start inside the daytime window.

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use calmcal_core::{SlotFinder, StressLevel, Task};
use proptest::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 16, 0, 0, 0).unwrap()
}

fn arb_task() -> impl Strategy<Value = Task> {
    (0i64..6, 0i64..24, prop::sample::select(vec![0i64, 15, 30, 45]), 1u32..=24).prop_map(
        |(day, hour, minute, quarters)| {
            let start = base() + Duration::days(day) + Duration::hours(hour) + Duration::minutes(minute);
            Task::new("Busy", "Study", start, f64::from(quarters) * 0.25, StressLevel::Low)
        },
    )
}

fn arb_earliest() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..3, 0i64..24 * 60).prop_map(|(day, minutes)| {
        base() + Duration::days(day) + Duration::minutes(minutes)
    })
}

proptest! {
    #[test]
    fn slot_never_overlaps_existing_tasks(
        existing in prop::collection::vec(arb_task(), 0..20),
        half_hours in 1u32..=24,
        earliest in arb_earliest(),
    ) {
        let duration = f64::from(half_hours) * 0.5;
        let slot = SlotFinder::new()
            .find_next_available_slot(&existing, duration, earliest)
            .unwrap();

        for task in &existing {
            prop_assert!(!task.conflicts_with(slot, duration), "{slot} overlaps {}", task.start);
        }
    }

    #[test]
    fn slot_starts_inside_daytime_window(
        existing in prop::collection::vec(arb_task(), 0..20),
        half_hours in 1u32..=24,
        earliest in arb_earliest(),
    ) {
        let duration = f64::from(half_hours) * 0.5;
        let slot = SlotFinder::new()
            .find_next_available_slot(&existing, duration, earliest)
            .unwrap();

        prop_assert!((9..21).contains(&slot.hour()));
        prop_assert!(slot.date_naive() > earliest.date_naive());
    }

    #[test]
    fn chained_search_starts_no_earlier_than_candidate(
        existing in prop::collection::vec(arb_task(), 0..20),
        half_hours in 1u32..=8,
        candidate in arb_earliest(),
    ) {
        let duration = f64::from(half_hours) * 0.5;
        let slot = SlotFinder::new()
            .find_slot_from(&existing, duration, candidate)
            .unwrap();

        prop_assert!(slot >= candidate);
        prop_assert!((9..21).contains(&slot.hour()));
        prop_assert!(!SlotFinder::has_conflict(&existing, slot, duration));
    }
}
