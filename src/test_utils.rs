use crate::scheduler::SchedulingState;
use chrono::{DateTime, Utc};
use proptest::prelude::*;

/// Generates an arbitrary DateTime<Utc> within 2020-01-01 to 2030-01-01
pub fn arb_datetime_utc() -> impl Strategy<Value = DateTime<Utc>> {
    (1_577_836_800i64..1_893_456_000i64)
        .prop_map(|ts| DateTime::from_timestamp(ts, 0).unwrap())
}

/// Generates an optional arbitrary DateTime<Utc>
pub fn arb_optional_datetime_utc() -> impl Strategy<Value = Option<DateTime<Utc>>> {
    prop_oneof![Just(None), arb_datetime_utc().prop_map(Some),]
}

/// Generates a valid quality rating in [0, 5]
pub fn arb_quality() -> impl Strategy<Value = i32> {
    0i32..=5i32
}

/// Generates a failing quality rating in [0, 2]
pub fn arb_failing_quality() -> impl Strategy<Value = i32> {
    0i32..=2i32
}

/// Generates a passing quality rating in [3, 5]
pub fn arb_passing_quality() -> impl Strategy<Value = i32> {
    3i32..=5i32
}

/// Generates an invalid quality rating outside [0, 5]
pub fn arb_invalid_quality() -> impl Strategy<Value = i32> {
    prop_oneof![(i32::MIN..0i32), (6i32..=i32::MAX),]
}

/// Generates a valid ease factor in [1.3, 4.0]
///
/// Uses integer-then-divide so the exact 1.3 floor is reachable without
/// floating point boundary issues.
pub fn arb_ease_factor() -> impl Strategy<Value = f64> {
    (130u32..=400u32).prop_map(|v| v as f64 / 100.0)
}

/// Generates a valid interval in days, 0 to roughly ten years
pub fn arb_interval() -> impl Strategy<Value = i32> {
    0i32..=3650i32
}

/// Generates a valid repetition count
pub fn arb_repetitions() -> impl Strategy<Value = i32> {
    0i32..=100i32
}

/// Generates a well-formed scheduling state
pub fn arb_scheduling_state() -> impl Strategy<Value = SchedulingState> {
    (arb_ease_factor(), arb_interval(), arb_repetitions()).prop_map(
        |(ease_factor, interval, repetitions)| SchedulingState {
            ease_factor,
            interval,
            repetitions,
        },
    )
}
