//! Pure SM-2-derived scheduling.
//!
//! `next_state` computes a card's next scheduling state from a review
//! outcome. It performs no I/O, touches no clock and is bit-for-bit
//! reproducible for identical inputs; persistence of the result is the
//! session layer's job.

use crate::errors::EngineError;
use serde::{Deserialize, Serialize};

/// Ease factor assigned to newly created cards
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Lower bound on the ease factor
///
/// The floor is load-bearing: it is the only mechanism preventing runaway
/// deceleration for weak cards, and applies on failures too.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Interval in days after the first consecutive success
const FIRST_SUCCESS_INTERVAL: i32 = 1;

/// Interval in days after the second consecutive success
const SECOND_SUCCESS_INTERVAL: i32 = 6;

/// Quality ratings below this count as failed recall
const SUCCESS_THRESHOLD: i32 = 3;

/// A card's scheduling state, as consumed and produced by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulingState {
    /// Multiplier controlling how fast intervals grow; never below 1.3
    pub ease_factor: f64,

    /// Days until the next scheduled review; 0 means review immediately
    pub interval: i32,

    /// Consecutive successful reviews since the last failure reset
    pub repetitions: i32,
}

impl SchedulingState {
    /// The state assigned to a card that has never been reviewed
    pub fn initial() -> Self {
        Self {
            ease_factor: INITIAL_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
        }
    }
}

/// Computes the next scheduling state for a card from one review outcome
///
/// The update rule, derived from SM-2:
///
/// 1. The ease factor moves by `0.1 - (5 - q)(0.08 + (5 - q) * 0.02)` and
///    is clamped to at least 1.3. This happens for every rating, so a
///    failed recall still lowers the ease even though the repetition
///    count resets.
/// 2. `quality < 3` resets: repetitions and interval both go to 0.
/// 3. `quality >= 3` increments repetitions; the interval is 1 day after
///    the first success and 6 days after the second, regardless of the
///    incoming interval. From the third success on it is the incoming
///    interval times the new ease factor, rounded half away from zero.
///
/// ### Arguments
///
/// * `quality` - Self-assessed recall quality, 0-5
/// * `state` - The card's current scheduling state
///
/// ### Returns
///
/// The new scheduling state
///
/// ### Errors
///
/// Returns `EngineError::InvalidQuality` if `quality` is outside 0-5.
/// Out-of-range quality is rejected rather than clamped so a buggy caller
/// can never produce an unbounded ease-factor swing.
pub fn next_state(quality: i32, state: SchedulingState) -> Result<SchedulingState, EngineError> {
    if !(0..=5).contains(&quality) {
        return Err(EngineError::InvalidQuality(quality));
    }

    let q = quality as f64;
    let candidate = state.ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
    let ease_factor = candidate.max(MIN_EASE_FACTOR);

    if quality < SUCCESS_THRESHOLD {
        // Failed recall: reset progress, keep the lowered ease
        return Ok(SchedulingState {
            ease_factor,
            interval: 0,
            repetitions: 0,
        });
    }

    let repetitions = state.repetitions + 1;
    let interval = match repetitions {
        1 => FIRST_SUCCESS_INTERVAL,
        2 => SECOND_SUCCESS_INTERVAL,
        // f64::round is half-away-from-zero, which the long-run intervals
        // depend on; do not swap in a banker's rounding here.
        _ => (state.interval as f64 * ease_factor).round() as i32,
    };

    Ok(SchedulingState {
        ease_factor,
        interval,
        repetitions,
    })
}

#[cfg(test)]
mod prop_tests;
