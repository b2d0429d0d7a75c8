//! Game rules for memory matching.
//!
//! Pure functions over counts and symbols, kept apart from session state so
//! the controller and the invariants can share them.

pub mod matching;
pub mod scoring;

pub use matching::{is_complete, is_match};
pub use scoring::StarPolicy;

use derive_getters::Getters;
use derive_new::new;
use std::time::Duration;

/// Tuning constants for a session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct SessionRules {
    /// How long a mismatched pair stays face up.
    mismatch_delay: Duration,
    /// Clock sampling interval.
    clock_tick: Duration,
    /// Star thresholds.
    stars: StarPolicy,
}

impl Default for SessionRules {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(800),
            Duration::from_millis(10),
            StarPolicy::default(),
        )
    }
}
