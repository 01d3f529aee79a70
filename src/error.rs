//! Error type shared by the countdown operations.

use std::time::Duration;

/// Errors reported by [`crate::countdown::Model`] operations.
///
/// Every failing operation leaves the widget exactly as it was before the
/// call: no registration is cancelled, no display value changes.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    /// `start` was called with an initial value of zero, which has no
    /// meaningful progress step.
    #[error("initial value must be greater than zero")]
    InvalidInitialValue,
    /// `start` was called with a zero tick interval.
    #[error("tick interval must be non-zero, got {0:?}")]
    InvalidInterval(Duration),
    /// `accelerate` was called with a multiplier that is not a finite
    /// positive number, or whose product with the current interval is not a
    /// usable non-zero duration.
    #[error("invalid acceleration multiplier {0}")]
    InvalidMultiplier(f64),
    /// `accelerate` was called while no countdown is running.
    #[error("countdown is not running")]
    NotRunning,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
