//! Debounce configuration errors

use thiserror::Error;

/// Errors reported synchronously when building a debounced invoker
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DebounceError {
    /// Quiet period given as a negative millisecond count
    #[error("quiet period must be non-negative, got {0}ms")]
    NegativeQuietPeriod(i64),

    /// No tokio runtime to schedule timers on
    #[error("no tokio runtime available for the debounce timer")]
    NoRuntime,
}
