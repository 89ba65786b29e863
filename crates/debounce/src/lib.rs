//! Trailing-edge debouncing for LivestockHub
//!
//! This crate provides:
//! - A debounced invoker that collapses bursts of triggers into one call
//! - Latest-argument capture (earlier arguments in a burst are dropped)
//! - Explicit cancel/flush and cancel-on-drop disposal
//! - A pluggable timer host (tokio-backed by default)

pub mod config;
pub mod error;
pub mod invoker;
pub mod timer;

// Re-exports
pub use config::DebounceConfig;
pub use error::DebounceError;
pub use invoker::{DebounceStats, Debouncer};
pub use timer::{TimerHost, TokioTimer};

use std::time::Duration;

/// Result type for debounce operations
pub type Result<T> = std::result::Result<T, DebounceError>;

/// Wrap `action` so that triggers within `quiet_period` of each other
/// collapse into a single trailing call with the latest arguments.
///
/// Must be called from inside a tokio runtime.
pub fn debounce<A, F>(action: F, quiet_period: Duration) -> Result<Debouncer<A>>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Ok(Debouncer::with_host(action, quiet_period, TokioTimer::current()?))
}
