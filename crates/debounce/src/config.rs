//! Serializable debounce settings

use crate::{DebounceError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Debounce configuration
///
/// `quiet_period_ms` is signed so a negative value coming from a config
/// file is rejected instead of silently wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Quiet period in milliseconds (default: 300)
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: i64,
}

impl DebounceConfig {
    /// Build a config from a raw millisecond count
    pub fn from_millis(quiet_period_ms: i64) -> Result<Self> {
        let config = Self { quiet_period_ms };
        config.quiet_period()?;
        Ok(config)
    }

    /// Quiet period as a `Duration`
    ///
    /// Negative values are rejected, not clamped to zero.
    pub fn quiet_period(&self) -> Result<Duration> {
        u64::try_from(self.quiet_period_ms)
            .map(Duration::from_millis)
            .map_err(|_| DebounceError::NegativeQuietPeriod(self.quiet_period_ms))
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: default_quiet_period_ms(),
        }
    }
}

fn default_quiet_period_ms() -> i64 {
    300
}
