//! Storefront configuration
//!
//! Loaded from TOML. Every field has a default, so a partial (or empty)
//! file is valid. Values are range-checked by [`StorefrontConfig::validate`].

use crate::{Result, StorefrontError};
use debounce::DebounceConfig;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

pub const DEBOUNCE_MS_RANGE: RangeInclusive<i64> = 0..=10_000;
pub const MIN_CHARS_RANGE: RangeInclusive<usize> = 0..=64;
pub const AUTO_DISMISS_MS_RANGE: RangeInclusive<i64> = 500..=600_000;
pub const MAX_VISIBLE_RANGE: RangeInclusive<usize> = 1..=50;
pub const MAX_CURRENCY_LEN: usize = 8;

/// Top-level storefront configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub price: PriceConfig,
}

/// Search input settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a query is emitted (default: 300ms)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: i64,

    /// Shortest non-empty query worth emitting (default: 2)
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

/// Notification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Auto-dismiss delay (default: 5000ms)
    #[serde(default = "default_auto_dismiss_ms")]
    pub auto_dismiss_ms: i64,

    /// Oldest notifications are dropped beyond this many (default: 5)
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
}

/// Price display settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceConfig {
    /// Currency code prefixed to amounts (default: RWF)
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl StorefrontConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value against its allowed range
    pub fn validate(&self) -> Result<()> {
        check_range("search.debounce_ms", self.search.debounce_ms, &DEBOUNCE_MS_RANGE)?;
        check_range("search.min_chars", self.search.min_chars, &MIN_CHARS_RANGE)?;
        check_range(
            "notifications.auto_dismiss_ms",
            self.notifications.auto_dismiss_ms,
            &AUTO_DISMISS_MS_RANGE,
        )?;
        check_range(
            "notifications.max_visible",
            self.notifications.max_visible,
            &MAX_VISIBLE_RANGE,
        )?;

        let currency = self.price.currency.trim();
        if currency.is_empty() || currency.chars().count() > MAX_CURRENCY_LEN {
            return Err(StorefrontError::InvalidConfig {
                key: "price.currency",
                reason: format!("must be 1-{} characters", MAX_CURRENCY_LEN),
            });
        }

        Ok(())
    }
}

impl SearchConfig {
    /// Debounce settings for the search input
    pub fn debounce(&self) -> DebounceConfig {
        DebounceConfig {
            quiet_period_ms: self.debounce_ms,
        }
    }
}

impl NotificationConfig {
    /// Auto-dismiss delay as a `Duration`
    pub fn auto_dismiss(&self) -> Result<Duration> {
        u64::try_from(self.auto_dismiss_ms)
            .map(Duration::from_millis)
            .map_err(|_| StorefrontError::InvalidConfig {
                key: "notifications.auto_dismiss_ms",
                reason: "must be non-negative".to_string(),
            })
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_chars: default_min_chars(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            auto_dismiss_ms: default_auto_dismiss_ms(),
            max_visible: default_max_visible(),
        }
    }
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

fn check_range<T>(key: &'static str, value: T, range: &RangeInclusive<T>) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(StorefrontError::InvalidConfig {
            key,
            reason: format!(
                "{} is outside {}-{}",
                value,
                range.start(),
                range.end()
            ),
        })
    }
}

fn default_debounce_ms() -> i64 {
    300
}

fn default_min_chars() -> usize {
    2
}

fn default_auto_dismiss_ms() -> i64 {
    5000
}

fn default_max_visible() -> usize {
    5
}

fn default_currency() -> String {
    "RWF".to_string()
}

/// Annotated example configuration
pub fn example_config() -> &'static str {
    r#"# LivestockHub storefront configuration

[search]
# Quiet period before a search query is sent (0-10000 ms)
debounce_ms = 300
# Shortest non-empty query worth sending (0-64)
min_chars = 2

[notifications]
# How long a notification stays visible (500-600000 ms)
auto_dismiss_ms = 5000
# Oldest notifications are dropped beyond this many (1-50)
max_visible = 5

[price]
# Currency code shown in price labels
currency = "RWF"
"#
}
