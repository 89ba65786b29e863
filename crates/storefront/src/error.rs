//! Storefront error types

use debounce::DebounceError;
use thiserror::Error;

/// Errors raised while configuring storefront behaviours
///
/// Malformed user input never produces one of these; it is ignored.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("invalid quantity bounds: min {min} exceeds max {max}")]
    InvalidBounds { min: u32, max: u32 },

    #[error("product is out of stock")]
    OutOfStock,

    #[error("unknown order status: {0}")]
    UnknownStatus(String),

    #[error("unknown notification kind: {0}")]
    UnknownNotificationKind(String),

    #[error("invalid value for {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Debounce(#[from] DebounceError),
}
