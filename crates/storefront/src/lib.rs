//! Interactive storefront behaviours for LivestockHub
//!
//! This crate provides:
//! - Debounced product search input
//! - Quantity clamping against stock bounds
//! - Price-range labels
//! - Order status flow with non-blocking confirmation
//! - Auto-dismissing notifications
//! - Explicit listener wiring with disposal handles

pub mod config;
pub mod confirm;
pub mod error;
pub mod events;
pub mod notify;
pub mod order_status;
pub mod price;
pub mod quantity;
pub mod search;
pub mod wiring;

// Re-exports
pub use config::StorefrontConfig;
pub use confirm::{confirmation, ConfirmationRequest, Decision, PendingDecision};
pub use error::StorefrontError;
pub use events::{EventKind, EventRoot, ListenerHandle, UiEvent};
pub use notify::{Notification, NotificationKind, Notifier};
pub use order_status::OrderStatus;
pub use price::{PlainFormatter, Price, PriceFormatter, PriceRange};
pub use quantity::QuantityBounds;
pub use search::SearchBox;
pub use wiring::{init, UiEffect, Wiring};

/// Result type for storefront operations
pub type Result<T> = std::result::Result<T, StorefrontError>;
