//! CLI command implementations

pub mod clamp;
pub mod config;
pub mod price;
pub mod search;
pub mod status;
