//! Library side of the `lhub` CLI
//!
//! Kept separate from `main.rs` so the integration tests can drive the
//! keystroke replay and config handling directly.

pub mod keystrokes;
pub mod system_config;
