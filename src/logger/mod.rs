//! Explicitly injected logging built on `tracing`.
//! See `bin/logger_demo.rs` for a binary demonstrating its usage.

mod logger;
pub use logger::*;

pub use crate::log_event;
