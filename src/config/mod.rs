//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, caps, truncation lengths)
//! - HTTP header name constants
//! - The `ScrapeConfig` library configuration and CLI option types

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{LogFormat, LogLevel, Opt, ScrapeConfig};
