//! Shared utilities.
//!
//! This module provides:
//! - Text normalization and truncation
//! - URL validation and resolution
//! - Message sanitization for diagnostics
//! - CSS selector and regex construction helpers

mod normalize;
mod sanitize;
mod selector;
mod url;

pub use normalize::{collapse_whitespace, normalize, truncate_with_marker, truncate_within};
pub use sanitize::{sanitize_message, truncate_message};
pub use selector::{compile_regex_unsafe, parse_selector_unsafe, parse_selector_with_fallback};
pub use url::{comparable_host, resolve_url, validate_and_normalize_url};
