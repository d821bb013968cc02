//! Error handling and extraction diagnostics.
//!
//! This module provides:
//! - The `ScrapeError` channel and its `ErrorKind` categories
//! - Initialization and configuration errors
//! - Transport error categorization for fetch attempts
//! - The per-invocation `Diagnostics` collector
//!
//! Failures are split into:
//! - **Errors**: abort the invocation (`ScrapeError`)
//! - **Warnings**: a sub-extraction lost some data but the run continues (`Diagnostics`)

mod categorization;
mod diagnostics;
mod types;

// Re-export public API
pub use categorization::transport_reason;
pub use diagnostics::{DiagnosticEntry, Diagnostics, ExtractionSection};
pub use types::{
    AttemptFailure, ConfigError, ErrorKind, ExportError, InitializationError, ScrapeError,
};
