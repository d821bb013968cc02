//! Error type definitions.
//!
//! This module defines the scrape error channel, its kind taxonomy, and the
//! errors raised while setting up logging and configuration.

use std::fmt;
use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error building the HTTP client for an identity profile.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Rejected `ScrapeConfig` values.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A timeout or cap was zero.
    #[error("configuration field `{0}` must be greater than zero")]
    ZeroValue(&'static str),

    /// The retry policy lists no identity profiles.
    #[error("retry policy must contain at least one identity profile")]
    NoIdentityProfiles,
}

/// Failures while serializing or writing artifacts.
#[derive(Error, Debug)]
pub enum ExportError {
    /// A record could not be serialized.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// The in-memory CSV buffer could not be flushed.
    #[error("CSV buffer flush failed: {0}")]
    Flush(String),

    /// Serialized bytes were not UTF-8.
    #[error("artifact is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// An artifact file or the output directory could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// File or directory being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// One failed fetch attempt: which identity profile was used and why it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptFailure {
    /// Identity profile name
    pub profile: String,
    /// Short reason, e.g. `HTTP 403` or `timeout: ...`
    pub reason: String,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.profile, self.reason)
    }
}

fn format_attempts(attempts: &[AttemptFailure]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure of a whole scrape invocation.
///
/// Sub-extraction problems never surface here; they are recorded in
/// [`Diagnostics`](super::Diagnostics) on the result instead.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Every identity profile failed and the last failure was at the transport level.
    #[error("could not reach {url} (attempts: {})", format_attempts(.attempts))]
    FetchTransport {
        /// Requested URL
        url: String,
        /// Every attempt made, in order
        attempts: Vec<AttemptFailure>,
    },

    /// The server answered with a status other than 200.
    #[error("HTTP {status} from {url} (attempts: {})", format_attempts(.attempts))]
    FetchHttp {
        /// Requested URL
        url: String,
        /// Last status received
        status: u16,
        /// Every attempt made, in order
        attempts: Vec<AttemptFailure>,
    },

    /// The response was not HTML.
    #[error("unsupported content type `{content_type}` from {url}")]
    InvalidContentType {
        /// Final URL
        url: String,
        /// `Content-Type` as received (empty when absent)
        content_type: String,
    },

    /// The page title looks like a block or error page.
    #[error("error page detected at {url} (title: `{title}`)")]
    ErrorPageDetected {
        /// Final URL
        url: String,
        /// Page title
        title: String,
    },

    /// The body could not be turned into a document.
    #[error("could not parse document: {0}")]
    Parse(String),

    /// The input URL is malformed or not http(s).
    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl {
        /// Input as given
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The configuration was rejected before any request was made.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// An HTTP client could not be built.
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// The caller cancelled the invocation.
    #[error("scrape cancelled")]
    Cancelled,
}

impl ScrapeError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScrapeError::FetchTransport { .. } => ErrorKind::FetchTransport,
            ScrapeError::FetchHttp { .. } => ErrorKind::FetchHttp,
            ScrapeError::InvalidContentType { .. } => ErrorKind::InvalidContentType,
            ScrapeError::ErrorPageDetected { .. } => ErrorKind::ErrorPageDetected,
            ScrapeError::Parse(_) => ErrorKind::Parse,
            ScrapeError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            ScrapeError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            ScrapeError::Initialization(_) => ErrorKind::Initialization,
            ScrapeError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Attempts recorded by the fetcher, empty for non-fetch errors.
    pub fn attempts(&self) -> &[AttemptFailure] {
        match self {
            ScrapeError::FetchTransport { attempts, .. }
            | ScrapeError::FetchHttp { attempts, .. } => attempts,
            _ => &[],
        }
    }
}

/// Categories of scrape failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize)]
pub enum ErrorKind {
    FetchTransport,
    FetchHttp,
    InvalidContentType,
    ErrorPageDetected,
    Parse,
    InvalidUrl,
    InvalidConfig,
    Initialization,
    Cancelled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::FetchTransport => "Fetch transport error",
            ErrorKind::FetchHttp => "Fetch HTTP status error",
            ErrorKind::InvalidContentType => "Invalid content type",
            ErrorKind::ErrorPageDetected => "Error page detected",
            ErrorKind::Parse => "Parse error",
            ErrorKind::InvalidUrl => "Invalid URL",
            ErrorKind::InvalidConfig => "Invalid configuration",
            ErrorKind::Initialization => "Initialization error",
            ErrorKind::Cancelled => "Cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::FetchHttp.as_str(), "Fetch HTTP status error");
        assert_eq!(ErrorKind::Cancelled.to_string(), "Cancelled");
    }

    #[test]
    fn test_all_error_kinds_have_string_representation() {
        for kind in ErrorKind::iter() {
            assert!(!kind.as_str().is_empty(), "{:?} should have non-empty string", kind);
        }
    }

    #[test]
    fn test_fetch_http_message_names_every_profile() {
        let err = ScrapeError::FetchHttp {
            url: "https://example.com/".to_string(),
            status: 403,
            attempts: vec![
                AttemptFailure {
                    profile: "chrome-desktop".to_string(),
                    reason: "HTTP 403".to_string(),
                },
                AttemptFailure {
                    profile: "safari-mac".to_string(),
                    reason: "HTTP 403".to_string(),
                },
            ],
        };
        let message = err.to_string();
        assert!(message.contains("HTTP 403 from https://example.com/"));
        assert!(message.contains("chrome-desktop: HTTP 403"));
        assert!(message.contains("safari-mac: HTTP 403"));
        assert_eq!(err.kind(), ErrorKind::FetchHttp);
        assert_eq!(err.attempts().len(), 2);
    }

    #[test]
    fn test_config_error_converts() {
        let err: ScrapeError = ConfigError::ZeroValue("max_links").into();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        assert!(err.to_string().contains("max_links"));
        assert!(err.attempts().is_empty());
    }
}
