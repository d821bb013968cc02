//! Configuration types and CLI options.
//!
//! This module defines the library configuration (`ScrapeConfig`) and the
//! command-line options the binary parses into it.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_MAX_IDENTITY_PROFILE_ATTEMPTS, DEFAULT_MAX_IMAGES, DEFAULT_MAX_LINKS,
    DEFAULT_MAX_TABLES, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TEXT_CONTENT_MAX_CHARS,
};
use crate::error_handling::ConfigError;
use crate::fetch::RetryPolicy;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: One JSON object per line
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration for a single scrape.
///
/// Plain data with no CLI dependencies; construct it directly or start from
/// `Default`.
///
/// # Examples
///
/// ```no_run
/// use page_profiler::ScrapeConfig;
///
/// let config = ScrapeConfig {
///     max_links: 100,
///     request_timeout_seconds: 10,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,

    /// How many identity profiles the fetcher may try
    pub max_identity_profile_attempts: usize,

    /// Cap on extracted link records
    pub max_links: usize,

    /// Cap on extracted image records
    pub max_images: usize,

    /// Cap on extracted tables
    pub max_tables: usize,

    /// Cap on `ScrapeResult::text_content` length, in characters
    pub text_content_max_chars: usize,

    /// Delays and identity profiles used by the fetcher
    pub retry_policy: RetryPolicy,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_identity_profile_attempts: DEFAULT_MAX_IDENTITY_PROFILE_ATTEMPTS,
            max_links: DEFAULT_MAX_LINKS,
            max_images: DEFAULT_MAX_IMAGES,
            max_tables: DEFAULT_MAX_TABLES,
            text_content_max_chars: DEFAULT_TEXT_CONTENT_MAX_CHARS,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl ScrapeConfig {
    /// Rejects zero timeouts and zero caps.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("request_timeout_seconds", self.request_timeout_seconds as usize),
            (
                "max_identity_profile_attempts",
                self.max_identity_profile_attempts,
            ),
            ("max_links", self.max_links),
            ("max_images", self.max_images),
            ("max_tables", self.max_tables),
            ("text_content_max_chars", self.text_content_max_chars),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(ConfigError::ZeroValue(field));
            }
        }
        if self.retry_policy.profiles.is_empty() {
            return Err(ConfigError::NoIdentityProfiles);
        }
        Ok(())
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Profile a page and write CSV artifacts to ./out
/// page_profiler example.com
///
/// # Custom output directory, tighter caps, JSON logs
/// page_profiler https://example.com --output-dir ./reports --max-links 100 --log-format json
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "page_profiler",
    about = "Fetches one web page and writes its structural and SEO profile as CSV files."
)]
pub struct Opt {
    /// Page URL (scheme optional, https is assumed)
    #[arg(value_parser)]
    pub url: String,

    /// Directory the CSV artifacts are written to
    #[arg(long, value_parser, default_value = "./out")]
    pub output_dir: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Number of identity profiles to try when the site blocks the request
    #[arg(long, default_value_t = DEFAULT_MAX_IDENTITY_PROFILE_ATTEMPTS)]
    pub max_attempts: usize,

    /// Maximum links extracted
    #[arg(long, default_value_t = DEFAULT_MAX_LINKS)]
    pub max_links: usize,

    /// Maximum images extracted
    #[arg(long, default_value_t = DEFAULT_MAX_IMAGES)]
    pub max_images: usize,

    /// Maximum tables extracted
    #[arg(long, default_value_t = DEFAULT_MAX_TABLES)]
    pub max_tables: usize,

    /// Maximum characters kept from the page text
    #[arg(long, default_value_t = DEFAULT_TEXT_CONTENT_MAX_CHARS)]
    pub text_max_chars: usize,
}

impl From<&Opt> for ScrapeConfig {
    fn from(opt: &Opt) -> Self {
        Self {
            request_timeout_seconds: opt.timeout_seconds,
            max_identity_profile_attempts: opt.max_attempts,
            max_links: opt.max_links,
            max_images: opt.max_images,
            max_tables: opt.max_tables,
            text_content_max_chars: opt.text_max_chars,
            retry_policy: RetryPolicy::default(),
        }
    }
}
