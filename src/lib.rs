//! page_profiler library: single-page structural and SEO profiling
//!
//! This library fetches one web page, falling back through several identity
//! profiles when the site blocks the request, and builds a structured
//! description of it: headings, links, images, tables, structured data,
//! content classification, and readability and SEO scores. The result is
//! serialized into named CSV artifacts.
//!
//! # Example
//!
//! ```no_run
//! use page_profiler::{run_scrape, write_artifacts, LogProgress, ScrapeConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScrapeConfig {
//!     max_links: 100,
//!     ..Default::default()
//! };
//!
//! let output = run_scrape("example.com", &config, &LogProgress, &CancellationToken::new()).await?;
//! println!("{} scored {}/100", output.result.final_url, output.result.seo_score);
//! write_artifacts(std::path::Path::new("./out"), &output.artifacts)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod models;
pub mod parse;
mod run;
pub mod score;
pub mod utils;

// Re-export public API
pub use config::{LogFormat, LogLevel, Opt, ScrapeConfig};
pub use error_handling::{
    AttemptFailure, ConfigError, DiagnosticEntry, Diagnostics, ErrorKind, ExportError,
    ExtractionSection, InitializationError, ScrapeError,
};
pub use export::{build_artifacts, write_artifacts, Artifacts};
pub use fetch::{IdentityProfile, RetryPolicy};
pub use models::ScrapeResult;
pub use run::{run_scrape, LogProgress, NoopProgress, ProgressSink, ScrapeOutput};
