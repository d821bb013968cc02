//! The scrape pipeline.
//!
//! Stages run strictly in sequence: validate, fetch, parse, extract, score,
//! serialize. Cancellation is checked between stages.

mod extract;
mod progress;

use std::time::Instant;

use log::info;
use tokio_util::sync::CancellationToken;

use crate::config::ScrapeConfig;
use crate::error_handling::ScrapeError;
use crate::export::{build_artifacts, Artifacts};
use crate::fetch::{check_error_page, fetch};
use crate::models::ScrapeResult;
use crate::parse::ParsedDocument;
use crate::score::{calculate_seo_score, SeoInputs};
use crate::utils::validate_and_normalize_url;

pub use progress::{LogProgress, NoopProgress, ProgressSink};

/// What a successful scrape returns.
#[derive(Debug, Clone)]
pub struct ScrapeOutput {
    /// Everything extracted from the page
    pub result: ScrapeResult,
    /// CSV artifacts built from `result`
    pub artifacts: Artifacts,
}

fn ensure_not_cancelled(cancel: &CancellationToken) -> Result<(), ScrapeError> {
    if cancel.is_cancelled() {
        Err(ScrapeError::Cancelled)
    } else {
        Ok(())
    }
}

/// Fetches `url` and profiles the page.
///
/// A scheme-less `url` is treated as `https://`. Progress is reported at 10,
/// 30 and 50 by the fetcher, then at 70 (extracted), 90 (serialized) and 100.
///
/// # Errors
///
/// Any [`ScrapeError`]. Extraction problems never fail the scrape; they are
/// recorded in `result.diagnostics`.
///
/// # Examples
///
/// ```no_run
/// use page_profiler::{run_scrape, NoopProgress, ScrapeConfig};
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let output = run_scrape(
///     "example.com",
///     &ScrapeConfig::default(),
///     &NoopProgress,
///     &CancellationToken::new(),
/// )
/// .await?;
/// println!("SEO score {}", output.result.seo_score);
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(
    url: &str,
    config: &ScrapeConfig,
    progress: &dyn ProgressSink,
    cancel: &CancellationToken,
) -> Result<ScrapeOutput, ScrapeError> {
    let start = Instant::now();
    config.validate()?;
    let url = validate_and_normalize_url(url)?;
    ensure_not_cancelled(cancel)?;

    let fetched = fetch(&url, config, progress, cancel).await?;

    let document = ParsedDocument::parse(&fetched.text(), fetched.final_url.clone())?;
    check_error_page(fetched.final_url.as_str(), document.title().as_deref())?;
    ensure_not_cancelled(cancel)?;

    let mut result = extract::extract_result(url.as_str(), &fetched, &document, config);
    progress.on_progress(70, "Content extracted");
    ensure_not_cancelled(cancel)?;

    result.seo_score = calculate_seo_score(&SeoInputs::from_profile(&result.seo, result.word_count));
    let artifacts = build_artifacts(&result);
    progress.on_progress(90, &format!("{} artifacts built", artifacts.len()));

    let elapsed = start.elapsed().as_secs_f64();
    info!(
        "Profiled {} in {:.2}s (SEO score {}, {} warnings)",
        result.final_url,
        elapsed,
        result.seo_score,
        result.diagnostics.total()
    );
    progress.on_progress(100, &format!("Done in {elapsed:.2}s"));

    Ok(ScrapeOutput { result, artifacts })
}
