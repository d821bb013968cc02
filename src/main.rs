//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `page_profiler` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Ctrl-C cancellation
//! - Writing artifacts and user-facing output
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use page_profiler::initialization::init_logger_with;
use page_profiler::{run_scrape, write_artifacts, LogProgress, Opt, ScrapeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = ScrapeConfig::from(&opt);

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling scrape");
            ctrl_c_token.cancel();
        }
    });

    let output = match run_scrape(&opt.url, &config, &LogProgress, &cancel).await {
        Ok(output) => output,
        Err(e) => {
            eprintln!("page_profiler error ({}): {}", e.kind(), e);
            process::exit(1);
        }
    };

    let written = write_artifacts(&opt.output_dir, &output.artifacts).with_context(|| {
        format!("Failed to write artifacts to {}", opt.output_dir.display())
    })?;

    let result = &output.result;
    println!(
        "✅ Profiled {} - SEO score {}/100, {} heading{}, {} link{}, {} table{}",
        result.final_url,
        result.seo_score,
        result.headings.len(),
        if result.headings.len() == 1 { "" } else { "s" },
        result.links.len(),
        if result.links.len() == 1 { "" } else { "s" },
        result.tables.len(),
        if result.tables.len() == 1 { "" } else { "s" },
    );
    if !result.diagnostics.is_empty() {
        println!("{} extraction warning(s), see log for details", result.diagnostics.total());
    }
    println!(
        "{} artifact{} written to {}",
        written.len(),
        if written.len() == 1 { "" } else { "s" },
        opt.output_dir.display()
    );
    Ok(())
}
