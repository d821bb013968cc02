//! CSV artifacts for a scrape.
//!
//! `build_artifacts` turns a `ScrapeResult` into named CSV documents held in
//! memory. `write_artifacts` writes them to a directory without changing them.

mod artifacts;
mod files;
mod types;
mod writer;

pub use artifacts::build_artifacts;
pub use files::write_artifacts;
pub use types::{Artifacts, ALWAYS_PRESENT_ARTIFACTS};
