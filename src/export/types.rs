//! Artifact types.

use std::collections::BTreeMap;

/// Named CSV artifacts, each a complete document with its header row.
///
/// Keys are file stems such as `main_summary` or `table_3`.
pub type Artifacts = BTreeMap<String, String>;

/// Artifacts present for every successful scrape.
pub const ALWAYS_PRESENT_ARTIFACTS: &[&str] = &["main_summary", "performance_metrics"];
