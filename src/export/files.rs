//! Writes artifacts to disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error_handling::ExportError;

use super::types::Artifacts;

/// Writes each artifact to `<dir>/<name>.csv`, creating `dir` if needed.
///
/// Existing files with the same names are overwritten. Returns the written
/// paths in artifact-name order.
pub fn write_artifacts(dir: &Path, artifacts: &Artifacts) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(artifacts.len());
    for (name, csv) in artifacts {
        let path = dir.join(format!("{name}.csv"));
        fs::write(&path, csv).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        log::debug!("wrote {} ({} bytes)", path.display(), csv.len());
        written.push(path);
    }
    Ok(written)
}
