//! Source file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};

/// List entries of `directory` whose name ends with `suffix`.
///
/// A missing directory yields an empty list. Order is whatever the
/// directory listing returns; callers must not rely on it.
pub fn list_source_files(directory: &Path, suffix: &str) -> PipelineResult<Vec<PathBuf>> {
    if !directory.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(directory).map_err(|source| PipelineError::Discovery {
        directory: directory.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name();
        if name.to_string_lossy().ends_with(suffix) {
            files.push(entry.path());
        }
    }
    Ok(files)
}
