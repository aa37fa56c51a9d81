//! Shared helpers for command implementations.

use crate::error::{BuildError, CliError, Result};
use crate::ui::SummaryEntry;
use std::path::{Path, PathBuf};

/// Resolve `path` against `cwd` unless it is already absolute.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Current working directory as a CLI error.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Custom(format!("Failed to read the current directory: {}", e))
    })
}

/// Validate that an entry or index file exists.
///
/// # Errors
///
/// Returns `BuildError::EntryNotFound` if the file doesn't exist.
pub fn validate_entry(entry: &Path) -> Result<()> {
    if !entry.exists() {
        return Err(BuildError::EntryNotFound(entry.to_path_buf()).into());
    }

    if !entry.is_file() {
        return Err(CliError::InvalidArgument(format!(
            "Entry point is not a file: {}",
            entry.display()
        )));
    }

    Ok(())
}

/// Validate that a file to merge exists.
pub fn validate_other(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(BuildError::OtherFileNotFound(path.to_path_buf()).into());
    }
    Ok(())
}

/// An output directory may be missing but must not be a file.
pub fn validate_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(BuildError::OutputNotWritable(dir.to_path_buf()).into());
    }
    Ok(())
}

/// Path shown in the summary: relative to `cwd` when possible.
pub fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Summary rows for written files, sized from disk.
pub async fn summary_entries(format: &str, files: &[PathBuf], cwd: &Path) -> Vec<SummaryEntry> {
    let mut entries = Vec::with_capacity(files.len());
    for file in files {
        let size = match tokio::fs::metadata(file).await {
            Ok(meta) => meta.len(),
            Err(e) => {
                tracing::debug!(path = %file.display(), error = %e, "could not stat output file");
                0
            }
        };
        entries.push(SummaryEntry {
            format: format.to_string(),
            name: display_path(file, cwd),
            size,
        });
    }
    entries
}
