//! Output directory lifecycle.
//!
//! Cleaning is shallow on purpose: only files directly inside a directory are
//! removed, so nested output (for example a `types/` declaration dir inside
//! `dist/`) survives a rebuild of the parent.

use std::io;
use std::path::Path;

use tokio::fs;

use crate::{Error, Result};

fn write_error(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
    move |source| Error::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Make sure `dir` exists and holds no files.
///
/// If the directory exists, every file directly inside it is deleted and
/// subdirectories are left untouched. Otherwise it is created recursively.
///
/// Returns `true` when the directory was created by this call.
///
/// # Errors
///
/// Returns an error if the path exists but is not a directory, or if a
/// filesystem operation fails.
pub async fn ensure_clean(dir: impl AsRef<Path>) -> Result<bool> {
    let dir = dir.as_ref();
    match fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => {
            clean_dir(dir).await?;
            Ok(false)
        }
        Ok(_) => Err(not_a_directory(dir)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).await.map_err(write_error(dir))?;
            tracing::debug!("Created output directory {}", dir.display());
            Ok(true)
        }
        Err(e) => Err(write_error(dir)(e)),
    }
}

/// Delete every file directly inside `dir`, leaving subdirectories alone.
pub async fn clean_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    let mut entries = fs::read_dir(dir).await.map_err(|source| Error::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut removed = 0usize;
    while let Some(entry) = entries.next_entry().await? {
        let file_type = entry.file_type().await?;
        if file_type.is_dir() {
            continue;
        }
        let path = entry.path();
        fs::remove_file(&path).await.map_err(write_error(&path))?;
        removed += 1;
    }

    tracing::debug!("Removed {} file(s) from {}", removed, dir.display());
    Ok(())
}

/// Create `dir` recursively if it does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but is not a directory.
pub async fn ensure_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    match fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(not_a_directory(dir)),
        Err(_) => fs::create_dir_all(dir).await.map_err(write_error(dir)),
    }
}

/// Remove `dir` and everything in it, logging instead of failing.
pub async fn remove_dir_best_effort(dir: impl AsRef<Path>) {
    let dir = dir.as_ref();
    match fs::remove_dir_all(dir).await {
        Ok(()) => tracing::debug!("Removed {}", dir.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove {}: {}", dir.display(), e),
    }
}

fn not_a_directory(path: &Path) -> Error {
    Error::InvalidConfig(format!(
        "Output path exists but is not a directory: {}",
        path.display()
    ))
}
