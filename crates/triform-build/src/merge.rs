//! Merge several source files into one compilation unit.
//!
//! Other files come first, in the order given, and the index file closes the
//! unit. Leading lines can be dropped from any file (typically the imports of
//! sibling files that become redundant once everything lives in one module),
//! and `export` keywords can be stripped from other files so their symbols
//! become module-private.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::extension::strip_export_keywords;
use crate::fs::ensure_dir;
use crate::{Error, Result};

/// The file that anchors the merged unit. Its content is placed last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexFile {
    pub path: PathBuf,
    /// Number of leading lines to drop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<usize>,
}

/// A file merged before the index file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherFile {
    pub path: PathBuf,
    /// Number of leading lines to drop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<usize>,
    /// Strip every `export` keyword from this file.
    #[serde(default)]
    pub remove_export: bool,
}

impl IndexFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lines: None,
        }
    }

    pub fn lines(mut self, lines: usize) -> Self {
        self.lines = Some(lines);
        self
    }
}

impl OtherFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lines: None,
            remove_export: false,
        }
    }

    pub fn lines(mut self, lines: usize) -> Self {
        self.lines = Some(lines);
        self
    }

    pub fn remove_export(mut self, remove: bool) -> Self {
        self.remove_export = remove;
        self
    }
}

/// Inputs of a merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOptions {
    pub index_file: IndexFile,
    #[serde(default)]
    pub other_files: Vec<OtherFile>,
}

impl MergeOptions {
    pub fn new(index_file: IndexFile) -> Self {
        Self {
            index_file,
            other_files: Vec::new(),
        }
    }

    pub fn other(mut self, file: OtherFile) -> Self {
        self.other_files.push(file);
        self
    }
}

/// Merge the configured files and return the merged text.
///
/// The result is trimmed of leading and trailing whitespace.
///
/// # Errors
///
/// Returns [`Error::Read`] if any input file cannot be read.
pub async fn merge_files(options: &MergeOptions) -> Result<String> {
    let index = read_source(&options.index_file.path).await?;
    let index = drop_leading_lines(&index, options.index_file.lines);

    let mut others = Vec::with_capacity(options.other_files.len());
    for file in &options.other_files {
        let code = read_source(&file.path).await?;
        let code = drop_leading_lines(&code, file.lines);
        let code = if file.remove_export {
            strip_export_keywords(&code)
        } else {
            code
        };
        others.push(code);
    }

    tracing::debug!(
        "Merged {} file(s) into {}",
        others.len(),
        options.index_file.path.display()
    );

    let merged = format!("{}\n{}", others.join("\n"), index);
    Ok(merged.trim().to_string())
}

/// Merge the configured files and write the result to `out`.
///
/// The parent directory of `out` is created if needed.
pub async fn merge_files_to(options: &MergeOptions, out: impl AsRef<Path>) -> Result<()> {
    let out = out.as_ref();
    let merged = merge_files(options).await?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent).await?;
    }

    tokio::fs::write(out, merged)
        .await
        .map_err(|source| Error::Write {
            path: out.to_path_buf(),
            source,
        })
}

async fn read_source(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Drop `lines` leading lines. `None` and `Some(0)` keep the text as is.
fn drop_leading_lines(code: &str, lines: Option<usize>) -> String {
    match lines {
        Some(n) if n > 0 => code.split('\n').skip(n).collect::<Vec<_>>().join("\n"),
        _ => code.to_string(),
    }
}
