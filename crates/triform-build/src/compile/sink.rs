//! Interception point between the compiler and the filesystem.
//!
//! The compiler never writes directly: every emitted file, already renamed,
//! goes into an [`OutputSink`]. [`MemorySink`] buffers files so nothing reaches
//! disk unless the whole compile succeeded.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::fs::ensure_dir;
use crate::{Error, Result};

/// A file produced by the compiler, keyed by its final output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Receives emitted files.
pub trait OutputSink {
    fn emit(&mut self, file: EmittedFile);
}

/// In-memory sink preserving emission order.
///
/// Emitting the same path twice replaces the earlier contents in place.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Vec<EmittedFile>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[EmittedFile] {
        &self.files
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        let path = path.as_ref();
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.contents.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn into_files(self) -> Vec<EmittedFile> {
        self.files
    }

    /// Write every buffered file, creating parent directories as needed.
    ///
    /// Returns the written paths in emission order.
    pub async fn flush(self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.files.len());
        for file in self.files {
            if let Some(parent) = file.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                ensure_dir(parent).await?;
            }
            tokio::fs::write(&file.path, file.contents.as_bytes())
                .await
                .map_err(|source| Error::Write {
                    path: file.path.clone(),
                    source,
                })?;
            tracing::debug!("Wrote {}", file.path.display());
            written.push(file.path);
        }
        Ok(written)
    }
}

impl OutputSink for MemorySink {
    fn emit(&mut self, file: EmittedFile) {
        match self.files.iter_mut().find(|f| f.path == file.path) {
            Some(existing) => existing.contents = file.contents,
            None => self.files.push(file),
        }
    }
}

/// Join an emitted file name onto its output directory.
///
/// Names that would resolve outside `base_dir` are rejected.
pub(crate) fn resolve_output_path(base_dir: &Path, file_name: &str) -> Result<PathBuf> {
    if file_name.contains('\0') {
        return Err(Error::InvalidOutputPath(
            "Filename contains null byte".to_string(),
        ));
    }

    let base_dir = base_dir.clean();
    let full_path = base_dir.join(Path::new(file_name).clean()).clean();

    if !full_path.starts_with(&base_dir) {
        return Err(Error::InvalidOutputPath(format!(
            "Path '{}' escapes output directory '{}' (resolved to '{}')",
            file_name,
            base_dir.display(),
            full_path.display()
        )));
    }

    Ok(full_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file(path: &str, contents: &str) -> EmittedFile {
        EmittedFile {
            path: PathBuf::from(path),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn test_memory_sink_preserves_order() {
        let mut sink = MemorySink::new();
        sink.emit(file("out/b.js", "b"));
        sink.emit(file("out/a.js", "a"));

        let paths: Vec<_> = sink.files().iter().map(|f| f.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("out/b.js"), PathBuf::from("out/a.js")]);
    }

    #[test]
    fn test_memory_sink_replaces_same_path() {
        let mut sink = MemorySink::new();
        sink.emit(file("out/a.js", "first"));
        sink.emit(file("out/b.js", "b"));
        sink.emit(file("out/a.js", "second"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.get("out/a.js"), Some("second"));
        assert_eq!(sink.files()[0].path, PathBuf::from("out/a.js"));
    }

    #[tokio::test]
    async fn test_flush_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("nested/deeper/index.mjs");

        let mut sink = MemorySink::new();
        sink.emit(EmittedFile {
            path: target.clone(),
            contents: "export {};".to_string(),
        });
        let written = sink.flush().await.unwrap();

        assert_eq!(written, vec![target.clone()]);
        assert_eq!(std::fs::read_to_string(target).unwrap(), "export {};");
    }

    #[test]
    fn test_resolve_output_path_normal() {
        let base = Path::new("/tmp/output");
        assert_eq!(
            resolve_output_path(base, "index.js").unwrap(),
            Path::new("/tmp/output/index.js")
        );
        assert_eq!(
            resolve_output_path(base, "./types/index.d.ts").unwrap(),
            Path::new("/tmp/output/types/index.d.ts")
        );
    }

    #[test]
    fn test_resolve_output_path_relative_base() {
        assert_eq!(
            resolve_output_path(Path::new("./dist"), "index.cjs").unwrap(),
            Path::new("dist/index.cjs")
        );
    }

    #[test]
    fn test_resolve_output_path_traversal() {
        let base = Path::new("/tmp/output");
        assert!(matches!(
            resolve_output_path(base, "../etc/passwd").unwrap_err(),
            Error::InvalidOutputPath(_)
        ));
        assert!(resolve_output_path(base, "safe/../../../../etc/passwd").is_err());
        assert!(resolve_output_path(base, "file\0name.js").is_err());
    }
}
