use std::path::PathBuf;

use crate::format::Format;

/// Outcome of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// One entry per format that was built, in build order.
    pub formats: Vec<FormatReport>,
    /// Non-fatal problems, such as formats skipped for lack of an output dir.
    pub warnings: Vec<String>,
}

/// Files written for one format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatReport {
    pub format: Format,
    pub out_dir: PathBuf,
    /// Written files: compiled output, source maps, then declarations.
    pub files: Vec<PathBuf>,
}

impl BuildReport {
    pub fn get(&self, format: Format) -> Option<&FormatReport> {
        self.formats.iter().find(|r| r.format == format)
    }

    pub fn total_files(&self) -> usize {
        self.formats.iter().map(|r| r.files.len()).sum()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
