//! Configuration for `triform build`, merged from several sources.
//!
//! Priority: CLI flags > `TRIFORM_*` environment variables >
//! `triform.config.json` > defaults.

mod conversions;
mod defaults;
mod loading;
mod validation;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use triform_build::{Format, IndexFile, OtherFile, OutputDirs};

use crate::cli::PlatformArg;

pub use defaults::*;
pub use validation::{MAX_SKIPPED_LINES, validate_file_name};
pub use loading::{CONFIG_FILE_NAME, ENV_PREFIX};

/// triform configuration, loaded from triform.config.json, the environment
/// and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TriformConfig {
    /// Formats to build. Accepts a list or a comma separated string.
    #[serde(default = "default_formats", deserialize_with = "formats::deserialize")]
    pub format: Vec<Format>,

    /// Output directory per format
    #[serde(default = "default_output_dirs")]
    pub output_dirs: OutputDirs,

    /// File merged last
    #[serde(default = "default_index_file")]
    pub index_file: IndexFile,

    /// Files merged before the index, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other_files: Vec<OtherFile>,

    /// Base name of the merged unit
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Emit declarations for the module formats
    #[serde(default)]
    pub declaration: bool,

    /// Shared declaration directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration_dir: Option<PathBuf>,

    /// Minify compiled JavaScript
    #[serde(default = "default_true")]
    pub minify: bool,

    /// Write source maps next to minified files
    #[serde(default = "default_true")]
    pub source_map: bool,

    /// Append `.js` to relative import specifiers
    #[serde(default)]
    pub fix_relative_imports: bool,

    /// Module patterns kept as imports, replacing the bare-import default
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external: Vec<String>,

    /// Compiler platform (defaults per format)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformArg>,

    /// Working directory; relative paths are resolved against it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

mod formats {
    use serde::{Deserialize, Deserializer};
    use triform_build::Format;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Csv(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Format>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = match Raw::deserialize(deserializer)? {
            Raw::List(names) => names,
            Raw::Csv(csv) => csv
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        };

        names
            .iter()
            .map(|name| Format::parse(name).map_err(serde::de::Error::custom))
            .collect()
    }
}
