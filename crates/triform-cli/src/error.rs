//! Error handling for the triform CLI.
//!
//! - `CliError` is what every command returns
//! - `ConfigError` and `BuildError` carry the details and a hint
//! - library failures are kept as [`triform_build::Error`] so their
//!   diagnostic codes survive into the miette report

mod miette;

use std::path::PathBuf;
use thiserror::Error;

pub use self::miette::{cli_error_to_miette, triform_error_to_miette};

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid syntax, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Build input or output errors detected by the CLI
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Errors from the build library
    #[error(transparent)]
    Triform(#[from] triform_build::Error),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file doesn't exist at the given location
    #[error("Config file not found: {}\n\nHint: Create a triform.config.json file or check the --config path", .0.display())]
    NotFound(PathBuf),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Build input and output errors found before the library runs.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Index or entry file doesn't exist
    #[error("Entry file not found: {}\n\nHint: Check the 'indexFile' field in your config or the --index argument", .0.display())]
    EntryNotFound(PathBuf),

    /// A file to merge doesn't exist
    #[error("File to merge not found: {}\n\nHint: Check the 'otherFiles' entries or --other arguments", .0.display())]
    OtherFileNotFound(PathBuf),

    /// The path given as an output directory is a file
    #[error("Output directory is not writable: {}\n\nHint: Check directory permissions or choose a different directory", .0.display())]
    OutputNotWritable(PathBuf),

    /// Every requested format was skipped
    #[error("Nothing was built: no output directory is set for {formats}\n\nHint: Set outputDirs in your config or pass --esm-dir, --cjs-dir or --browser-dir")]
    NothingBuilt {
        /// The requested formats, comma separated
        formats: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
