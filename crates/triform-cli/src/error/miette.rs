//! Miette diagnostic conversion for CLI errors.

use crate::error::{BuildError, CliError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Triform(e) => triform_error_to_miette(e),
        CliError::Build(e) => build_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert BuildError to miette Report
pub fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::NothingBuilt { formats } => miette::miette!(
            help = "Set outputDirs in your config or pass --esm-dir, --cjs-dir or --browser-dir",
            "Nothing was built: no output directory is set for {}",
            formats
        ),
        _ => miette::miette!("{}", err),
    }
}

/// Convert a build library error to miette Report
///
/// Compiler failures are reported one message per line under the summary.
pub fn triform_error_to_miette(err: triform_build::Error) -> Report {
    match err {
        triform_build::Error::Compile(messages) if messages.is_empty() => {
            miette::miette!("Compilation failed with no diagnostics")
        }
        _ => Report::new(err),
    }
}
