//! `triform build` implementation.

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::config::TriformConfig;
use crate::error::{BuildError, Result};
use crate::ui;
use std::time::Instant;
use tracing::debug;

/// Execute the build command.
///
/// # Build Process
///
/// 1. Load and validate configuration (CLI > Env > File > Defaults)
/// 2. Check that every input file exists
/// 3. Run the library build
/// 4. Report skipped formats and print the summary
///
/// # Errors
///
/// Returns errors for invalid configuration, missing inputs, compiler or
/// minifier failures, and a build in which every format was skipped.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();

    let config = TriformConfig::load(&args)?;
    let current_dir = utils::get_cwd()?;
    let cwd = config.resolved_cwd(&current_dir);
    let options = config.to_build_options(&current_dir);

    utils::validate_entry(&options.index_file.path)?;
    for other in &options.other_files {
        utils::validate_other(&other.path)?;
    }
    for format in options.distinct_formats() {
        if let Some(dir) = options.output_dirs.get(format) {
            utils::validate_output_dir(dir)?;
        }
    }

    let formats: Vec<String> = options
        .distinct_formats()
        .iter()
        .map(ToString::to_string)
        .collect();
    ui::info(&format!(
        "Building {} ({})",
        utils::display_path(&options.index_file.path, &cwd),
        formats.join(", ")
    ));
    debug!(?options, "resolved build options");

    let report = options.build().await?;

    for warning in &report.warnings {
        ui::warning(warning);
    }
    if report.formats.is_empty() {
        return Err(BuildError::NothingBuilt {
            formats: formats.join(", "),
        }
        .into());
    }

    let mut entries = Vec::new();
    for format in &report.formats {
        entries.extend(utils::summary_entries(&format.format.to_string(), &format.files, &cwd).await);
    }

    let duration = start_time.elapsed();
    ui::print_build_summary(&entries, duration);
    ui::success(&format!(
        "Built {} in {}",
        formats_built(&report),
        ui::format_duration(duration)
    ));

    Ok(())
}

fn formats_built(report: &triform_build::BuildReport) -> String {
    report
        .formats
        .iter()
        .map(|f| f.format.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
