//! `triform compile` implementation.

use crate::cli::CompileArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use std::time::Instant;
use triform_build::{CompileOptions, CompilerOverrides, Format, PackageType};

/// Execute the compile command.
///
/// Entries are compiled as-is into one format. The package type is read
/// from `package.json` in the current directory and decides the output
/// extensions.
pub async fn execute(args: CompileArgs) -> Result<()> {
    let start_time = Instant::now();
    let cwd = utils::get_cwd()?;

    let entries: Vec<_> = args
        .entries
        .iter()
        .map(|entry| utils::resolve_path(entry, &cwd))
        .collect();
    for entry in &entries {
        utils::validate_entry(entry)?;
    }
    let out_dir = utils::resolve_path(&args.out_dir, &cwd);
    utils::validate_output_dir(&out_dir)?;

    let format = Format::from(args.format);
    let package_type = PackageType::detect(&cwd)?;

    let mut overrides = CompilerOverrides::default().cwd(cwd.clone());
    if let Some(platform) = args.platform {
        overrides = overrides.platform(platform.into());
    }

    let (first, rest) = entries
        .split_first()
        .ok_or_else(|| crate::error::CliError::InvalidArgument("No entry given".to_string()))?;
    let mut options = CompileOptions::new(first.clone(), format, out_dir)
        .declaration(args.declaration)
        .source_map(args.sourcemap)
        .package_type(package_type)
        .fix_relative_imports(args.fix_imports)
        .compiler_options(overrides);
    for entry in rest {
        options = options.entry(entry.clone());
    }
    if let Some(dir) = &args.declaration_dir {
        options = options.declaration_dir(utils::resolve_path(dir, &cwd));
    }

    if args.declaration && !options.emits_declarations() {
        ui::warning(&format!("Declarations are not emitted for the {} format", format));
    }

    ui::info(&format!(
        "Compiling {} {} as {} ({} package)",
        entries.len(),
        if entries.len() == 1 { "entry" } else { "entries" },
        format,
        package_type
    ));

    let written = options.compile().await?;

    let entries = utils::summary_entries(&format.to_string(), &written, &cwd).await;
    let duration = start_time.elapsed();
    ui::print_build_summary(&entries, duration);
    ui::success(&format!("Compiled in {}", ui::format_duration(duration)));

    Ok(())
}
