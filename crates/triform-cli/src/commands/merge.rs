//! `triform merge` implementation.

use crate::cli::MergeArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use triform_build::{IndexFile, MergeOptions, merge_files, merge_files_to};

/// Execute the merge command.
///
/// Prints the merged source to stdout, or writes it to `--out`.
pub async fn execute(args: MergeArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;

    let index_path = utils::resolve_path(&args.index, &cwd);
    utils::validate_entry(&index_path)?;

    let mut index = IndexFile::new(index_path);
    if let Some(lines) = args.index_lines {
        index = index.lines(lines);
    }

    let mut options = MergeOptions::new(index);
    for other in args.other {
        let path = utils::resolve_path(&other.path, &cwd);
        utils::validate_other(&path)?;
        options = options.other(triform_build::OtherFile { path, ..other });
    }

    match args.out {
        Some(out) => {
            let out = utils::resolve_path(&out, &cwd);
            merge_files_to(&options, &out).await?;
            ui::success(&format!(
                "Merged {} files into {}",
                options.other_files.len() + 1,
                utils::display_path(&out, &cwd)
            ));
        }
        None => {
            let merged = merge_files(&options).await?;
            println!("{}", merged);
        }
    }

    Ok(())
}
