use clap::{Args, Subcommand};
use std::path::PathBuf;
use triform_build::OtherFile;

use crate::cli::enums::*;
use crate::cli::validation::parse_other;

/// Available triform subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build every requested output format
    ///
    /// Merges the index file with the other files, compiles the merged unit
    /// once per format, minifies it and writes each format to its directory.
    /// Settings come from triform.config.json, TRIFORM_* environment
    /// variables and these flags, in increasing priority.
    Build(BuildArgs),

    /// Compile entries into a single format without merging or minifying
    ///
    /// Output file names follow the package's module type, so an ESM build
    /// inside a CommonJS package is written as `.mjs`.
    Compile(CompileArgs),

    /// Concatenate source files into one
    ///
    /// Other files come first in the order given, the index file last.
    /// Prints the result to stdout unless --out is set.
    Merge(MergeArgs),
}

/// Arguments for the build command
///
/// Every flag is optional. A flag that is not given leaves the value from
/// the config file, the environment or the defaults untouched.
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Path to the config file
    ///
    /// Defaults to triform.config.json in the current directory when present.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output formats to build, comma separated
    ///
    /// Examples:
    ///   triform build --format esm,cjs
    ///   triform build --format browser
    #[arg(short = 'f', long, value_enum, value_delimiter = ',')]
    pub format: Option<Vec<FormatArg>>,

    /// Output directory for the ESM build
    #[arg(long, value_name = "DIR")]
    pub esm_dir: Option<PathBuf>,

    /// Output directory for the CommonJS build
    #[arg(long, value_name = "DIR")]
    pub cjs_dir: Option<PathBuf>,

    /// Output directory for the browser build
    #[arg(long, value_name = "DIR")]
    pub browser_dir: Option<PathBuf>,

    /// Index file, merged last
    #[arg(short, long, value_name = "FILE")]
    pub index: Option<PathBuf>,

    /// Number of leading lines to drop from the index file
    #[arg(long, value_name = "N")]
    pub index_lines: Option<usize>,

    /// File merged before the index, as FILE[:LINES][:noexport]
    ///
    /// May be repeated. LINES drops leading lines (usually imports of the
    /// other merged files) and noexport strips every `export` keyword.
    ///
    /// Examples:
    ///   triform build --other src/colors.ts:1:noexport --other src/util.ts
    #[arg(short, long, value_name = "SPEC", value_parser = parse_other)]
    pub other: Vec<OtherFile>,

    /// Base name of the merged unit
    #[arg(long, value_name = "NAME")]
    pub file_name: Option<String>,

    /// Emit TypeScript declarations for the module formats
    #[arg(long)]
    pub declaration: bool,

    /// Directory for declaration files (defaults to each format's directory)
    #[arg(long, value_name = "DIR")]
    pub declaration_dir: Option<PathBuf>,

    /// Copy compiler output instead of minifying it
    #[arg(long)]
    pub no_minify: bool,

    /// Skip source maps
    #[arg(long)]
    pub no_sourcemap: bool,

    /// Append `.js` to relative import specifiers in compiled output
    #[arg(long)]
    pub fix_imports: bool,

    /// Target platform for the compiler
    #[arg(long, value_enum)]
    pub platform: Option<PlatformArg>,

    /// Working directory for the build
    ///
    /// Holds the temporary directory and the package.json used to pick
    /// output extensions. Relative paths are resolved against it.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the compile command
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Entry files to compile
    #[arg(required = true, value_name = "ENTRY")]
    pub entries: Vec<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: FormatArg,

    /// Output directory
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Emit TypeScript declarations (ignored for the browser format)
    #[arg(long)]
    pub declaration: bool,

    /// Directory for declaration files (defaults to --out-dir)
    #[arg(long, value_name = "DIR")]
    pub declaration_dir: Option<PathBuf>,

    /// Write a source map next to each compiled file
    #[arg(long)]
    pub sourcemap: bool,

    /// Append `.js` to relative import specifiers in compiled output
    #[arg(long)]
    pub fix_imports: bool,

    /// Target platform for the compiler
    #[arg(long, value_enum)]
    pub platform: Option<PlatformArg>,
}

/// Arguments for the merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Index file, merged last
    #[arg(short, long, value_name = "FILE")]
    pub index: PathBuf,

    /// Number of leading lines to drop from the index file
    #[arg(long, value_name = "N")]
    pub index_lines: Option<usize>,

    /// File merged before the index, as FILE[:LINES][:noexport]
    #[arg(short, long, value_name = "SPEC", value_parser = parse_other)]
    pub other: Vec<OtherFile>,

    /// Write the merged source here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}
