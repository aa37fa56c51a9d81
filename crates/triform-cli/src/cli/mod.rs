//! Command-line interface definition for triform.
//!
//! # Command Structure
//!
//! - `triform build` - merge sources and emit every requested format
//! - `triform compile` - compile explicit entries into one format
//! - `triform merge` - concatenate sources without compiling

mod commands;
pub mod enums;
mod tests;
mod validation;

use clap::Parser;

pub use commands::{BuildArgs, Command, CompileArgs, MergeArgs};
pub use enums::*;
pub use validation::parse_other;

/// triform - build one TypeScript library into ESM, CommonJS and browser outputs
#[derive(Parser, Debug)]
#[command(
    name = "triform",
    version,
    about = "Build a TypeScript library into ESM, CommonJS and browser outputs",
    long_about = "triform merges a set of TypeScript sources into one unit, compiles it once per\n\
                  output format, minifies the result and writes each format to its own directory.\n\
                  Declaration files are emitted for the module formats on request."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
