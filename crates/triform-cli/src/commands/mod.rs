//! Command implementations for the triform CLI.
//!
//! - [`build`] - merge, compile and minify every requested format
//! - [`compile`] - compile explicit entries into one format
//! - [`merge`] - concatenate sources
//!
//! Each command provides an `execute` function taking its parsed arguments.

pub mod build;
pub mod compile;
pub mod merge;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use compile::execute as compile_execute;
pub use merge::execute as merge_execute;
