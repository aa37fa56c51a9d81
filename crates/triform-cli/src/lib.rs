//! Command-line interface for triform.
//!
//! Wraps the `triform-build` library with configuration loading, terminal
//! output and three commands:
//!
//! - `triform build` merges the sources and emits every requested format
//! - `triform compile` runs the format-aware compiler on explicit entries
//! - `triform merge` only concatenates sources
//!
//! Modules:
//!
//! - [`error`] - error types with actionable hints
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - status messages and the build summary
//! - [`config`] - `triform.config.json`, `TRIFORM_*` variables and flags

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{BuildError, CliError, ConfigError, Result};
