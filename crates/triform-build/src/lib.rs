
//! # triform-build
//!
//! Merge a handful of TypeScript sources into one unit, compile it into ESM,
//! CommonJS and browser-global builds, and minify the results.
//!
//! Compilation is delegated to Rolldown, declarations to OXC's isolated
//! declarations, and minification to `oxc_minifier`. This crate sequences those
//! calls and takes care of file naming.
//!
//! ## Quick Start
//!
//! ### Build all three formats
//!
//! ```no_run
//! use triform_build::{BuildOptions, Format, IndexFile, OtherFile};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = BuildOptions::new(IndexFile::new("src/index.ts").lines(2))
//!     .other(OtherFile::new("src/colors.ts").remove_export(true))
//!     .formats([Format::Esm, Format::Cjs, Format::Browser])
//!     .esm_dir("dist")
//!     .cjs_dir("dist/commonjs")
//!     .browser_dir("dist/browser")
//!     .declaration(true)
//!     .build()
//!     .await?;
//!
//! for format in &report.formats {
//!     println!("{}: {} files", format.format, format.files.len());
//! }
//! # Ok(()) }
//! ```
//!
//! ### Compile a single entry
//!
//! ```no_run
//! use triform_build::{CompileOptions, Format, PackageType};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let package_type = PackageType::detect(".")?;
//! let written = CompileOptions::new("./src/index.ts", Format::Cjs, "dist/commonjs")
//!     .package_type(package_type)
//!     .compile()
//!     .await?;
//! # Ok(()) }
//! ```

pub mod build;
pub mod compile;
pub mod extension;
pub mod format;
pub mod fs;
pub mod manifest;
pub mod merge;
pub mod minify;

pub use build::{BuildOptions, BuildReport, FormatReport, OutputDirs, build};
pub use compile::{
    CompileOptions, CompilerOverrides, EmittedFile, MemorySink, OutputSink, compile,
};
pub use extension::{fix_relative_imports, rewrite_extension, strip_export_keywords};
pub use format::{Format, ModuleKind};
pub use fs::{clean_dir, ensure_clean, ensure_dir, remove_dir_best_effort};
pub use manifest::PackageType;
pub use merge::{IndexFile, MergeOptions, OtherFile, merge_files, merge_files_to};
pub use minify::{Minified, MinifyOptions, minify};

// Re-export the Rolldown types that appear in the public configuration
pub use rolldown::Platform;

use std::path::PathBuf;

/// Error types for triform-build operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input file could not be read.
    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The package manifest could not be parsed.
    #[error("Invalid package manifest '{}': {message}", .path.display())]
    Manifest { path: PathBuf, message: String },

    /// The compiler reported one or more errors.
    #[error("Compilation failed: {}", format_compile_errors(.0))]
    Compile(Vec<String>),

    /// The minifier could not process an emitted file.
    #[error("Failed to minify '{file}': {message}")]
    Minify { file: String, message: String },

    /// An emitted file name resolves outside its output directory.
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for triform-build operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a compile error from a Rolldown error batch.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        Error::Compile(vec![format!("{:?}", error)])
    }
}

fn format_compile_errors(messages: &[String]) -> String {
    match messages {
        [] => "Unknown compiler error".to_string(),
        [single] => single.clone(),
        many => format!("{} errors: {}", many.len(), many.join("; ")),
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Read { .. } => "READ_ERROR",
            Error::Write { .. } => "WRITE_ERROR",
            Error::Io(_) => "IO_ERROR",
            Error::Manifest { .. } => "MANIFEST_ERROR",
            Error::Compile(_) => "COMPILE_ERROR",
            Error::Minify { .. } => "MINIFY_ERROR",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Read { path, .. } => Some(Box::new(format!(
                "Check that '{}' exists and is readable.",
                path.display()
            ))),
            Error::Write { path, .. } => Some(Box::new(format!(
                "Failed to write '{}'. Check disk space and permissions.",
                path.display()
            ))),
            Error::Manifest { .. } => Some(Box::new(
                "The \"type\" field of package.json must be \"commonjs\" or \"module\".",
            )),
            Error::Compile(_) => Some(Box::new(
                "Merged sources must be self-contained apart from package imports.",
            )),
            Error::InvalidConfig(msg) => Some(Box::new(format!(
                "Check your configuration file for errors.\nError: {}",
                msg
            ))),
            _ => None,
        }
    }
}
