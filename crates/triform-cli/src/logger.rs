//! Logging setup for the triform CLI.
//!
//! The build library only emits `tracing` events. This module installs the
//! subscriber that prints them.
//!
//! # Example
//!
//! ```rust,no_run
//! use triform_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("Starting build");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used by `--verbose`.
pub const VERBOSE_FILTER: &str = "triform=debug,triform_build=debug,triform_cli=debug";

/// Filter used by `--quiet`.
pub const QUIET_FILTER: &str = "error";

/// Filter used when neither flag nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "info";

/// Pick the filter directive string for the given flags.
///
/// Priority: `--verbose`, then `--quiet`, then `RUST_LOG`, then `info`.
pub fn filter_directives(verbose: bool, quiet: bool) -> String {
    if verbose {
        VERBOSE_FILTER.to_string()
    } else if quiet {
        QUIET_FILTER.to_string()
    } else {
        std::env::var(EnvFilter::DEFAULT_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}

/// Initialize the tracing subscriber.
///
/// Call once at startup. A second call is a no-op.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = EnvFilter::try_new(filter_directives(verbose, quiet))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    init_logger_with_filter(filter, no_color);
}

/// Initialize the subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(use_ansi(no_color))
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Whether log lines carry ANSI colors. Follows the same rule as the UI.
pub fn use_ansi(no_color: bool) -> bool {
    !no_color && crate::ui::should_use_color()
}
