//! Terminal output: status messages and the build summary.
//!
//! Everything is written to stderr so `triform merge` can print the merged
//! source to stdout.
//!
//! ```no_run
//! use triform_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Build complete");
//! ui::warning("No output directory for browser, skipping");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_duration, format_size, print_build_summary, SummaryEntry};
pub use messages::{info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, falls back to terminal detection.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Decide once whether messages are colored. `--no-color` always wins.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    COLORS.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled_stderr(enabled);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
