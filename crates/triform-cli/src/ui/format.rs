//! Sizes, durations and the build summary table.

use console::Term;
use owo_colors::OwoColorize;
use std::time::Duration;

use super::colors_enabled;

/// One written file in the build summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    /// Format label, e.g. `esm`
    pub format: String,
    /// Path shown to the user
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

/// Format a byte count as B, KB, MB or GB.
///
/// ```
/// use triform_cli::ui::format_size;
///
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}

/// Format a duration as `ms`, seconds or `Xm Ys`.
///
/// ```
/// use std::time::Duration;
/// use triform_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print the files written by a build, grouped by format, to stderr.
pub fn print_build_summary(entries: &[SummaryEntry], elapsed: Duration) {
    let width = (Term::stderr().size().1 as usize).clamp(20, 80);
    let rule = "─".repeat(width);
    let color = colors_enabled();

    if color {
        eprintln!("\n{}", "Build Summary".bold().underline());
    } else {
        eprintln!("\nBuild Summary");
    }
    eprintln!("{}", rule);

    let label_width = entries.iter().map(|e| e.format.len()).max().unwrap_or(0);
    for entry in entries {
        let size = format_size(entry.size);
        if color {
            eprintln!(
                "  {} {:<label_width$} {} {}",
                "▸".blue(),
                entry.format.cyan(),
                entry.name.bright_white().bold(),
                size.dimmed(),
            );
        } else {
            eprintln!("  ▸ {:<label_width$} {} {}", entry.format, entry.name, size);
        }
    }

    eprintln!("{}", rule);

    let total: u64 = entries.iter().map(|e| e.size).sum();
    let files = if entries.len() == 1 { "file" } else { "files" };
    if color {
        eprintln!(
            "  {} {} {}, {} in {}",
            "Total:".bold(),
            entries.len(),
            files,
            format_size(total).green(),
            format_duration(elapsed).green()
        );
    } else {
        eprintln!(
            "  Total: {} {}, {} in {}",
            entries.len(),
            files,
            format_size(total),
            format_duration(elapsed)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1_572_864), "1.50 MB");
        assert_eq!(format_size(2_147_483_648), "2.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_print_build_summary() {
        let entries = vec![
            SummaryEntry {
                format: "esm".to_string(),
                name: "dist/esm/index.mjs".to_string(),
                size: 1_234,
            },
            SummaryEntry {
                format: "browser".to_string(),
                name: "dist/browser/index.global.js".to_string(),
                size: 987,
            },
        ];

        print_build_summary(&entries, Duration::from_millis(450));
        print_build_summary(&[], Duration::ZERO);
    }
}
