//! Plain-text rendering of a run summary.

use crate::orchestrator::RunSummary;
use std::fmt::Write;

/// Renders a summary for terminal output and the log tail.
pub fn render(summary: &RunSummary) -> String {
    let mut out = String::new();

    if summary.cancelled {
        out.push_str("Run cancelled before completion.\n");
    }

    let _ = writeln!(
        out,
        "Processed {} file(s) in {}: {} succeeded, {} failed",
        summary.attempted,
        format_duration(summary.elapsed_ms),
        summary.succeeded,
        summary.failed,
    );

    if !summary.failures.is_empty() {
        out.push_str("\nFailures:\n");
        for (idx, failure) in summary.failures.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. '{}': {}",
                idx + 1,
                failure.path.display(),
                failure.reason
            );
        }
    }

    if let Some(relocation) = &summary.relocation {
        let _ = writeln!(
            out,
            "\nMoved ({}) and copied ({}) a total of {} in {}",
            relocation.moved.len(),
            relocation.copied.len(),
            format_size(relocation.total_bytes),
            format_duration(relocation.duration_ms),
        );
        for failure in &relocation.failures {
            let _ = writeln!(
                out,
                "  relocation failed for '{}': {}",
                failure.source.display(),
                failure.reason
            );
        }
    }

    for warning in &summary.warnings {
        let _ = writeln!(out, "warning: {}", warning);
    }

    out
}

/// Formats a duration in "N hour(s) N minute(s) N second(s)" form, keeping
/// two decimals of sub-second resolution only when the whole duration is
/// under a second.
pub fn format_duration(elapsed_ms: u64) -> String {
    let raw_secs = elapsed_ms as f64 / 1000.0;
    if raw_secs > 0.0 && raw_secs < 1.0 {
        return format!("{:.2} second(s)", raw_secs);
    }

    let total = elapsed_ms / 1000;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{} hour(s) ", hours);
    }
    if minutes > 0 {
        let _ = write!(out, "{} minute(s) ", minutes);
    }
    let _ = write!(out, "{} second(s)", seconds);
    out
}

/// Formats a byte count with binary prefixes, one decimal place.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 8] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB"];
    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{:.1}{}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1}YiB", value)
}
