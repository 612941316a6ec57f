//! Output renderers: terminal, JSON, plain markdown, HTML.

pub mod html;
pub mod json;
pub mod markdown;
pub mod terminal;

use crate::models::ChangelogReport;

/// Trait for rendering a changelog report to an output format.
pub trait OutputRenderer {
    /// Render the report to a string.
    fn render(&self, report: &ChangelogReport) -> String;
}

/// Human-readable one-line summary of the diff stats.
pub(crate) fn stats_line(report: &ChangelogReport) -> String {
    format!(
        "{} commit{}, {} file{} changed, +{} -{} (net {:+})",
        report.commit_count,
        if report.commit_count == 1 { "" } else { "s" },
        report.file_count,
        if report.file_count == 1 { "" } else { "s" },
        report.additions,
        report.deletions,
        report.net_diff,
    )
}
