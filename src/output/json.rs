//! JSON output renderer.
//!
//! Outputs `{"repository": "...", "stats": {...}, "changelog": "..."}`.

use crate::models::ChangelogReport;
use crate::output::OutputRenderer;

/// JSON output renderer.
pub struct JsonRenderer;

impl OutputRenderer for JsonRenderer {
    fn render(&self, report: &ChangelogReport) -> String {
        let output = serde_json::json!({
            "repository": report.repository.full_name(),
            "days": report.days,
            "stats": {
                "commits": report.commit_count,
                "files": report.file_count,
                "additions": report.additions,
                "deletions": report.deletions,
                "net_diff": report.net_diff,
            },
            "changelog": report.changelog,
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}
