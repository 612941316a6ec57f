//! Plain markdown renderer: the changelog text exactly as generated.

use crate::models::ChangelogReport;
use crate::output::OutputRenderer;

pub struct MarkdownRenderer;

impl OutputRenderer for MarkdownRenderer {
    fn render(&self, report: &ChangelogReport) -> String {
        let mut out = report.changelog.clone();
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}
