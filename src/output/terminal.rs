//! Terminal renderer: a styled stats header followed by the markdown.

use colored::Colorize;

use crate::models::ChangelogReport;
use crate::output::{OutputRenderer, stats_line};

/// Terminal output renderer with a colored summary header.
pub struct TerminalRenderer;

impl OutputRenderer for TerminalRenderer {
    fn render(&self, report: &ChangelogReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            " {} {} {}\n",
            "▸".cyan().bold(),
            report.repository.full_name().bold(),
            format!(
                "· last {} day{}",
                report.days,
                if report.days == 1 { "" } else { "s" }
            )
            .dimmed(),
        ));
        output.push_str(&format!("   {}\n", stats_line(report).dimmed()));
        output.push_str(&format!("{}\n\n", "───────────────────────────────────".dimmed()));

        output.push_str(report.changelog.trim_end());
        output.push('\n');
        output
    }
}
