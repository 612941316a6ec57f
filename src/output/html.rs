//! HTML renderer used by the web form.
//!
//! Converts the changelog markdown with `pulldown-cmark`. Raw HTML inside
//! the markdown is escaped rather than passed through, since the text comes
//! from a third-party service.

use pulldown_cmark::{Event, Options, Parser, html};

use crate::models::ChangelogReport;
use crate::output::{OutputRenderer, stats_line};

/// Renders a report as an HTML fragment (no `<html>`/`<body>` wrapper).
pub struct HtmlRenderer;

impl OutputRenderer for HtmlRenderer {
    fn render(&self, report: &ChangelogReport) -> String {
        format!(
            "<section class=\"report\">\n<h2>{}</h2>\n<p class=\"stats\">{}</p>\n<article class=\"changelog\">\n{}</article>\n</section>\n",
            escape_html(&report.repository.full_name()),
            escape_html(&stats_line(report)),
            markdown_to_html(&report.changelog),
        )
    }
}

/// Convert markdown to HTML, escaping any embedded raw HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Escape text for safe inclusion in HTML content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a `String` cannot fail.
    let _ = pulldown_cmark_escape::escape_html(&mut out, text);
    out
}
