//! Markdown-to-HTML conversion and page assembly
//!
//! The markdown converter is wrapped in a single pure function so the rest
//! of the crate can treat it as an opaque, total collaborator.

use pulldown_cmark::{Options, Parser, html};

use crate::models::{Sample, Series};

/// Default page shell, shared by the home page, per-sample pages, and
/// per-directory indices.
pub const HTML_HEADER: &str = r#"<!DOCTYPE html>
<html>
	<head>
		<meta charset="utf-8">
		<title>tunnel-stats</title>
	</head>
	<body>
"#;

pub const HTML_FOOTER: &str = "
	</body>
</html>";

/// Title block and trailing rule for README-style markdown output.
pub const MARKDOWN_HEADER: &str = "tunnel-stats\n============\n\n";
pub const MARKDOWN_FOOTER: &str = "\n---\n";

/// Page shell configuration owned by the rendering site.
///
/// Replaces what used to be process-wide header/footer templates: two plain
/// string fields, passed to whatever assembles a full page.
#[derive(Debug, Clone)]
pub struct PageChrome {
    pub header: String,
    pub footer: String,
}

impl Default for PageChrome {
    fn default() -> Self {
        PageChrome {
            header: HTML_HEADER.to_string(),
            footer: HTML_FOOTER.to_string(),
        }
    }
}

/// Convert markdown text to an HTML fragment. Total: never fails.
#[must_use]
pub fn markdown_to_html(md: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(md, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// One sample rendered as an HTML fragment.
///
/// The container id carries the raw timestamp string verbatim; it is the
/// renderer's anchor contract and is deliberately not sanitized here.
#[must_use]
pub fn sample_html(sample: &Sample) -> String {
    format!(
        "<div class=\"stats single measurement\" id=\"{}\">{}</div>",
        sample.timestamp(),
        markdown_to_html(&sample.markdown())
    )
}

/// One sample as a standalone page inside the given chrome.
#[must_use]
pub fn sample_page(sample: &Sample, chrome: &PageChrome) -> String {
    format!("{}{}{}", chrome.header, sample_html(sample), chrome.footer)
}

/// The whole series rendered as an HTML fragment.
#[must_use]
pub fn series_html(series: &Series) -> String {
    format!(
        "<div class=\"stats multiple chart\" id=\"exploratorystats\">{}</div>",
        markdown_to_html(&series.markdown())
    )
}
