//! Link markup and path sanitization helpers

use std::path::Path;

/// Make generated markup portable: strip every occurrence of the absolute
/// site root, collapse duplicate path separators to one, and drop a single
/// leading separator.
///
/// Must be applied to the final assembled page text, not per-fragment, so
/// that separators doubled by concatenation are caught too.
#[must_use]
pub fn sanitize(root: &Path, text: &str) -> String {
    let root_str = root.to_string_lossy();
    let mut out = text.replace(root_str.as_ref(), "");
    while out.contains("//") {
        out = out.replace("//", "/");
    }
    match out.strip_prefix('/') {
        Some(rest) => rest.to_string(),
        None => out,
    }
}

/// `<li>` link line used by nav sections and index pages.
#[must_use]
pub fn list_item(href: &str, label: &str) -> String {
    format!("    <li><a href=\"{href}\">{label}</a></li>\n")
}

/// Markdown bullet link used by README-style output.
#[must_use]
pub fn markdown_item(href: &str, label: &str) -> String {
    format!(" - [{label}]({href})\n")
}
