//! Leaf-directory discovery and per-directory index generation
//!
//! A "leaf" output directory holds at least one HTML artifact and at least
//! one JSON artifact directly inside it. A directory whose only HTML file
//! is its own `index.html` does not count; an index page alone must not
//! flag its directory as needing another index.
//!
//! Discovery has set semantics: iteration order is unspecified and callers
//! must not rely on it for anything but display.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::services::links;
use crate::services::render::PageChrome;
use crate::{Error, Result};

pub const INDEX_FILE: &str = "index.html";
pub const MARKDOWN_INDEX_FILE: &str = "README.md";

const NAV_OPEN: &str = "\n<div id=\"nav\" class=\"navigation sitecomponent list\"><ul>\n";
const NAV_CLOSE: &str = "</ul></div>\n";

/// Recursively scan `root` for leaf directories.
pub fn leaf_directories(root: &Path) -> Result<HashSet<PathBuf>> {
    let mut leaves = HashSet::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if entry.file_type().is_dir() && is_leaf(entry.path())? {
            leaves.insert(entry.path().to_path_buf());
        }
    }
    debug!("found {} leaf directories under {}", leaves.len(), root.display());
    Ok(leaves)
}

fn is_leaf(dir: &Path) -> Result<bool> {
    let mut html_files = Vec::new();
    let mut json_files = 0usize;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".html") {
            html_files.push(name);
        } else if name.ends_with(".json") {
            json_files += 1;
        }
    }
    if html_files.is_empty() || json_files == 0 {
        return Ok(false);
    }
    if html_files.len() == 1 && html_files[0] == INDEX_FILE {
        return Ok(false);
    }
    Ok(true)
}

/// Names of the content files directly inside `dir`, sorted for stable
/// output. The directory's own index artifacts are not content.
fn file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name != INDEX_FILE && name != MARKDOWN_INDEX_FILE {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Site-wide nav block: root link plus one link per leaf directory.
///
/// Links carry raw absolute paths; sanitization happens once on the final
/// assembled page.
pub fn nav_section(root: &Path) -> Result<String> {
    let leaves = leaf_directories(root)?;
    if leaves.is_empty() {
        return Ok(String::new());
    }
    let mut lines = String::from(NAV_OPEN);
    lines.push_str(&links::list_item("/", "/"));
    for dir in &leaves {
        let dir = dir.to_string_lossy();
        lines.push_str(&links::list_item(&dir, &dir));
    }
    lines.push_str(NAV_CLOSE);
    Ok(lines)
}

/// Markdown counterpart of [`nav_section`].
pub fn markdown_nav_section(root: &Path) -> Result<String> {
    let leaves = leaf_directories(root)?;
    if leaves.is_empty() {
        return Ok(String::new());
    }
    let mut lines = String::from("\n");
    lines.push_str(&links::markdown_item("/", "/"));
    for dir in &leaves {
        let dir = dir.to_string_lossy();
        lines.push_str(&links::markdown_item(&format!("/{dir}"), &dir));
    }
    lines.push('\n');
    Ok(lines)
}

/// Write an `index.html` into every leaf directory under `root`.
///
/// Each index links back to the site root, to the directory itself, and to
/// every content file directly inside it (siblings only). A no-op when no
/// directory qualifies.
pub fn write_index_pages(root: &Path, chrome: &PageChrome) -> Result<()> {
    for dir in leaf_directories(root)? {
        let mut lines = String::from(NAV_OPEN);
        lines.push_str(&links::list_item("/", "/"));
        let label = dir.to_string_lossy();
        lines.push_str(&links::list_item(&format!("/{label}"), &label));
        for name in file_names(&dir)? {
            lines.push_str(&links::list_item(&name, &name));
        }
        lines.push_str(NAV_CLOSE);
        let page = links::sanitize(root, &format!("{}{}{}", chrome.header, lines, chrome.footer));
        let index = dir.join(INDEX_FILE);
        debug!("generating index: {}", index.display());
        fs::write(&index, page)?;
    }
    Ok(())
}

/// Markdown counterpart of [`write_index_pages`]: a `README.md` with the
/// same links as a bullet list.
pub fn write_markdown_index_pages(root: &Path) -> Result<()> {
    for dir in leaf_directories(root)? {
        let mut lines = String::from("Index\n-----\n\n");
        lines.push_str(&links::markdown_item("/", "/"));
        let label = dir.to_string_lossy();
        lines.push_str(&links::markdown_item(&format!("/{label}"), &label));
        for name in file_names(&dir)? {
            lines.push_str(&links::markdown_item(&name, &name));
        }
        let page = links::sanitize(root, &lines);
        let index = dir.join(MARKDOWN_INDEX_FILE);
        debug!("generating markdown index: {}", index.display());
        fs::write(&index, page)?;
    }
    Ok(())
}
