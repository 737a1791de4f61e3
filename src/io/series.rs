//! Series file and per-sample file read/write operations
//!
//! The series file is a pretty-printed JSON array holding the complete
//! history; writing it is always a full-file overwrite. Per-sample files
//! are a derived view laid out under fixed-width timestamp path segments
//! (`<root>/<Y>/<m>/<d>/<H>/<M>/<S>.{json,html,md}`) and are regenerated,
//! never patched, on every run.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::models::{Sample, Series};
use crate::services::render::{self, PageChrome};
use crate::{Error, Result};

/// Well-known series file name inside the site root.
pub const SERIES_FILE: &str = "series.json";

/// Read the full ordered series from `path`.
///
/// Absence is reported as [`Error::NotFound`] so that callers can tell
/// "start a new series" apart from a corrupt document.
pub fn read_series(path: &Path) -> Result<Series> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(Error::Io(e)),
    };
    serde_json::from_slice(&bytes).map_err(Error::Format)
}

/// Overwrite `path` with the full series as an indented JSON array.
pub fn write_series(series: &Series, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(series).map_err(Error::Format)?;
    debug!("writing series file: {}", path.display());
    fs::write(path, json)?;
    Ok(())
}

/// Path stem for a sample's files: root joined with the fixed-width
/// `Y/m/d/H/M/S` decomposition of its timestamp.
fn sample_stem(root: &Path, sample: &Sample) -> PathBuf {
    let mut path = root.to_path_buf();
    path.push(sample.collected_at.format("%Y/%m/%d/%H/%M/%S").to_string());
    path
}

#[must_use]
pub fn sample_json_path(root: &Path, sample: &Sample) -> PathBuf {
    sample_stem(root, sample).with_extension("json")
}

#[must_use]
pub fn sample_html_path(root: &Path, sample: &Sample) -> PathBuf {
    sample_stem(root, sample).with_extension("html")
}

#[must_use]
pub fn sample_markdown_path(root: &Path, sample: &Sample) -> PathBuf {
    sample_stem(root, sample).with_extension("md")
}

fn write_under(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    debug!("writing {}", path.display());
    fs::write(path, contents)?;
    Ok(())
}

/// Write one sample's JSON record under `root`.
pub fn write_sample_json(sample: &Sample, root: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(sample).map_err(Error::Format)?;
    write_under(&sample_json_path(root, sample), &json)
}

/// Write one sample's standalone HTML page under `root`.
pub fn write_sample_html(sample: &Sample, root: &Path, chrome: &PageChrome) -> Result<()> {
    write_under(
        &sample_html_path(root, sample),
        &render::sample_page(sample, chrome),
    )
}

/// Write one sample's markdown report under `root`.
pub fn write_sample_markdown(sample: &Sample, root: &Path) -> Result<()> {
    write_under(&sample_markdown_path(root, sample), &sample.markdown())
}

/// Persist every sample as a JSON+HTML pair under `root`.
///
/// Idempotent: identically named files are overwritten, never duplicated.
pub fn write_samples(series: &Series, root: &Path, chrome: &PageChrome) -> Result<()> {
    debug!("saving {} samples as individual files", series.len());
    for sample in series.samples() {
        write_sample_json(sample, root)?;
        write_sample_html(sample, root, chrome)?;
    }
    Ok(())
}
