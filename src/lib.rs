//! Tunnel Build Statistics Library
//!
//! This library samples exploratory build-tunnel counters from a local I2P
//! router control endpoint, accumulates them in an append-only time series
//! (`series.json`), and renders the series as a static site: per-sample
//! HTML/JSON pairs under timestamp-derived paths, per-directory navigation
//! indices, and a home page.

pub mod cli;
pub mod io;
pub mod models;
pub mod services;

pub use models::{Sample, Series};
pub use services::render::PageChrome;
pub use services::site::StatsSite;

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::result;

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    /// The snapshot source could not be reached or refused the request.
    Source(String),
    /// The series file is absent where a load was explicitly requested.
    NotFound(PathBuf),
    /// The series file is present but cannot be decoded.
    Format(serde_json::Error),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Source(msg) => write!(f, "snapshot source unavailable: {msg}"),
            Error::NotFound(path) => write!(f, "series file not found: {}", path.display()),
            Error::Format(e) => write!(f, "malformed series document: {e}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Format(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// One raw observation obtained from a snapshot source.
///
/// Transient: percentages are derived and frozen when the snapshot is turned
/// into a [`Sample`], and only samples are ever persisted.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    pub collected_at: DateTime<Utc>,
    pub rejected: u64,
    pub succeeded: u64,
    pub expired: u64,
}

/// Supplier of raw tunnel build counters.
///
/// Any failure is a hard stop for the sampling attempt: no partial or
/// zero-valued record may reach the series.
pub trait SnapshotSource {
    fn snapshot(&self) -> Result<Snapshot>;
}

/// Open the site at `root`, taking one new sample, and write the full HTML
/// output tree: per-sample pages, per-directory indices, and the home page.
///
/// # Arguments
/// * `root` - The site root directory (created if necessary)
/// * `source` - Supplier of the new sample's counters
pub fn publish<P: AsRef<Path>>(root: P, source: &dyn SnapshotSource) -> Result<StatsSite> {
    let site = StatsSite::open(root, source)?;
    site.output_pages()?;
    site.generate_index_pages()?;
    site.output_home_page()?;
    Ok(site)
}
