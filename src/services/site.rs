//! Site orchestration
//!
//! [`StatsSite`] binds the series to an absolute root directory and drives
//! the whole publishing cycle: load or seed the history, take one new
//! sample, persist everything, and regenerate the navigable output tree.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::io::series as store;
use crate::models::Series;
use crate::services::indexer;
use crate::services::links;
use crate::services::render::{self, MARKDOWN_FOOTER, MARKDOWN_HEADER, PageChrome};
use crate::{Result, SnapshotSource};

/// Home page file name at the site root.
pub const HOME_PAGE: &str = "index.html";
/// Markdown home page file name at the site root.
pub const MARKDOWN_HOME_PAGE: &str = "README.md";

/// A stats site bound to an absolute root directory.
///
/// Constructed once per run; its state is fully captured by the series
/// file and the files beneath the root.
#[derive(Debug)]
pub struct StatsSite {
    root: PathBuf,
    series: Series,
    chrome: PageChrome,
}

impl StatsSite {
    /// Open the site at `root`.
    ///
    /// Resolves `root` to an absolute path and creates it if needed. When a
    /// series file exists it is loaded and extended by one fresh sample;
    /// otherwise a new single-sample series is started. Construction only
    /// succeeds once the per-sample derived files AND the series file have
    /// been written — derived files first, so that a crash in between is
    /// recovered by re-deriving them from the authoritative series on the
    /// next run.
    pub fn open<P: AsRef<Path>>(root: P, source: &dyn SnapshotSource) -> Result<Self> {
        let root = std::path::absolute(root.as_ref())?;
        fs::create_dir_all(&root)?;

        let series_file = root.join(store::SERIES_FILE);
        let series = if series_file.exists() {
            debug!("series file exists: {}", series_file.display());
            let mut series = store::read_series(&series_file)?;
            series.update(source)?;
            series
        } else {
            info!(
                "no series file at {}, starting a new series",
                series_file.display()
            );
            Series::collect(source)?
        };

        let site = StatsSite {
            root,
            series,
            chrome: PageChrome::default(),
        };
        store::write_samples(&site.series, &site.root, &site.chrome)?;
        store::write_series(&site.series, &site.series_file())?;
        Ok(site)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn series(&self) -> &Series {
        &self.series
    }

    /// Well-known location of the series file inside the root.
    #[must_use]
    pub fn series_file(&self) -> PathBuf {
        self.root.join(store::SERIES_FILE)
    }

    pub fn set_chrome(&mut self, chrome: PageChrome) {
        self.chrome = chrome;
    }

    /// Rewrite every sample's standalone HTML page.
    pub fn output_pages(&self) -> Result<()> {
        for sample in self.series.samples() {
            store::write_sample_html(sample, &self.root, &self.chrome)?;
        }
        Ok(())
    }

    /// Rewrite every sample's markdown report.
    pub fn output_markdown_pages(&self) -> Result<()> {
        for sample in self.series.samples() {
            store::write_sample_markdown(sample, &self.root)?;
        }
        Ok(())
    }

    /// Write an `index.html` into each qualifying output directory.
    /// A no-op when none qualifies.
    pub fn generate_index_pages(&self) -> Result<()> {
        indexer::write_index_pages(&self.root, &self.chrome)
    }

    /// Markdown counterpart of [`StatsSite::generate_index_pages`].
    pub fn generate_markdown_index_pages(&self) -> Result<()> {
        indexer::write_markdown_index_pages(&self.root)
    }

    /// Render the whole series as the site home page.
    pub fn output_home_page(&self) -> Result<()> {
        let index = self.root.join(HOME_PAGE);
        info!("generating home page: {}", index.display());
        fs::write(&index, self.home_html()?)?;
        Ok(())
    }

    /// Render the whole series as a README-style markdown document.
    pub fn output_markdown_home_page(&self) -> Result<()> {
        let readme = self.root.join(MARKDOWN_HOME_PAGE);
        info!("generating markdown home page: {}", readme.display());
        fs::write(&readme, self.home_markdown()?)?;
        Ok(())
    }

    /// Full home page: chrome, nav section, rendered series body.
    /// Sanitized once, as a whole, after assembly.
    fn home_html(&self) -> Result<String> {
        let nav = indexer::nav_section(&self.root)?;
        let body = render::series_html(&self.series);
        let page = format!("{}{}{}{}", self.chrome.header, nav, body, self.chrome.footer);
        Ok(links::sanitize(&self.root, &page))
    }

    fn home_markdown(&self) -> Result<String> {
        let nav = indexer::markdown_nav_section(&self.root)?;
        let page = format!(
            "{}{}{}{}",
            MARKDOWN_HEADER,
            nav,
            self.series.markdown(),
            MARKDOWN_FOOTER
        );
        Ok(links::sanitize(&self.root, &page))
    }
}
