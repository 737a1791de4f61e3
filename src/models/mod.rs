//! Data models for tunnel build samples and their append-only series

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, Snapshot, SnapshotSource};

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// A single timestamped record of tunnel build counters.
///
/// Percentages are computed once, when the sample is created from a
/// [`Snapshot`], and are never recomputed afterwards. Decoding is lenient:
/// missing fields fall back to zero (the timestamp to the Unix epoch) so
/// that older series files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    #[serde(default = "epoch")]
    pub collected_at: DateTime<Utc>,
    #[serde(default)]
    pub build_rejected: u64,
    #[serde(default)]
    pub build_succeeded: u64,
    #[serde(default)]
    pub build_expired: u64,
    #[serde(default)]
    pub rejected_percent: u64,
    #[serde(default)]
    pub succeeded_percent: u64,
    #[serde(default)]
    pub expired_percent: u64,
}

fn percent(count: u64, total: u64) -> u64 {
    count * 100 / total
}

impl Sample {
    /// Freeze a snapshot into a sample, deriving the percentage fields.
    ///
    /// The divisor is floored to 1 so that an all-zero snapshot yields
    /// all-zero percentages instead of a division by zero.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let total = (snapshot.rejected + snapshot.succeeded + snapshot.expired).max(1);
        Sample {
            collected_at: snapshot.collected_at,
            build_rejected: snapshot.rejected,
            build_succeeded: snapshot.succeeded,
            build_expired: snapshot.expired,
            rejected_percent: percent(snapshot.rejected, total),
            succeeded_percent: percent(snapshot.succeeded, total),
            expired_percent: percent(snapshot.expired, total),
        }
    }

    /// Take one fresh sample from `source`.
    ///
    /// On failure the error is propagated and no sample survives; callers
    /// must not append anything for a failed attempt.
    pub fn collect(source: &dyn SnapshotSource) -> Result<Self> {
        let snapshot = source.snapshot()?;
        Ok(Self::from_snapshot(&snapshot))
    }

    /// Timestamp string used for container ids and report headings.
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.collected_at.to_rfc3339()
    }

    /// Fixed-format report section for this sample.
    #[must_use]
    pub fn markdown(&self) -> String {
        format!(
            "### Stats for: {}\n\n \
             - Exploratory Build Success Percentage: {}\n \
             - Exploratory Build Rejection Percentage: {}\n \
             - Exploratory Build Expired Percentage: {}\n \
             - Exploratory Build Success: {}\n \
             - Exploratory Build Reject: {}\n \
             - Exploratory Build Expired: {}\n",
            self.timestamp(),
            self.succeeded_percent,
            self.rejected_percent,
            self.expired_percent,
            self.build_succeeded,
            self.build_rejected,
            self.build_expired,
        )
    }
}

/// Report header preceding the per-sample sections.
const REPORT_HEADER: &str = "Exploratory Build Stats Log\n---------------------------\n";

/// Append-only, chronologically ordered history of samples.
///
/// Serializes transparently as a JSON array of samples; the series file is
/// the single source of truth, per-sample files are a derived view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    /// Start a new series with exactly one fresh sample.
    pub fn collect(source: &dyn SnapshotSource) -> Result<Self> {
        Ok(Series {
            samples: vec![Sample::collect(source)?],
        })
    }

    /// Append one fresh sample.
    ///
    /// Leaves the series untouched when the source fails.
    pub fn update(&mut self, source: &dyn SnapshotSource) -> Result<()> {
        let sample = Sample::collect(source)?;
        self.samples.push(sample);
        Ok(())
    }

    /// Append an existing sample. Samples are never reordered or removed.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whole-series report: fixed header plus every sample in order.
    #[must_use]
    pub fn markdown(&self) -> String {
        let mut out = String::from(REPORT_HEADER);
        for sample in &self.samples {
            out.push('\n');
            out.push_str(&sample.markdown());
        }
        out.push('\n');
        out
    }
}
