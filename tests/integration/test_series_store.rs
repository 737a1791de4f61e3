//! Series persistence round-trips and failure modes

use std::fs;

use tempfile::TempDir;
use tunnel_stats::io::series::{read_series, write_series};
use tunnel_stats::{Error, Sample, Series, Snapshot};

use crate::fixtures::{ClockedSource, FailingSource, timestamp};

fn series_of(counters: &[(u32, u64, u64, u64)]) -> Series {
    let mut series = Series::default();
    for &(hour, rejected, succeeded, expired) in counters {
        series.push(Sample::from_snapshot(&Snapshot {
            collected_at: timestamp(2026, 1, 2, hour, 0, 0),
            rejected,
            succeeded,
            expired,
        }));
    }
    series
}

#[test]
fn roundtrip_preserves_order_and_fields() {
    let series = series_of(&[(1, 10, 5, 1), (2, 20, 5, 1), (3, 0, 0, 0)]);
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("series.json");

    write_series(&series, &path).unwrap();
    let loaded = read_series(&path).unwrap();

    assert_eq!(loaded.len(), series.len());
    for (orig, read) in series.samples().iter().zip(loaded.samples()) {
        assert_eq!(read.collected_at, orig.collected_at);
        assert_eq!(read.build_rejected, orig.build_rejected);
        assert_eq!(read.build_succeeded, orig.build_succeeded);
        assert_eq!(read.build_expired, orig.build_expired);
        assert_eq!(read.rejected_percent, orig.rejected_percent);
        assert_eq!(read.succeeded_percent, orig.succeeded_percent);
        assert_eq!(read.expired_percent, orig.expired_percent);
    }
}

#[test]
fn missing_series_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    let err = read_series(&temp.path().join("series.json")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn garbage_series_file_is_a_format_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("series.json");
    fs::write(&path, "{not json").unwrap();
    let err = read_series(&path).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}

#[test]
fn unknown_and_missing_fields_decode_to_zero() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("series.json");
    fs::write(
        &path,
        r#"[
            {"collected_at": "2026-01-02T03:04:05Z", "build_rejected": 7, "extra_field": true},
            {}
        ]"#,
    )
    .unwrap();

    let loaded = read_series(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.samples()[0].collected_at, timestamp(2026, 1, 2, 3, 4, 5));
    assert_eq!(loaded.samples()[0].build_rejected, 7);
    assert_eq!(loaded.samples()[0].build_succeeded, 0);
    assert_eq!(loaded.samples()[0].succeeded_percent, 0);
    assert_eq!(loaded.samples()[1].build_rejected, 0);
}

#[test]
fn update_appends_exactly_one_on_success() {
    let mut series = series_of(&[(1, 1, 1, 1)]);
    let source = ClockedSource {
        at: timestamp(2026, 1, 2, 4, 0, 0),
        rejected: 2,
        succeeded: 2,
        expired: 2,
    };

    series.update(&source).unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series.samples()[1].collected_at, timestamp(2026, 1, 2, 4, 0, 0));
}

#[test]
fn update_leaves_series_unchanged_on_failure() {
    let mut series = series_of(&[(1, 1, 1, 1), (2, 2, 2, 2)]);
    let err = series.update(&FailingSource).unwrap_err();
    assert!(matches!(err, Error::Source(_)));
    assert_eq!(series.len(), 2);
}
