//! Percentage freezing properties

use tunnel_stats::{Sample, Snapshot};

use crate::fixtures::timestamp;

fn sample(rejected: u64, succeeded: u64, expired: u64) -> Sample {
    Sample::from_snapshot(&Snapshot {
        collected_at: timestamp(2026, 1, 1, 0, 0, 0),
        rejected,
        succeeded,
        expired,
    })
}

#[test]
fn zero_total_yields_zero_percentages() {
    let s = sample(0, 0, 0);
    assert_eq!(s.rejected_percent, 0);
    assert_eq!(s.succeeded_percent, 0);
    assert_eq!(s.expired_percent, 0);
}

#[test]
fn percentages_truncate_toward_zero() {
    // 1/3 each: 33 after truncation, never rounded up
    let s = sample(1, 1, 1);
    assert_eq!(s.rejected_percent, 33);
    assert_eq!(s.succeeded_percent, 33);
    assert_eq!(s.expired_percent, 33);
}

#[test]
fn truncated_percentages_need_not_sum_to_100() {
    let s = sample(1, 1, 1);
    let sum = s.rejected_percent + s.succeeded_percent + s.expired_percent;
    assert_eq!(sum, 99);
}

#[test]
fn exact_shares_divide_cleanly() {
    let s = sample(25, 50, 25);
    assert_eq!(s.rejected_percent, 25);
    assert_eq!(s.succeeded_percent, 50);
    assert_eq!(s.expired_percent, 25);
}

#[test]
fn counts_are_preserved_alongside_percentages() {
    let s = sample(7, 13, 2);
    assert_eq!(s.build_rejected, 7);
    assert_eq!(s.build_succeeded, 13);
    assert_eq!(s.build_expired, 2);
    // floor(100 * count / 22)
    assert_eq!(s.rejected_percent, 31);
    assert_eq!(s.succeeded_percent, 59);
    assert_eq!(s.expired_percent, 9);
}
