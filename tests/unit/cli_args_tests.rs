//! Unit tests for CLI argument parsing

use tunnel_stats::cli::args::{OutputMode, parse_args};

fn make_args(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn defaults_with_no_options() {
    let parsed = parse_args(&make_args(&["tunnel-stats"])).expect("parse empty args");
    assert_eq!(parsed.dir, ".");
    assert_eq!(parsed.endpoint, "http://127.0.0.1:7657/jsonrpc");
    assert_eq!(parsed.password, "itoopie");
    assert!(parsed.offline.is_none());
    assert!(parsed.mode.is_none());
    assert!(parsed.stage);
}

#[test]
fn parse_dir_and_endpoint() {
    let parsed = parse_args(&make_args(&[
        "tunnel-stats",
        "--dir",
        "/srv/site",
        "--endpoint",
        "http://10.0.0.2:7657/jsonrpc",
    ]))
    .expect("parse args");
    assert_eq!(parsed.dir, "/srv/site");
    assert_eq!(parsed.endpoint, "http://10.0.0.2:7657/jsonrpc");
}

#[test]
fn parse_offline_counters() {
    let parsed = parse_args(&make_args(&["tunnel-stats", "--offline", "12,40,3"]))
        .expect("parse offline args");
    assert_eq!(parsed.offline, Some((12, 40, 3)));
}

#[test]
fn offline_rejects_malformed_triples() {
    let err = parse_args(&make_args(&["tunnel-stats", "--offline", "12,40"]))
        .expect_err("two counters should fail");
    assert!(err.contains("--offline"));

    let err = parse_args(&make_args(&["tunnel-stats", "--offline", "a,b,c"]))
        .expect_err("non-numeric counters should fail");
    assert!(err.contains("--offline"));
}

#[test]
fn mode_flags_select_output() {
    let parsed = parse_args(&make_args(&["tunnel-stats", "--markdown"])).unwrap();
    assert_eq!(parsed.mode, Some(OutputMode::Markdown));

    let parsed = parse_args(&make_args(&["tunnel-stats", "--html"])).unwrap();
    assert_eq!(parsed.mode, Some(OutputMode::Html));
}

#[test]
fn no_stage_flag_disables_staging() {
    let parsed = parse_args(&make_args(&["tunnel-stats", "--no-stage"])).unwrap();
    assert!(!parsed.stage);
}

#[test]
fn dir_flag_requires_value() {
    let err = parse_args(&make_args(&["tunnel-stats", "--dir"]))
        .expect_err("dir flag without value should fail");
    assert!(err.contains("--dir requires"));
}

#[test]
fn unknown_option_is_rejected() {
    let err = parse_args(&make_args(&["tunnel-stats", "--bogus"]))
        .expect_err("unknown option should fail");
    assert!(err.contains("Unknown option"));
}
