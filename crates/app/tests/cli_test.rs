//! Integration tests for the `probe` binary's exit codes.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::process::Command;

use tempfile::tempdir;

fn probe() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_probe"));
    for name in [
        "PROBE_CONFIG",
        "PROBE_BASE_URL",
        "PROBE_TIMEOUT_MS",
        "PROBE_SUITE_TIMEOUT_MS",
        "PROBE_SEED",
        "PROBE_REPORT_JSON",
    ] {
        command.env_remove(name);
    }
    command.env("RUST_LOG", "warn");
    command
}

#[test]
fn test_invalid_config_exits_with_two() {
    let output = probe()
        .env("PROBE_BASE_URL", "ftp://dummyjson.com")
        .output()
        .expect("binary runs");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_malformed_env_value_exits_with_two() {
    let output = probe()
        .env("PROBE_TIMEOUT_MS", "ninety seconds")
        .output()
        .expect("binary runs");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unreachable_service_fails_every_case() {
    let dir = tempdir().expect("Failed to create temp directory");
    let report_path = dir.path().join("report.json");

    // Nothing listens on the discard port, so every call is a transport failure.
    let output = probe()
        .env("PROBE_BASE_URL", "http://127.0.0.1:9")
        .env("PROBE_TIMEOUT_MS", "2000")
        .env("PROBE_SEED", "42")
        .env("PROBE_REPORT_JSON", &report_path)
        .output()
        .expect("binary runs");

    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Running suite 'DummyJSON API - E-commerce' (13 cases)"));
    assert!(stdout.contains("0 passed, 13 failed, 0 skipped (13 total)"));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("report written"))
            .expect("valid JSON report");
    assert_eq!(report["total"], 13);
    assert_eq!(report["outcomes"].as_array().map(Vec::len), Some(13));
    assert_eq!(report["outcomes"][0]["failures"][0]["kind"], "transport");
}
