//! Integration tests for the openmedicaid CLI
//!
//! Each test runs the binary against a temporary data directory written by
//! the shared fixtures. `HOME` points at an empty directory so a user config
//! never leaks in.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use common::{ACME, TestData};

/// Helper function to create an openmedicaid command
fn openmedicaid(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("openmedicaid"));
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("OPENMEDICAID_DATA");
    cmd
}

/// Helper to run a command against a fixture directory
fn with_data(home: &TempDir, data: &TestData) -> assert_cmd::Command {
    let mut cmd = openmedicaid(home);
    cmd.arg("--data-dir").arg(data.path());
    cmd
}

// =============================================================================
// OVERVIEW
// =============================================================================

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    openmedicaid(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("openmedicaid v"));
}

#[test]
fn test_no_command_prints_hint() {
    let home = TempDir::new().unwrap();
    openmedicaid(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("--help"));
}

#[test]
fn test_stats() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("$1.09T"))
        .stdout(predicate::str::contains("618K"));
}

#[test]
fn test_stats_json() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    let output = with_data(&home, &data).args(["--json", "stats"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["totalPaid"], "$1.09T");
}

#[test]
fn test_missing_data_dir_fails() {
    let home = TempDir::new().unwrap();
    openmedicaid(&home)
        .args(["--data-dir", "/definitely/not/here", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_env_var_selects_data_dir() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    openmedicaid(&home)
        .env("OPENMEDICAID_DATA", data.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("$1.09T"));
}

// =============================================================================
// PROVIDERS
// =============================================================================

#[test]
fn test_watchlist() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .arg("watchlist")
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Home Care"))
        .stdout(predicate::str::contains("CRITICAL").or(predicate::str::contains("Critical")));
}

#[test]
fn test_watchlist_ml_tab() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .args(["watchlist", "--tab", "ml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valley Pharmacy"))
        .stdout(predicate::str::contains("Acme Home Care").not());
}

#[test]
fn test_watchlist_rejects_bad_tier() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .args(["watchlist", "--tier", "extreme"])
        .assert()
        .failure();
}

#[test]
fn test_provider_profile() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .args(["provider", ACME])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Home Care"))
        .stdout(predicate::str::contains("T1019"));
}

#[test]
fn test_unknown_provider_fails() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .args(["provider", "1000000001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1000000001"));
}

#[test]
fn test_check() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .args(["check", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Home Care"));
}

#[test]
fn test_check_requires_two_characters() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .args(["check", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2 characters"));
}

#[test]
fn test_check_rejects_blank_query() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .args(["check", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2 characters"));
}

// =============================================================================
// GEOGRAPHY, TRENDS & REFERENCE
// =============================================================================

#[test]
fn test_states() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .arg("states")
        .assert()
        .success()
        .stdout(predicate::str::contains("New York"))
        .stdout(predicate::str::contains("Florida"));
}

#[test]
fn test_state_detail() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .args(["state", "ny"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New York (NY)"));

    with_data(&home, &data).args(["state", "TX"]).assert().failure();
}

#[test]
fn test_trends() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .arg("trends")
        .assert()
        .success()
        .stdout(predicate::str::contains("2019"));
}

#[test]
fn test_exclusions() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .arg("exclusions")
        .assert()
        .success()
        .stdout(predicate::str::contains("By state"));
}

#[test]
fn test_ml() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .arg("ml")
        .assert()
        .success()
        .stdout(predicate::str::contains("AUC"))
        .stdout(predicate::str::contains("Valley Pharmacy"));
}

#[test]
fn test_flags() {
    let home = TempDir::new().unwrap();
    openmedicaid(&home)
        .arg("flags")
        .assert()
        .success()
        .stdout(predicate::str::contains("Code-Specific Cost Outlier"));
}

#[test]
fn test_fmt() {
    let home = TempDir::new().unwrap();
    openmedicaid(&home)
        .args(["fmt", "money", "1500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$2K"));

    openmedicaid(&home)
        .args(["fmt", "money", "-1500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-$2K"));

    openmedicaid(&home).args(["fmt", "money", "lots"]).assert().failure();
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_validate_good_fixtures() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("All fixtures look good."));
}

#[test]
fn test_validate_reports_bad_score() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    data.write(
        "ml-scores.json",
        &serde_json::json!({ "topProviders": [{ "npi": ACME, "mlScore": -0.5 }] }),
    );
    with_data(&home, &data)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("outside [0, 1]"));
}

#[test]
fn test_malformed_fixture_fails() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    data.write_raw("stats.json", "{ not json");
    with_data(&home, &data)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("stats.json"));
}

// =============================================================================
// FEED & SITEMAP
// =============================================================================

#[test]
fn test_feed_to_file() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("feed.xml");
    openmedicaid(&home)
        .arg("feed")
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let xml = fs::read_to_string(&out).unwrap();
    assert!(xml.contains("<rss"));
    assert!(xml.contains("https://openmedicaid.org/insights/"));
}

#[test]
fn test_sitemap() {
    let home = TempDir::new().unwrap();
    let data = TestData::new();
    with_data(&home, &data)
        .arg("sitemap")
        .assert()
        .success()
        .stdout(predicate::str::contains("<urlset"))
        .stdout(predicate::str::contains(format!("/providers/{ACME}")));
}
