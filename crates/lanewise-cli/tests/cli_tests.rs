//! End-to-end tests for the `lanewise` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn lanewise() -> Command {
    let mut cmd = Command::cargo_bin("lanewise").expect("binary builds");
    cmd.env("NO_COLOR", "1")
        .env("RUST_LOG", "warn")
        .env_remove("LANEWISE_DISABLED_TARGETS")
        .env_remove("LANEWISE_CONFIG");
    cmd
}

#[test]
fn test_targets_table_lists_every_target() {
    lanewise()
        .arg("targets")
        .assert()
        .success()
        .stdout(predicate::str::contains("avx512"))
        .stdout(predicate::str::contains("neon"))
        .stdout(predicate::str::contains("scalar"))
        .stdout(predicate::str::contains("Best target:"));
}

#[test]
fn test_targets_json() {
    let output = lanewise().args(["targets", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let targets = json["targets"].as_array().unwrap();
    assert_eq!(targets.len(), 5);
    assert_eq!(targets[4]["target"], "scalar");
    assert_eq!(targets[4]["enabled"], true);
    assert!(json["best"].is_string());
}

#[test]
fn test_sort_verifies_result() {
    lanewise()
        .args(["sort", "--type", "f64", "--order", "desc", "-n", "5000", "--runs", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sorted 5000 f64 keys"))
        .stdout(predicate::str::contains("verified: ok"));
}

#[test]
fn test_sort_every_pattern() {
    for pattern in ["random", "few-distinct", "sorted", "reversed", "all-equal"] {
        lanewise()
            .args(["sort", "-t", "u16", "-n", "3000", "-r", "1", "--pattern", pattern])
            .assert()
            .success()
            .stdout(predicate::str::contains("verified: ok"));
    }
}

#[test]
fn test_sort_json_report() {
    let output = lanewise()
        .args(["sort", "-t", "i64", "-n", "2048", "-r", "1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["key_type"], "i64");
    assert_eq!(report["order"], "ascending");
    assert_eq!(report["len"], 2048);
    assert_eq!(report["verified"], true);
}

#[test]
fn test_disable_flag_forces_scalar() {
    lanewise()
        .args(["--disable", "avx512,avx2,sse4,neon", "sort", "-n", "1000", "-r", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on scalar"));
}

#[test]
fn test_disable_env_var_forces_scalar() {
    lanewise()
        .env("LANEWISE_DISABLED_TARGETS", "avx512,avx2,sse4,neon")
        .args(["sort", "-t", "u32", "-n", "1000", "-r", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on scalar"));
}

#[test]
fn test_disabling_scalar_is_rejected() {
    lanewise()
        .args(["--disable", "scalar", "targets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scalar target cannot be disabled"));
}

#[test]
fn test_unknown_target_is_rejected() {
    lanewise()
        .args(["--disable", "mmx", "targets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown target: mmx"));
}

#[test]
fn test_config_file_is_applied() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[dispatch]\ndisabled_targets = [\"avx512\"]\n\n[logging]\nlevel = \"error\""
    )
    .unwrap();

    lanewise()
        .arg("--config")
        .arg(file.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("avx512"))
        .stdout(predicate::str::contains("level = \"error\""));
}

#[test]
fn test_missing_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    lanewise()
        .arg("--config")
        .arg(dir.path().join("typo.toml"))
        .arg("targets")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
