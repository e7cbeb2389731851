//! End-to-end tests of the `dns-impact` binary
//!
//! Only `localhost` and names under the reserved `.invalid` TLD are probed,
//! so the outcome does not depend on external DNS.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

const CONFIG_VARS: &[&str] = &[
    "DOMAINS", "BAD_DOMAIN", "TIMEOUT_SECONDS", "CSV_PATH", "CHART_PATH",
    "ENABLE_CHART", "DNS_SERVERS", "ENABLE_COLOR", "LOG_LEVEL", "LOG_FORMAT",
];

/// Command running inside `dir` with no configuration leaking in
fn create_test_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dns-impact").unwrap();
    cmd.current_dir(dir.path());
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_options() {
    let dir = TempDir::new().unwrap();

    create_test_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-chart"))
        .stdout(predicate::str::contains("--dns-server"))
        .stdout(predicate::str::contains("--bad-domain"))
        .stdout(predicate::str::contains("--log-level"))
        .stdout(predicate::str::contains("TIMEOUT_SECONDS"));
}

#[test]
fn test_run_without_chart_writes_csv_only() {
    let dir = TempDir::new().unwrap();

    create_test_cmd(&dir)
        .args(["--domain", "localhost", "--bad-domain", "nothing-here.invalid"])
        .args(["--no-chart", "--no-color", "--timeout", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("success=true"))
        .stdout(predicate::str::contains("success=false"))
        .stdout(predicate::str::contains("Error: "))
        .stdout(predicate::str::contains("[CSV] Saved: dns_results.csv"))
        .stdout(predicate::str::contains("[Plot] charts disabled, skipping plot."));

    let csv = std::fs::read_to_string(dir.path().join("dns_results.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "timestamp,domain,success,duration_ms,error");
    assert!(lines[1].contains(",localhost,true,"));
    assert!(lines[2].contains(",nothing-here.invalid,false,"));
    assert!(!dir.path().join("dns_times.png").exists());
}

#[test]
fn test_env_file_supplies_configuration() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        "DOMAINS=localhost\nBAD_DOMAIN=from-env.invalid\nCSV_PATH=env.csv\nENABLE_CHART=false\n",
    )
    .unwrap();

    create_test_cmd(&dir)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("from-env.invalid"));

    let csv = std::fs::read_to_string(dir.path().join("env.csv")).unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn test_invalid_timeout_is_configuration_error() {
    let dir = TempDir::new().unwrap();

    create_test_cmd(&dir)
        .args(["--timeout", "0", "--no-color"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unwritable_csv_exits_with_io_code() {
    let dir = TempDir::new().unwrap();

    create_test_cmd(&dir)
        .args(["--domain", "localhost", "--bad-domain", "nothing-here.invalid"])
        .args(["--csv", "missing-dir/out.csv", "--no-chart", "--no-color"])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_log_settings_from_environment() {
    let dir = TempDir::new().unwrap();

    create_test_cmd(&dir)
        .env("LOG_LEVEL", "info")
        .env("LOG_FORMAT", "compact")
        .args(["--domain", "localhost", "--bad-domain", "nothing-here.invalid"])
        .args(["--no-chart", "--no-color"])
        .assert()
        .success()
        .stderr(predicate::str::contains(" I app: Starting probe run"));
}

#[test]
fn test_log_flags_override_environment() {
    let dir = TempDir::new().unwrap();

    create_test_cmd(&dir)
        .env("LOG_FORMAT", "compact")
        .args(["--domain", "localhost", "--bad-domain", "nothing-here.invalid"])
        .args(["--no-chart", "--no-color", "--log-level", "info", "--log-format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\"message\":\"Starting probe run\""));
}

#[test]
fn test_invalid_log_level_in_environment_is_configuration_error() {
    let dir = TempDir::new().unwrap();

    create_test_cmd(&dir)
        .env("LOG_LEVEL", "loud")
        .arg("--no-color")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("LOG_LEVEL"));
}
