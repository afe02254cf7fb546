//! Integration tests for the tenor binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn tenor() -> Command {
    Command::cargo_bin("tenor").unwrap()
}

#[test]
fn daycount_minimal_prints_fraction() {
    tenor()
        .args(["daycount", "2024-01-01", "2024-07-01", "-d", "30/360", "-f", "minimal"])
        .assert()
        .success()
        .stdout("0.5\n");
}

#[test]
fn daycount_json_lists_every_convention() {
    tenor()
        .args(["daycount", "2024-01-01", "2025-01-01", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ACT/ACT ISDA\""))
        .stdout(predicate::str::contains("\"1/1\""));
}

#[test]
fn adjust_saturday_following() {
    tenor()
        .args(["adjust", "2025-05-31", "-b", "following", "-f", "minimal"])
        .assert()
        .success()
        .stdout("2025-06-02\n");
}

#[test]
fn schedule_csv_has_header_and_four_periods() {
    let output = tenor()
        .args([
            "schedule",
            "2024-01-01",
            "2025-01-01",
            "--frequency",
            "3M",
            "-f",
            "csv",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("index,adjusted_start"));
}

#[test]
fn observations_respect_config_file() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "max_observations = 10").unwrap();

    tenor()
        .args(["observations", "2025-01-01", "2025-03-01", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds 10"));
}

#[test]
fn interest_payment_is_rounded() {
    tenor()
        .args([
            "interest",
            "2025-01-01",
            "2025-04-01",
            "--notional",
            "1000000",
            "--rate",
            "0.05",
            "-f",
            "minimal",
        ])
        .assert()
        .success()
        // 90/360 of 50,000
        .stdout("12500\n");
}

#[test]
fn interest_leg_lists_cashflows() {
    tenor()
        .args([
            "interest",
            "2025-01-15",
            "2026-01-15",
            "-n",
            "1000000",
            "-r",
            "0.04",
            "-d",
            "30/360",
            "--leg",
            "6M",
            "-f",
            "minimal",
        ])
        .assert()
        .success()
        .stdout("20000\n20000\n");
}

#[test]
fn compound_straight() {
    tenor()
        .args(["compound", "--rates", "0.01,0.02", "--method", "straight", "-f", "minimal"])
        .assert()
        .success()
        .stdout("0.0302\n");
}

#[test]
fn rejects_negative_rate() {
    tenor()
        .args([
            "interest",
            "2025-01-01",
            "2025-04-01",
            "--notional",
            "1000000",
            "--rate=-0.01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid rate"));
}

#[test]
fn rejects_reversed_schedule() {
    tenor()
        .args(["schedule", "2025-01-01", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid dates"));
}
