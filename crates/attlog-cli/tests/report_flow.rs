//! End-to-end tests for the attlog binary.
//!
//! Drives the real binary over temp dump fixtures: report table output,
//! JSON output, date-range filtering, and the events diagnostic dump.

use std::io::Write;
use std::process::Command;

use tempfile::TempDir;

fn attlog_binary() -> String {
    env!("CARGO_BIN_EXE_attlog").to_string()
}

/// Writes a punch dump and users file into a temp directory.
fn write_fixtures(dump_lines: &[&str], users_json: &str) -> TempDir {
    let temp = TempDir::new().unwrap();

    let mut dump = std::fs::File::create(temp.path().join("punches.jsonl")).unwrap();
    for line in dump_lines {
        writeln!(dump, "{line}").unwrap();
    }

    let mut users = std::fs::File::create(temp.path().join("users.json")).unwrap();
    write!(users, "{users_json}").unwrap();

    temp
}

fn run_attlog(temp: &TempDir, args: &[&str]) -> std::process::Output {
    Command::new(attlog_binary())
        .arg(args[0])
        .arg("--events")
        .arg(temp.path().join("punches.jsonl"))
        .arg("--users")
        .arg(temp.path().join("users.json"))
        .args(&args[1..])
        .output()
        .expect("failed to run attlog")
}

#[test]
fn report_renders_reconstructed_sessions() {
    let temp = write_fixtures(
        &[
            r#"{"user_id":"1","timestamp":"2024-01-01T17:30:00","punch":1}"#,
            r#"{"user_id":"1","timestamp":"2024-01-01T09:00:00","punch":0}"#,
        ],
        r#"{"1":"Amira"}"#,
    );

    let output = run_attlog(&temp, &["report"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Amira"), "stdout: {stdout}");
    assert!(stdout.contains("2024-01-01 09:00:00"), "stdout: {stdout}");
    assert!(stdout.contains("8.50"), "stdout: {stdout}");
}

#[test]
fn report_json_output_is_parseable() {
    let temp = write_fixtures(
        &[
            r#"{"user_id":"1","timestamp":"2024-01-01T09:00:00","punch":0}"#,
            r#"{"user_id":"1","timestamp":"2024-01-01T17:30:00","punch":1}"#,
        ],
        r#"{"1":"Amira"}"#,
    );

    let output = run_attlog(&temp, &["report", "--json"]);
    assert!(output.status.success());

    let records: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["user_name"], "Amira");
    assert_eq!(records[0]["date"], "2024-01-01");
    assert!((records[0]["duration_hours"].as_f64().unwrap() - 8.5).abs() < 1e-9);
}

#[test]
fn report_applies_date_range() {
    let temp = write_fixtures(
        &[
            r#"{"user_id":"1","timestamp":"2024-01-01T09:00:00","punch":0}"#,
            r#"{"user_id":"1","timestamp":"2024-02-01T09:00:00","punch":0}"#,
        ],
        r#"{"1":"Amira"}"#,
    );

    let output = run_attlog(
        &temp,
        &["report", "--start", "2024-01-01", "--end", "2024-01-31", "--json"],
    );
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 1);
}

#[test]
fn orphan_check_out_produces_empty_report() {
    let temp = write_fixtures(
        &[r#"{"user_id":"1","timestamp":"2024-01-01T18:00:00","punch":1}"#],
        r#"{"1":"Amira"}"#,
    );

    let output = run_attlog(&temp, &["report"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("No attendance sessions."), "stdout: {stdout}");
}

#[test]
fn unresolved_users_fall_back_to_sentinel() {
    let temp = write_fixtures(
        &[r#"{"user_id":"42","timestamp":"2024-01-01T09:00:00","punch":0}"#],
        r"{}",
    );

    let output = run_attlog(&temp, &["report"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Unknown"), "stdout: {stdout}");
}

#[test]
fn events_dumps_normalized_jsonl() {
    let temp = write_fixtures(
        &[
            r#"{"user_id":"1","timestamp":"2024-01-01T09:00:00","punch":0}"#,
            r#"{"user_id":"1","timestamp":"2024-01-01T12:00:00","punch":7}"#,
        ],
        r#"{"1":"Amira"}"#,
    );

    let output = run_attlog(&temp, &["events"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);

    // Unknown punches survive normalization with their original code
    let unknown: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(unknown["kind"]["unknown"], 7);
}

#[test]
fn config_file_supplies_default_paths() {
    let temp = write_fixtures(
        &[r#"{"user_id":"1","timestamp":"2024-01-01T09:00:00","punch":0}"#],
        r#"{"1":"Amira"}"#,
    );

    let config_path = temp.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "events_path = {:?}\nusers_path = {:?}\n",
            temp.path().join("punches.jsonl"),
            temp.path().join("users.json"),
        ),
    )
    .unwrap();

    let output = Command::new(attlog_binary())
        .arg("--config")
        .arg(&config_path)
        .arg("report")
        .output()
        .expect("failed to run attlog");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Amira"), "stdout: {stdout}");
}
