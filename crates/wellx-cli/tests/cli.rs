use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const REPORT: &str = "\
WELL COMPLETION OR RECOMPLETION REPORT
Well Name and Number: BISON UNIT 4-12H
Operator: ACME OIL & GAS LLC
API No: 33 053 12345 01
Stimulation Stages: 30
";

fn wellx() -> Command {
    Command::cargo_bin("wellx").unwrap()
}

fn write_report(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, REPORT).unwrap();
    path
}

#[test]
fn process_text_file_as_json() {
    let dir = TempDir::new().unwrap();
    let input = write_report(&dir, "report.txt");

    wellx()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"api_number\": \"33-053-12345-01\""))
        .stdout(predicate::str::contains("\"well_name_number\": \"BISON UNIT 4-12H\""))
        .stdout(predicate::str::contains("\"latitude\": null"));
}

#[test]
fn process_text_file_as_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_report(&dir, "report.txt");
    let output = dir.path().join("out.csv");

    wellx()
        .args(["process", "--format", "csv", "--output"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("operator_company,well_name_number,api_number"));
    assert!(lines.next().unwrap().contains("33-053-12345-01"));
}

#[test]
fn process_missing_file_fails() {
    wellx()
        .args(["process", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn process_unsupported_format_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("scan.png");
    fs::write(&input, "png").unwrap();

    wellx()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn batch_writes_summary_and_jsonl() {
    let dir = TempDir::new().unwrap();
    write_report(&dir, "a.txt");
    write_report(&dir, "b.txt");
    write_report(&dir, "ocr_a.txt");
    let out = dir.path().join("out");
    let jsonl = dir.path().join("records.jsonl");

    wellx()
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .arg("--jsonl")
        .arg(&jsonl)
        .args(["-j", "2"])
        .assert()
        .success();

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());
    assert!(!out.join("ocr_a.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let rows: Vec<_> = summary.lines().collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].starts_with("a.txt,success,"));
    assert!(rows[2].starts_with("b.txt,success,"));

    let records = fs::read_to_string(&jsonl).unwrap();
    assert_eq!(records.lines().count(), 2);
    assert!(records.contains("\"api_number\":\"33-053-12345-01\""));
}

#[test]
fn batch_without_matches_fails() {
    let dir = TempDir::new().unwrap();

    wellx()
        .arg("batch")
        .arg(format!("{}/*.pdf", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    wellx()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    wellx()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "coordinates.neighbor_radius", "40"])
        .assert()
        .success();

    wellx()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "coordinates.neighbor_radius"])
        .assert()
        .success()
        .stdout(predicate::str::contains("40"));

    wellx()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
