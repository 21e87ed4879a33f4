//! Integration tests for the ledger processor CLI.
//!
//! These tests run the actual binary and compare its JSON output against
//! expected files.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Run the binary with the given input file and return parsed stdout
fn run_processor(input_file: &str) -> Value {
    let mut cmd = Command::cargo_bin("ledger-processor").unwrap();
    let assert = cmd.arg(input_file).assert().success();
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

fn expected(filename: &str) -> Value {
    let text = fs::read_to_string(test_data_path(filename)).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_sample_account() {
    let output = run_processor(&test_data_path("sample_account.json"));
    assert_eq!(output, expected("expected_sample.json"));
}

#[test]
fn test_malformed_account() {
    let output = run_processor(&test_data_path("malformed_account.json"));
    assert_eq!(output, expected("expected_malformed.json"));
}

#[test]
fn test_rejected_fields_keep_original_order() {
    let file = write_temp(
        r#"{"initialBalance": 0, "transactions": [{"memo": "x", "amount": 5, "type": "withdraw"}]}"#,
    );

    let output = run_processor(file.path().to_str().unwrap());
    let rejected = output["rejectedTransactions"][0].as_object().unwrap();
    let keys: Vec<&str> = rejected.keys().map(String::as_str).collect();
    assert_eq!(keys, ["memo", "amount", "type", "reason"]);
}

#[test]
fn test_any_json_shape_produces_a_result() {
    for input in ["null", "[]", "\"ACC\"", "42", "{}", r#"{"transactions": "none"}"#] {
        let file = write_temp(input);
        let output = run_processor(file.path().to_str().unwrap());

        assert_eq!(output["openingBalance"], "0", "input {}", input);
        assert_eq!(output["finalBalance"], "0", "input {}", input);
        assert_eq!(output["appliedTransactions"], Value::Array(Vec::new()));
        assert_eq!(output["rejectedTransactions"], Value::Array(Vec::new()));
    }
}

#[test]
fn test_invalid_json_error() {
    let file = write_temp("{ not json");

    let mut cmd = Command::cargo_bin("ledger-processor").unwrap();
    cmd.arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON error"));
}

#[test]
fn test_missing_file_error() {
    let mut cmd = Command::cargo_bin("ledger-processor").unwrap();
    cmd.arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_missing_argument_error() {
    let mut cmd = Command::cargo_bin("ledger-processor").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing input file"));
}

#[test]
fn test_output_uses_camel_case_keys() {
    let output = run_processor(&test_data_path("sample_account.json"));
    let keys: Vec<&str> = output.as_object().unwrap().keys().map(String::as_str).collect();

    assert_eq!(
        keys,
        [
            "accountNumber",
            "accountHolder",
            "currency",
            "openingBalance",
            "finalBalance",
            "appliedTransactions",
            "rejectedTransactions"
        ]
    );
}
