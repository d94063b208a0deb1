//! Integration tests for the VDIFF CLI tool.
//!
//! These tests run the binary end to end: argument parsing, file parsing,
//! output formatting and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Helper to create a Command for the vdiff binary
fn vdiff() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("vdiff"))
}

fn fixture(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create fixture");
    writeln!(file, "{}", content).expect("write fixture");
    file
}

#[test]
fn test_identical_files_exit_0() {
    let old = fixture(".json", r#"{"name": "Alice", "tags": ["a", "b"]}"#);
    let new = fixture(".json", r#"{ "tags": [ "a", "b" ], "name": "Alice" }"#);
    vdiff()
        .arg(old.path())
        .arg(new.path())
        .assert()
        .success()
        .code(0)
        .stdout(predicate::str::contains("No changes detected."));
}

#[test]
fn test_modified_field_exit_1() {
    let old = fixture(".json", r#"{"name": "Alice", "age": 30}"#);
    let new = fixture(".json", r#"{"name": "Alice", "age": 31}"#);
    vdiff()
        .arg(old.path())
        .arg(new.path())
        .arg("--no-color")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("age: 30 -> 31"))
        .stdout(predicate::str::contains("Summary: 1 modified, 1 unchanged"));
}

#[test]
fn test_file_not_found_exit_2() {
    let existing = fixture(".json", "{}");
    vdiff()
        .arg("/nonexistent/missing.json")
        .arg(existing.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_invalid_json_exit_2() {
    let old = fixture(".json", "{not json");
    let new = fixture(".json", "{}");
    vdiff()
        .arg(old.path())
        .arg(new.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON"));
}

#[test]
fn test_mixed_formats() {
    let old = fixture(".yaml", "server:\n  host: localhost\n  port: 8080");
    let new = fixture(".toml", "[server]\nhost = \"localhost\"\nport = 8081");
    vdiff()
        .arg(old.path())
        .arg(new.path())
        .arg("--no-color")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("server.port: 8080 -> 8081"));
}

#[test]
fn test_id_key_matches_reordered_elements() {
    let old = fixture(".json", r#"[{"id": 1, "v": "a"}, {"id": 2, "v": "b"}]"#);
    let new = fixture(".json", r#"[{"id": 2, "v": "b"}, {"id": 1, "v": "a"}]"#);

    vdiff().arg(old.path()).arg(new.path()).assert().code(1);

    vdiff()
        .arg(old.path())
        .arg(new.path())
        .args(["--id-key", "id"])
        .assert()
        .code(0);
}

#[test]
fn test_sort_array_items_flag() {
    let old = fixture(".json", "[3, 1, 2]");
    let new = fixture(".json", "[1, 2, 3]");

    vdiff().arg(old.path()).arg(new.path()).assert().code(1);
    vdiff()
        .arg(old.path())
        .arg(new.path())
        .arg("-s")
        .assert()
        .code(0);
}

#[test]
fn test_annotated_format() {
    let old = fixture(".json", r#"{"keep": 1, "drop": 2}"#);
    let new = fixture(".json", r#"{"keep": 1, "add": 3}"#);
    vdiff()
        .arg(old.path())
        .arg(new.path())
        .args(["--format", "annotated", "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("drop: 2, // -"))
        .stdout(predicate::str::contains("add: 3, // +"));
}

#[test]
fn test_side_by_side_format() {
    let old = fixture(".json", r#"{"a": 1}"#);
    let new = fixture(".json", r#"{"a": 2}"#);
    vdiff()
        .arg(old.path())
        .arg(new.path())
        .args(["-f", "side-by-side", "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("source | target"))
        .stdout(predicate::str::contains("  a: 1, |   a: 2,"));
}

#[test]
fn test_json_format() {
    let old = fixture(".json", r#"{"a": 1}"#);
    let new = fixture(".json", r#"{"a": 2}"#);
    let output = vdiff()
        .arg(old.path())
        .arg(new.path())
        .args(["-f", "json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["changed"], serde_json::json!(true));
    assert_eq!(value["children"]["a"]["sourceValue"], serde_json::json!(1));
}

#[test]
fn test_quiet_mode_prints_nothing() {
    let old = fixture(".json", r#"{"a": 1}"#);
    let new = fixture(".json", r#"{"a": 2}"#);
    vdiff()
        .arg(old.path())
        .arg(new.path())
        .arg("--quiet")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_stdin_input() {
    let new = fixture(".json", r#"{"a": 2}"#);
    vdiff()
        .arg("-")
        .arg(new.path())
        .arg("--no-color")
        .write_stdin("a: 1\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("a: 1 -> 2"));
}

#[test]
fn test_stdin_twice_is_rejected() {
    vdiff()
        .args(["-", "-"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("standard input"));
}

#[test]
fn test_invalid_format_argument() {
    let file = fixture(".json", "{}");
    vdiff()
        .arg(file.path())
        .arg(file.path())
        .args(["--format", "xml"])
        .assert()
        .failure();
}

#[test]
fn test_help_flag() {
    vdiff()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Structural diff"));
}
