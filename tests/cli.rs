//! Integration tests for the `stree` command line.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Temp dir holding a sequence file with known content
fn fixture(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("sequences.txt");
    fs::write(&path, content).expect("Failed to write fixture");
    (dir, path)
}

fn stree(args: &[&str], file: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stree"))
        .args(args)
        .arg(file)
        .arg("--color")
        .arg("never")
        .output()
        .expect("Failed to run stree")
}

fn stree_with(args: &[&str], file: &Path, rest: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stree"))
        .args(args)
        .arg(file)
        .args(rest)
        .args(["--color", "never"])
        .output()
        .expect("Failed to run stree")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "stree failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn stats_reports_counts() {
    let (_dir, file) = fixture("BANANA\nANANAS\n");
    let text = stdout(&stree(&["stats"], &file));
    assert!(text.contains("sequences: 2"), "{}", text);
    assert!(text.contains("leaves: 14"), "{}", text);
    assert!(text.contains("terminators: unique"), "{}", text);
}

#[test]
fn stats_as_json() {
    let (_dir, file) = fixture("AAGT\n");
    let text = stdout(&stree_with(&["stats"], &file, &["--json"]));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["sequences"], 1);
    assert_eq!(value["leaves"], 5);
    assert_eq!(value["internal_nodes"], 1);
}

#[test]
fn contains_answers_each_pattern() {
    let (_dir, file) = fixture("BANANA\nANANAS\n");
    let text = stdout(&stree_with(&["contains"], &file, &["NANA", "NAAN", "ANAS"]));
    assert_eq!(text, "NANA: yes\nNAAN: no\nANAS: yes\n");
}

#[test]
fn find_prints_line_and_column() {
    let (_dir, file) = fixture("BANANA\n\nANANAS\n");
    let text = stdout(&stree_with(&["find"], &file, &["NAS"]));
    assert_eq!(text, "3:4:ANANAS\n");

    let text = stdout(&stree_with(&["find"], &file, &["ANA", "--count"]));
    assert_eq!(text.trim(), "4");
}

#[test]
fn motifs_most_frequent_first() {
    let (_dir, file) = fixture("BANANA\nANANAS\n");
    let text = stdout(&stree_with(&["motifs"], &file, &["--length", "2", "--top", "2"]));
    // AN: 2 + 2, NA: 2 + 2, then BA and AS once each
    assert_eq!(text, "4\tAN\n4\tNA\n");
}

#[test]
fn tree_prints_one_line_per_node() {
    let (_dir, file) = fixture("AAGT\n");
    let text = stdout(&stree(&["tree"], &file));
    assert_eq!(text.lines().count(), 7);
    assert!(text.starts_with("#0\n"));
}

#[test]
fn shared_terminators_flag() {
    let (_dir, file) = fixture("AB\nAB\n");
    let text = stdout(&stree_with(&["stats"], &file, &["--shared-terminators"]));
    assert!(text.contains("leaves: 3"), "{}", text);
    assert!(text.contains("terminators: shared"), "{}", text);
}

#[test]
fn config_file_is_loaded() {
    let (dir, file) = fixture("AB\nAB\n");
    let config = dir.path().join("stree.json");
    fs::write(&config, r#"{"terminators": "shared", "verify_after_insert": true}"#).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_stree"))
        .arg("--config")
        .arg(&config)
        .args(["stats", "--json"])
        .arg(&file)
        .output()
        .expect("Failed to run stree");
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["terminators"], "shared");
    assert_eq!(value["leaves"], 3);
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = stree(&["stats"], &dir.path().join("absent.txt"));
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}
