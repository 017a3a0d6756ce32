//! Tests for the `xmi-extractor` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("vending_machine")
        .join(name)
}

fn cmd() -> Command {
    Command::cargo_bin("xmi-extractor").unwrap()
}

/// Copy a fixture into a scratch directory so default output lands there.
fn scratch_copy(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::copy(fixture(name), &path).unwrap();
    path
}

#[test]
fn test_usecase_to_stdout() {
    cmd()
        .arg("usecase")
        .arg(fixture("usecase.xml"))
        .arg("--stdout")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Use Case Analysis\n"))
        .stdout(predicate::str::contains("### Actor: Customer\n\n- BuyItem"));
}

#[test]
fn test_activity_default_output_path() {
    let dir = TempDir::new().unwrap();
    let input = scratch_copy(&dir, "activity.xml");

    cmd()
        .arg("activity")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to:"));

    let report = fs::read_to_string(dir.path().join("activity_activity.md")).unwrap();
    assert!(report.contains("## Flows (5)"));
}

#[test]
fn test_requirement_json_with_explicit_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("requirements.json");

    cmd()
        .args(["requirement", "--format", "json", "--output"])
        .arg(&output)
        .arg(fixture("requirement.xml"))
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["requirements"].as_array().unwrap().len(), 4);
}

#[test]
fn test_custom_title() {
    cmd()
        .arg("requirement")
        .arg(fixture("requirement.xml"))
        .args(["--stdout", "--title", "自動販売機システム 要求分析レポート"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# 自動販売機システム 要求分析レポート\n"));
}

#[test]
fn test_missing_input_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("missing.xml");

    cmd()
        .arg("usecase")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"))
        .stderr(predicate::str::contains("missing.xml"));

    assert!(!dir.path().join("missing_elements.md").exists());
}

#[test]
fn test_malformed_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.xml");
    fs::write(&input, "<XMI><XMI.content></XMI>").unwrap();

    cmd()
        .arg("activity")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("XML parsing failed"));
}

#[test]
fn test_files_command() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("usecase")).unwrap();
    fs::write(dir.path().join("usecase/usecase_elements.md"), "# Use Case Analysis\n").unwrap();
    let catalog = dir.path().join("catalog.yaml");
    fs::write(
        &catalog,
        "groups:\n  usecase: [usecase/usecase_elements.md]\n  request: [requirement/requirement_elements.md]\n\
         options:\n  - name: Requirement coverage\n    prompt: prompts/requirement_coverage.txt\n    groups: [request, usecase]\n",
    )
    .unwrap();

    cmd()
        .args(["files", "Requirement coverage", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("requirement_coverage.txt"))
        .stdout(predicate::str::contains("Files: (2)"))
        .stdout(predicate::str::contains("requirement_elements.md (missing)"));

    cmd()
        .args(["files", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Requirement coverage"));

    cmd()
        .args(["files", "FMEA", "--catalog"])
        .arg(&catalog)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown verification option: 'FMEA'"));
}
