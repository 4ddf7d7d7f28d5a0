//! End-to-end runs of the `pdfcompare` binary.

#[path = "../../pdfcompare-pdf-mupdf/tests/common/mod.rs"]
mod common;

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command running inside `dir`, isolated from user config and environment.
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pdfcompare"));
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env("NO_COLOR", "1")
        .env_remove("PDFCOMPARE_REPORT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_exits_zero() {
    let dir = TempDir::new().unwrap();
    cli(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--save-diff"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn test_missing_second_argument_prints_usage() {
    let dir = TempDir::new().unwrap();
    common::write_pdf(dir.path(), "a.pdf", &["Hello World"]);

    cli(dir.path())
        .arg("a.pdf")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_nonexistent_first_path_is_named() {
    let dir = TempDir::new().unwrap();
    common::write_pdf(dir.path(), "b.pdf", &["Hello World"]);

    cli(dir.path())
        .args(["does-not-exist.pdf", "b.pdf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does-not-exist.pdf"))
        .stdout(predicate::str::contains("STATISTICS").not());
}

#[test]
fn test_identical_documents() {
    let dir = TempDir::new().unwrap();
    common::write_pdf(dir.path(), "a.pdf", &["Hello World"]);
    common::write_pdf(dir.path(), "b.pdf", &["Hello World"]);

    cli(dir.path())
        .args(["a.pdf", "b.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Similarity Score: 100.00%"))
        .stdout(predicate::str::contains("IDENTICAL"))
        .stdout(predicate::str::contains("--save-diff"))
        .stdout(predicate::str::contains("Comparison completed!"));

    assert!(!dir.path().join("pdf_comparison_report.html").exists());
}

#[test]
fn test_save_diff_writes_default_report() {
    let dir = TempDir::new().unwrap();
    common::write_pdf(dir.path(), "a.pdf", &["Hello World"]);
    common::write_pdf(dir.path(), "b.pdf", &["Hello World"]);

    cli(dir.path())
        .args(["a.pdf", "b.pdf", "--save-diff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pdf_comparison_report.html"));

    let report = fs::read_to_string(dir.path().join("pdf_comparison_report.html")).unwrap();
    assert!(report.contains("No Differences Found"));
}

#[test]
fn test_similar_documents_with_custom_report_path() {
    let dir = TempDir::new().unwrap();
    common::write_pdf(dir.path(), "brown.pdf", &["The quick brown fox"]);
    common::write_pdf(dir.path(), "red.pdf", &["The quick red fox"]);

    cli(dir.path())
        .args([
            "brown.pdf",
            "red.pdf",
            "--save-diff",
            "--output",
            "review.html",
            "--left-label",
            "Before",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("SIMILAR"))
        .stdout(predicate::str::contains("Before (brown.pdf):"));

    let report = fs::read_to_string(dir.path().join("review.html")).unwrap();
    assert!(report.contains("<table class=\"diff\">"));
    assert!(report.contains("Before"));
    assert!(!dir.path().join("pdf_comparison_report.html").exists());
}

#[test]
fn test_non_pdf_input_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.pdf"), "plain text, not a PDF").unwrap();
    common::write_pdf(dir.path(), "b.pdf", &["Hello World"]);

    cli(dir.path())
        .args(["notes.pdf", "b.pdf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("notes.pdf"))
        .stderr(predicate::str::contains("Caused by").not());
}

#[test]
fn test_invalid_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    common::write_pdf(dir.path(), "a.pdf", &["Hello World"]);
    common::write_pdf(dir.path(), "b.pdf", &["Hello World"]);
    fs::write(dir.path().join("bad.toml"), "[diff\ncontext = ").unwrap();

    cli(dir.path())
        .args(["a.pdf", "b.pdf", "--config", "bad.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bad.toml"))
        .stderr(predicate::str::contains("Caused by").not());
}

#[test]
fn test_report_path_from_env() {
    let dir = TempDir::new().unwrap();
    common::write_pdf(dir.path(), "a.pdf", &["Hello World"]);
    common::write_pdf(dir.path(), "b.pdf", &["Hello there"]);

    cli(dir.path())
        .env("PDFCOMPARE_REPORT", "env-report.html")
        .args(["a.pdf", "b.pdf", "--save-diff"])
        .assert()
        .success();

    assert!(dir.path().join("env-report.html").exists());
}
