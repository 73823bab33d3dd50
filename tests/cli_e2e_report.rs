//! End-to-end tests for the `report` command
//!
//! These tests invoke the actual CLI binary and validate its behavior
//! from a user's perspective. Tests that would reach a real network are
//! gated behind the `integration-tests` feature; everything else fails
//! before any request is made.

mod common;
use common::prelude::*;

/// Test that --help flag shows help information
#[test]
fn test_report_help() {
    let mut cmd = cargo_bin_cmd!("gitlab-branch-report");

    cmd.arg("report")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Generate an HTML branch report for a project or group",
        ))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--gitlab-url"));
}

/// Test that the path argument is required
#[test]
fn test_report_missing_path_argument() {
    report_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

/// Test that a missing token fails with setup guidance, before any request
#[test]
fn test_report_missing_token() {
    report_cmd()
        .arg("acme/svc-x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITLAB_TOKEN"))
        .stderr(predicate::str::contains("read_api"));
}

/// Test that an unparseable instance URL is rejected up front
#[test]
fn test_report_invalid_gitlab_url() {
    report_cmd()
        .arg("acme/svc-x")
        .env("GITLAB_TOKEN", "glpat-test")
        .arg("--gitlab-url")
        .arg("not a url")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid GitLab URL"));
}

/// Test that an empty token is rejected
#[test]
fn test_report_empty_token() {
    report_cmd()
        .arg("acme/svc-x")
        .env("GITLAB_TOKEN", "")
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty access token"));
}

/// Test that an unreachable instance produces a report-generation error,
/// not a panic
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_report_unreachable_instance() {
    report_cmd()
        .arg("acme/svc-x")
        .env("GITLAB_TOKEN", "glpat-test")
        .arg("--gitlab-url")
        // Port 9 (discard) is never a GitLab instance.
        .arg("http://127.0.0.1:9")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to generate report for 'acme/svc-x'",
        ));
}

/// Test that no output file is left behind when generation fails
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_report_failure_writes_no_output_file() {
    let temp = TempDir::new().unwrap();
    let output = temp.child("report.html");

    report_cmd()
        .arg("acme/svc-x")
        .env("GITLAB_TOKEN", "glpat-test")
        .arg("--gitlab-url")
        .arg("http://127.0.0.1:9")
        .arg("--output")
        .arg(output.path())
        .assert()
        .failure();

    output.assert(predicate::path::missing());
}
