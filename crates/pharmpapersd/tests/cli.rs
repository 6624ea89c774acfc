//! Integration tests for the pharmpapers CLI argument surface.
//!
//! These avoid the network entirely: they exercise argument parsing and the
//! pre-flight validation that runs before any request is made.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a clean command instance
fn pharmpapers() -> Command { Command::cargo_bin("pharmpapers").unwrap() }

#[test]
fn help_describes_the_tool() {
  pharmpapers()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("PubMed"))
    .stdout(predicate::str::contains("--file"))
    .stdout(predicate::str::contains("--max-results"));
}

#[test]
fn missing_query_is_a_usage_error() {
  pharmpapers().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn invalid_email_fails_before_any_request() {
  pharmpapers()
    .arg("some query")
    .arg("--email")
    .arg("not-an-email")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid email address"));
}
