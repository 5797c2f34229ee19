//! Integration tests for basic CLI behavior.
//!
//! Tests that the binary exists, accepts standard flags, and each subcommand
//! responds to `--help` with appropriate text.

#![allow(deprecated)] // cargo_bin deprecation — replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: get a Command for the `retitle` binary.
fn retitle() -> Command {
    Command::cargo_bin("retitle").expect("binary 'retitle' should be built")
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    retitle()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: retitle"))
        .stdout(predicate::str::contains("suggest"))
        .stdout(predicate::str::contains("rename"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn version_flag_shows_semver() {
    retitle()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^retitle \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    retitle()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: retitle"));
}

#[test]
fn invalid_subcommand_fails() {
    retitle()
        .arg("this-is-not-a-real-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn suggest_requires_files() {
    retitle()
        .arg("suggest")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<FILES>"));
}

#[test]
fn missing_config_file_fails() {
    retitle()
        .args(["--config", "/no/such/retitle.toml", "suggest", "a.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

// ─── Subcommand help ─────────────────────────────────────────────────────────

#[test]
fn suggest_help() {
    retitle()
        .args(["suggest", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Print a suggested filename"))
        .stdout(predicate::str::contains("<FILES>"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--parallel"));
}

#[test]
fn rename_help() {
    retitle()
        .args(["rename", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rename (or copy)"))
        .stdout(predicate::str::contains("--copy-to"))
        .stdout(predicate::str::contains("--interactive"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn inspect_help() {
    retitle()
        .args(["inspect", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Show how a suggestion was reached"))
        .stdout(predicate::str::contains("<FILE>"));
}
