//! CLI integration tests using the REAL binary

mod common;

use common::theme_cmd;
use predicates::prelude::*;

#[test]
fn test_help_output() {
    theme_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ReaperThemeZip"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("scan"));
}

#[test]
fn test_build_help_lists_options() {
    theme_cmd()
        .args(["build", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--minify"))
        .stdout(predicate::str::contains("--debug"))
        .stdout(predicate::str::contains("--constants"))
        .stdout(predicate::str::contains("--include"));
}

#[test]
fn test_version_output() {
    theme_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reaper-theme-builder"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_completions_bash() {
    theme_cmd()
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reaper-theme-builder"));
}

#[test]
fn test_completions_unknown_shell() {
    theme_cmd()
        .args(["completions", "--shell", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell"));
}

#[test]
fn test_missing_subcommand() {
    theme_cmd().assert().failure();
}
