//! End-to-end tests for the `partner-access completions` command.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_completions_help() {
    let mut cmd = cargo_bin_cmd!("partner-access");
    cmd.arg("completions")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Generate shell completion scripts",
        ))
        .stdout(predicate::str::contains("bash"))
        .stdout(predicate::str::contains("zsh"))
        .stdout(predicate::str::contains("powershell"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = cargo_bin_cmd!("partner-access");
    cmd.arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("_partner-access()"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("members"));
}

#[test]
fn test_completions_zsh() {
    let mut cmd = cargo_bin_cmd!("partner-access");
    cmd.arg("completions")
        .arg("zsh")
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef partner-access"));
}

#[test]
fn test_completions_invalid_shell() {
    let mut cmd = cargo_bin_cmd!("partner-access");
    cmd.arg("completions")
        .arg("tcsh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_completions_to_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.path().join("_partner-access");

    let mut cmd = cargo_bin_cmd!("partner-access");
    cmd.args(["completions", "zsh", "--output"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let script = std::fs::read_to_string(&target).unwrap();
    assert!(script.contains("#compdef partner-access"));
}

#[test]
fn test_completions_to_missing_directory_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.path().join("missing/_partner-access");

    let mut cmd = cargo_bin_cmd!("partner-access");
    cmd.args(["completions", "bash", "--output"])
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create"));
}
