//! End-to-end tests for the commands that need no repository: help,
//! version, `example` and `completions`.

#[allow(dead_code)]
mod common;
use common::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("git-anchor");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("example"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("git-anchor");
    cmd.arg("--version")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("git-anchor"));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let mut cmd = cargo_bin_cmd!("git-anchor");
    cmd.arg("frobnicate").assert().code(2);
}

#[test]
fn test_generate_help_mentions_manifest() {
    let mut cmd = cargo_bin_cmd!("git-anchor");
    cmd.args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MANIFEST"))
        .stdout(predicate::str::contains("--lang"))
        .stdout(predicate::str::contains("--branch"));
}

#[test]
fn test_example_prints_valid_manifest() {
    let mut cmd = cargo_bin_cmd!("git-anchor");
    let output = cmd.arg("example").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let manifest = git_anchor::manifest::Manifest::parse(&stdout).unwrap();
    assert_eq!(manifest, git_anchor::manifest::Manifest::example());
    assert!(stdout.contains("\"Repo\": \"github.com/gogo/protobuf\""));
}

#[test]
fn test_completions_bash() {
    let mut cmd = cargo_bin_cmd!("git-anchor");
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_git__anchor()"))
        .stdout(predicate::str::contains("complete -F"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn test_completions_rejects_unknown_shell() {
    let mut cmd = cargo_bin_cmd!("git-anchor");
    cmd.args(["completions", "tcsh"]).assert().code(2);
}

#[test]
fn test_generate_unsupported_language() {
    let fixture = TestFixture::new();
    fixture
        .command()
        .args(["generate", "--lang", "python"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Script generation for language python is not implemented",
        ));
}
