use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the polman binary.
#[allow(deprecated)]
fn polman_cmd() -> Command {
    Command::cargo_bin("polman").unwrap()
}

#[test]
fn help_works() {
    polman_cmd().arg("--help").assert().success();
}

#[test]
fn help_lists_every_command() {
    let assert = polman_cmd().arg("--help").assert().success();
    let mut stdout = predicate::str::contains("add").boxed();
    for cmd in [
        "edit", "delete", "view", "list", "history", "revert", "stats", "review", "owner",
        "status", "scan", "library",
    ] {
        stdout = stdout.and(predicate::str::contains(cmd)).boxed();
    }
    assert.stdout(stdout);
}

#[test]
fn library_help_lists_subcommands() {
    polman_cmd()
        .args(["library", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("create")
                .and(predicate::str::contains("remove"))
                .and(predicate::str::contains("show")),
        );
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    polman_cmd().assert().code(2);
}
