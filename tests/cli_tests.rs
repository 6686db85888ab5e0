//! Smoke tests for the sprinkler-console binary.
//!
//! Anything touching a live controller stays out of here; these only cover
//! argument handling and the offline failure path.

use assert_cmd::Command;
use predicates::prelude::*;

fn console() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sprinkler-console"))
}

#[test]
fn test_help_lists_commands() {
    console()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("remove"));
}

#[test]
fn test_version_flag() {
    console()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sprinkler-console"));
}

#[test]
fn test_show_reports_unreachable_backend() {
    console()
        .args(["--url", "http://127.0.0.1:9/configuration", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("connection failed"));
}

#[test]
fn test_rejects_unknown_subcommand() {
    console().arg("sprinkle").assert().failure();
}
