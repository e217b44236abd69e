//! Tests for error reporting and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.run(&["--help"]);
    assert_success(&output);
    assert_stdout_contains(&output, "Usage");
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.run(&["unknown-command"]);
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.run(&["--version"]);
    assert_success(&output);
    assert_stdout_contains(&output, "ymir");
}

#[test]
fn test_outside_project_suggests_init() {
    let t = Test::new();

    let output = t.current_stack();
    assert_error_code(&output, "PROJECT_NOT_FOUND");
    assert_stdout_contains(&output, "run: ymir init");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_current_stack() {
    let t = Test::init();
    t.write(".ymir/current_stack", "dev");

    let output = t.current_stack();
    assert_error_code(&output, "INVALID_CURRENT_STACK");
}

#[test]
fn test_missing_stack_config() {
    let t = Test::init();
    std::fs::remove_file(t.ymir("stack-config/dev")).unwrap();

    let output = t.export();
    assert_error_code(&output, "STACK_CONFIG_NOT_FOUND");
}

#[test]
fn test_completions_bash() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_ymir"));
}

#[test]
fn test_completions_zsh() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef ymir"));
}

#[test]
fn test_errors_go_to_stderr() {
    let t = Test::new();

    t.cmd()
        .args(["checkout", "prod"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("✗ PROJECT_NOT_FOUND:"))
        .stdout(predicate::str::contains("run: ymir init"));
}
