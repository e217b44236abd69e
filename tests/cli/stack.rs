//! Tests for checkout, stack, create and delete.

use crate::support::*;

#[test]
fn test_stack_shows_current() {
    let t = Test::init();

    let output = t.current_stack();
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "dev");
}

#[test]
fn test_stack_path() {
    let t = Test::init();

    let output = t.run(&["stack", "--path"]);
    assert_success(&output);
    assert!(stdout(&output).trim().ends_with("stacks/dev"));
}

#[test]
fn test_stack_list_marks_current() {
    let t = Test::init();

    let output = t.run(&["stack", "--list"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("* dev"), "got: {}", out);
    assert!(out.contains("• default"));
    assert!(out.contains("• prod"));
    assert!(out.contains("• stage"));
}

#[test]
fn test_checkout_existing_stack() {
    let t = Test::init();

    let output = t.checkout("prod");
    assert_success(&output);
    assert_eq!(t.read(".ymir/current_stack"), "[prod]: ./stacks/prod");
}

#[test]
fn test_checkout_missing_stack_fails_with_hint() {
    let t = Test::init();

    let output = t.checkout("qa");
    assert_error_code(&output, "STACK_NOT_FOUND");
    assert_stdout_contains(&output, "run: ymir checkout qa --create");
    assert_eq!(t.read(".ymir/current_stack"), "[dev]: ./stacks/dev");
}

#[test]
fn test_checkout_create() {
    let t = Test::init();

    let output = t.run(&["checkout", "qa", "--create"]);
    assert_success(&output);
    assert!(t.ymir("stacks/qa").is_file());
    assert!(t.ymir("stack-config/qa").is_file());
    assert_eq!(stdout(&t.current_stack()).trim(), "qa");
}

#[test]
fn test_create_and_duplicate() {
    let t = Test::init();

    let output = t.run(&["create", "qa"]);
    assert_success(&output);
    assert!(t.stack("qa").starts_with("[DESCRIBE]\n"));

    let output = t.run(&["create", "qa"]);
    assert_error_code(&output, "STACK_EXISTS");
}

#[test]
fn test_delete_stack() {
    let t = Test::init();

    let output = t.run(&["delete", "stage"]);
    assert_success(&output);
    assert!(!t.ymir("stacks/stage").exists());
    // the stack config stays behind
    assert!(t.ymir("stack-config/stage").exists());
}

#[test]
fn test_delete_default_is_refused() {
    let t = Test::init();

    let output = t.run(&["delete", "default", "--force", "--yes"]);
    assert_error_code(&output, "DEFAULT_STACK_PROTECTED");
    assert!(t.ymir("stacks/default").is_file());
}

#[test]
fn test_delete_current_needs_force() {
    let t = Test::init();

    let output = t.run(&["delete", "dev"]);
    assert_error_code(&output, "CURRENT_STACK_PROTECTED");
    assert!(t.ymir("stacks/dev").is_file());
}

#[test]
fn test_delete_current_with_force_checks_out_target() {
    let t = Test::init();

    let output = t.run(&["delete", "dev", "--force", "--checkout", "stage", "--yes"]);
    assert_success(&output);
    assert!(!t.ymir("stacks/dev").exists());
    assert_eq!(t.read(".ymir/current_stack"), "[stage]: ./stacks/stage");
}

#[test]
fn test_delete_current_with_force_falls_back_to_default() {
    let t = Test::init();

    let output = t.run(&["delete", "dev", "--force", "--yes"]);
    assert_success(&output);
    assert_eq!(stdout(&t.current_stack()).trim(), "default");
}

#[test]
fn test_delete_missing_stack() {
    let t = Test::init();

    let output = t.run(&["delete", "qa"]);
    assert_error_code(&output, "STACK_NOT_FOUND");
}

#[test]
fn test_stack_names_cannot_leave_ymir() {
    let t = Test::init();
    t.write("victim.txt", "important");

    let output = t.run(&["delete", "../../victim.txt", "--force", "--yes"]);
    assert_error_code(&output, "INVALID_STACK_NAME");
    assert_eq!(t.read("victim.txt"), "important");

    let output = t.run(&["create", "../escaped"]);
    assert_error_code(&output, "INVALID_STACK_NAME");
    assert!(!t.ymir("escaped").exists());

    let output = t.run(&["checkout", "../current_stack", "--create"]);
    assert_error_code(&output, "INVALID_STACK_NAME");
    assert_eq!(stdout(&t.current_stack()).trim(), "dev");

    let output = t.run(&["export", "--stack", "../stacks/dev"]);
    assert_error_code(&output, "INVALID_STACK_NAME");
}

#[test]
fn test_stack_config_fills_defaults() {
    let t = Test::init();
    t.write_stack_config("dev", "[FILE]\n  path: \"out\"\n  name: \".env.dev\"\n");

    let output = t.run(&["stack", "--config"]);
    assert_success(&output);
    let text = stdout(&output);
    assert!(text.contains("[FILE]\n  path: \"out\"\n  name: \".env.dev\"\n"), "got: {}", text);
    assert!(text.contains("[DEFAULT_RESOLVER]\n  name: \"env\"\n"), "got: {}", text);
    assert!(text.contains("ymir_version"), "got: {}", text);
}

#[test]
fn test_stack_config_reports_missing_sections() {
    let t = Test::init();
    t.write_stack_config("default", "[DESCRIBE]\n  name: \"app\"\n");

    let output = t.run(&["stack", "--config"]);
    assert_error_code(&output, "INVALID_STACK_CONFIG");
}
