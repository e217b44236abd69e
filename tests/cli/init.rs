//! Tests for `ymir init`.

use crate::support::*;

#[test]
fn test_init_creates_layout() {
    let t = Test::new();

    let output = t.init_cmd();
    assert_success(&output);
    assert_stdout_contains(&output, "initialized");

    for name in ["default", "dev", "stage", "prod"] {
        assert!(t.ymir(&format!("stacks/{}", name)).is_file(), "missing stack {}", name);
        assert!(
            t.ymir(&format!("stack-config/{}", name)).is_file(),
            "missing stack config {}",
            name
        );
    }
    assert_eq!(t.read(".ymir/current_stack"), "[dev]: ./stacks/dev");
    assert!(t.ymir("plugins/env").is_file());
}

#[test]
fn test_init_default_config() {
    let t = Test::init();

    let config = t.read(".ymir/stack-config/default");
    assert!(config.contains("[DEFAULT_RESOLVER]\n  name: \"env\"\n"));
    assert!(config.contains("[FILE]\n  path: \".\"\n  name: \".env\"\n"));

    let plugin = t.read(".ymir/plugins/env");
    assert!(plugin.contains("  alias: \"env\""));
    assert!(plugin.contains("  path: \"@builtin/env\""));
}

#[test]
fn test_init_twice_fails() {
    let t = Test::init();

    let output = t.init_cmd();
    assert_error_code(&output, "PROJECT_EXISTS");
}

#[test]
fn test_init_with_project_flag() {
    let t = Test::new();

    let output = t.run(&["-C", "nested/app", "init"]);
    assert_success(&output);
    assert!(t.dir.path().join("nested/app/.ymir/current_stack").is_file());

    let output = t.run(&["--project", "nested/app", "stack"]);
    assert_success(&output);
    assert_stdout_contains(&output, "dev");
}

#[test]
fn test_project_from_env() {
    let t = Test::new();
    assert_success(&t.run(&["-C", "app", "init"]));

    let output = t
        .cmd()
        .env("YMIR_PROJECT", t.dir.path().join("app"))
        .arg("stack")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "dev");
}
