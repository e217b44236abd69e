//! Tests for plugin install, list and info.

use crate::support::*;

#[test]
fn test_plugin_list_after_init() {
    let t = Test::init();

    let output = t.run(&["plugin", "list"]);
    assert_success(&output);
    assert_stdout_contains(&output, "env  @builtin/env");
}

#[test]
fn test_plugin_info_builtin() {
    let t = Test::init();

    let output = t.run(&["plugin", "info", "env"]);
    assert_success(&output);
    assert_stdout_contains(&output, "ymir-env");
    assert_stdout_contains(&output, "@builtin/env");
}

#[test]
fn test_install_missing_location() {
    let t = Test::init();

    let output = t.install_plugin("./no/such/plugin", "ghost");
    assert_error_code(&output, "INVALID_PLUGIN_INSTALLATION");
    assert!(!t.ymir("plugins/ghost").exists());
}

#[test]
fn test_install_rejects_path_alias() {
    let t = Test::init();

    let output = t.install_plugin("@builtin/env", "../stacks/dev");
    assert_error_code(&output, "INVALID_PLUGIN_ALIAS");
    assert!(t.stack("dev").contains("[DESCRIBE]"));
}

#[test]
fn test_info_unknown_alias() {
    let t = Test::init();

    let output = t.run(&["plugin", "info", "ghost"]);
    assert_error_code(&output, "PLUGIN_CONFIG_NOT_FOUND");
}

#[test]
fn test_list_flags_broken_descriptor() {
    let t = Test::init();
    t.write(".ymir/plugins/broken", "[DESCRIBE]\n  alias: \"broken\"\n");

    let output = t.run(&["plugin", "list"]);
    assert_success(&output);
    assert_stdout_contains(&output, "⚠ broken:");
    assert_stdout_contains(&output, "env  @builtin/env");
}

#[cfg(unix)]
mod with_plugin {
    use crate::support::*;

    #[test]
    fn test_install_writes_descriptor() {
        let t = Test::init();
        let path = t.fake_plugin("kv", &[]);
        let location = path.display().to_string();

        let output = t.run(&[
            "plugin",
            "install",
            &location,
            "kv",
            "--install-cmd",
            "cargo install ymir-plugin-kv",
        ]);
        assert_success(&output);

        let descriptor = t.read(".ymir/plugins/kv");
        assert!(descriptor.starts_with("[DESCRIBE]\n  alias: \"kv\"\n  pk_name?: \"kv\"\n"));
        assert!(descriptor.contains(&format!("  path: \"{}\"\n", location)));
        assert!(descriptor.contains("  install_cmd?: \"cargo install ymir-plugin-kv\"\n"));
        assert!(descriptor.contains("  is_global?: false"));
    }

    #[test]
    fn test_reinstall_keeps_comments() {
        let t = Test::init();
        let path = t.fake_plugin("kv", &[]);
        let location = path.display().to_string();
        t.write(
            ".ymir/plugins/kv",
            "[DESCRIBE]\n  alias: \"kv\"; our key-value store\n\n[LOCATION]\n  path: \"old\"\n",
        );

        assert_success(&t.install_plugin(&location, "kv"));
        let descriptor = t.read(".ymir/plugins/kv");
        assert!(descriptor.contains("  alias: \"kv\"; our key-value store\n"));
        assert!(!descriptor.contains("\"old\""));
    }

    #[test]
    fn test_info_asks_the_plugin() {
        let t = Test::init();
        t.with_kv_plugin(&[("info", KV_INFO_REPLY)]);

        let output = t.run(&["plugin", "info", "kv"]);
        assert_success(&output);
        assert_stdout_contains(&output, "ymir-plugin-kv");
        assert_stdout_contains(&output, "1.2.3");
        assert_stdout_contains(&output, "required config  bucket");
    }
}
