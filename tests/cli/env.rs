//! Tests for export and import.

use crate::support::*;

#[test]
fn test_export_with_env_resolver() {
    let t = Test::init();
    t.write_stack("default", "[PORT]\n  path: \"YMIR_CLI_TEST_PORT\"\n");
    t.write_stack("dev", "[HOST]\n  path: \"YMIR_CLI_TEST_HOST\"\n");

    let output = t
        .cmd()
        .env("YMIR_CLI_TEST_PORT", "8080")
        .env("YMIR_CLI_TEST_HOST", "localhost")
        .arg("export")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "exported 2 keys");

    // default stack properties come first
    assert_eq!(t.read(".env"), "PORT=8080\nHOST=localhost\n");
}

#[test]
fn test_export_named_stack_overrides_default_section() {
    let t = Test::init();
    t.write_stack(
        "default",
        "[A]\n  path: \"YMIR_CLI_TEST_A0\"\n\n[B]\n  path: \"YMIR_CLI_TEST_B\"\n",
    );
    t.write_stack("prod", "[A]\n  path: \"YMIR_CLI_TEST_A1\"\n");

    let output = t
        .cmd()
        .env("YMIR_CLI_TEST_A0", "zero")
        .env("YMIR_CLI_TEST_A1", "one")
        .env("YMIR_CLI_TEST_B", "two")
        .args(["export", "--stack", "prod"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(t.read(".env"), "A=one\nB=two\n");
}

#[test]
fn test_export_unresolved_is_null() {
    let t = Test::init();
    t.write_stack("dev", "[MISSING]\n  path: \"YMIR_CLI_TEST_NEVER_SET\"\n");

    let output = t.export();
    assert_success(&output);
    assert_stdout_contains(&output, "MISSING did not resolve");
    assert_eq!(t.read(".env"), "MISSING=null\n");
}

#[test]
fn test_export_to_configured_file() {
    let t = Test::init();
    t.write_stack("dev", "[MISSING]\n  path: \"YMIR_CLI_TEST_NEVER_SET\"\n");
    t.write_stack_config("dev", "[FILE]\n  path: \"config\"\n  name: \".env.dev\"\n");

    assert_success(&t.export());
    assert_eq!(t.read("config/.env.dev"), "MISSING=null\n");
    assert!(!t.dir.path().join(".env").exists());
}

#[cfg(unix)]
#[test]
fn test_export_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::init();
    assert_success(&t.export());
    let mode = std::fs::metadata(t.dir.path().join(".env"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_export_without_file_config() {
    let t = Test::init();
    t.write_stack_config("default", "[DEFAULT_RESOLVER]\n  name: \"env\"\n");

    let output = t.export();
    assert_error_code(&output, "NO_FILE_CONFIG");
}

#[test]
fn test_export_without_default_resolver() {
    let t = Test::init();
    t.write_stack_config("default", "[FILE]\n  path: \".\"\n  name: \".env\"\n");

    let output = t.export();
    assert_error_code(&output, "NO_DEFAULT_RESOLVER");
}

#[test]
fn test_export_unknown_resolver_alias() {
    let t = Test::init();
    t.write_stack("dev", "[TOKEN]\n  path: \"/kv/token\"\n  resolver?: \"vault\"\n");

    let output = t.export();
    assert_error_code(&output, "PLUGIN_CONFIG_NOT_FOUND");
    assert_stdout_contains(&output, "run: ymir plugin install <location> vault");
}

#[test]
fn test_import_into_env_resolver_is_unsupported() {
    let t = Test::init();
    t.write("import.env", SAMPLE_ENV);

    let output = t.run(&["import", "import.env"]);
    assert_error_code(&output, "UNABLE_TO_IMPORT_ENV");
}

#[cfg(unix)]
mod with_plugin {
    use crate::support::*;

    #[test]
    fn test_export_routes_to_plugin() {
        let t = Test::init();
        t.with_kv_plugin(&[("resolveAll", KV_RESOLVE_REPLY)]);
        t.write_stack("dev", "[TOKEN]\n  path: \"/kv/token\"\n  resolver?: \"kv\"\n");
        t.write_stack_config("dev", "[RESOLVER_CONFIG_KV]\n  bucket: \"secrets\"\n");

        let output = t.export();
        assert_success(&output);
        assert_eq!(t.read(".env"), "TOKEN=s3cr3t\n");

        let requests = t.plugin_requests("kv");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["method"], "resolveAll");
        assert_eq!(requests[0]["config"]["bucket"], "secrets");
        assert_eq!(requests[0]["params"][0]["key"], "TOKEN");
    }

    #[test]
    fn test_export_plugin_failure_writes_nothing() {
        let t = Test::init();
        t.with_kv_plugin(&[]);
        t.write_stack("dev", "[TOKEN]\n  path: \"/kv/token\"\n  resolver?: \"kv\"\n");

        let output = t.export();
        assert_error_code(&output, "RESOLVER_ERROR");
        assert!(!t.dir.path().join(".env").exists());
    }

    #[test]
    fn test_import_records_returned_paths() {
        let t = Test::init();
        t.with_kv_plugin(&[("importEnv", KV_IMPORT_REPLY)]);
        t.write("import.env", SAMPLE_ENV);

        let output = t.run(&["import", "import.env", "--resolver", "kv"]);
        assert_success(&output);
        assert_stdout_contains(&output, "imported 3 keys");

        let stack = t.stack("dev");
        assert!(stack.contains("[API_KEY]\n  path: \"/dev/api_key\"\n  resolver?: \"kv\"\n"));
        assert!(stack.contains("[DATABASE_URL]\n  path: \"/dev/database_url\"\n"));
        assert!(stack.contains("[REDIS_URL]\n  path: \"/dev/redis_url\"\n"));

        let requests = t.plugin_requests("kv");
        assert_eq!(requests[0]["method"], "importEnv");
        assert_eq!(requests[0]["params"]["stackName"], "dev");
        assert_eq!(
            requests[0]["params"]["data"]["DATABASE_URL"],
            "postgres://localhost/mydb"
        );
        assert_eq!(requests[0]["params"]["data"]["REDIS_URL"], "redis://localhost:6379");
    }

    #[test]
    fn test_import_skips_existing_keys() {
        let t = Test::init();
        t.with_kv_plugin(&[("importEnv", KV_IMPORT_REPLY)]);
        t.write("import.env", SAMPLE_ENV);
        t.write_stack("prod", "[API_KEY]\n  path: \"/prod/api_key\"\n");

        let output = t.run(&["import", "import.env", "-r", "kv", "--stack", "prod"]);
        assert_success(&output);
        assert_stdout_contains(&output, "skipped API_KEY");
        assert!(t.stack("prod").contains("[API_KEY]\n  path: \"/prod/api_key\"\n"));
    }
}
