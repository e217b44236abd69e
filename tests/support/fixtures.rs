//! Test fixtures: sample files and scripted plugins.

use super::Test;
use std::path::PathBuf;

/// Sample `.env` for import tests.
pub const SAMPLE_ENV: &str = r#"
# app settings
API_KEY=sk-test-12345
export DATABASE_URL="postgres://localhost/mydb"
REDIS_URL='redis://localhost:6379'
"#;

/// Stack with a comment to keep across edits.
pub const COMMENTED_STACK: &str =
    "[PORT]\n  path: \"APP_PORT\"\n  description?: \"http port\"; keep me\n";

/// `resolveAll` reply of the scripted `kv` plugin.
pub const KV_RESOLVE_REPLY: &str = r#"{"ok":[["TOKEN","s3cr3t"]]}"#;

/// `importEnv` reply of the scripted `kv` plugin for [`SAMPLE_ENV`].
pub const KV_IMPORT_REPLY: &str = r#"{"ok":[{"key":"API_KEY","path":"/dev/api_key"},{"key":"DATABASE_URL","path":"/dev/database_url"},{"key":"REDIS_URL","path":"/dev/redis_url"}]}"#;

/// `info` reply of the scripted `kv` plugin.
pub const KV_INFO_REPLY: &str = r#"{"ok":{"name":"ymir-plugin-kv","version":"1.2.3","alias":"kv","requiredConfig":["bucket"]}}"#;

impl Test {
    /// Write an executable plugin answering each method with a canned reply.
    ///
    /// Every request line is appended to [`Test::plugin_log`]. Methods
    /// without a reply get an error reply and exit status 1.
    #[cfg(unix)]
    pub fn fake_plugin(&self, name: &str, replies: &[(&str, &str)]) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let dir = self.dir.path().join("plugin-bin");
        std::fs::create_dir_all(&dir).expect("failed to create plugin dir");
        let path = dir.join(name);

        let mut script = String::from("#!/bin/sh\nread -r line\n");
        script.push_str(&format!(
            "printf '%s\\n' \"$line\" >> '{}'\n",
            self.plugin_log(name).display()
        ));
        script.push_str("case \"$1\" in\n");
        for (method, reply) in replies {
            script.push_str(&format!("  {}) printf '%s\\n' '{}' ;;\n", method, reply));
        }
        script.push_str(
            "  *) printf '%s\\n' '{\"error\":{\"code\":\"UNSUPPORTED\",\"message\":\"no reply\"}}'; exit 1 ;;\nesac\n",
        );

        std::fs::write(&path, script).expect("failed to write plugin");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("failed to chmod plugin");
        path
    }

    /// Requests received by the scripted plugin `name`, one JSON line each.
    pub fn plugin_log(&self, name: &str) -> PathBuf {
        self.dir.path().join("plugin-bin").join(format!("{}.log", name))
    }

    pub fn plugin_requests(&self, name: &str) -> Vec<serde_json::Value> {
        std::fs::read_to_string(self.plugin_log(name))
            .unwrap_or_default()
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).expect("plugin request is not JSON"))
            .collect()
    }

    /// Install a scripted `kv` plugin under alias `kv`.
    #[cfg(unix)]
    pub fn with_kv_plugin(&self, replies: &[(&str, &str)]) {
        let path = self.fake_plugin("kv", replies);
        let output = self.install_plugin(&path.display().to_string(), "kv");
        assert!(
            output.status.success(),
            "Failed to install plugin: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
