//! External resolver executables.
//!
//! Every call spawns `<program> <method>`, writes one JSON request line to
//! stdin, closes it, and reads one JSON reply line from stdout. Anything the
//! plugin prints before its last stdout line is ignored; stderr is kept for
//! error messages only.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, trace};

use super::{BucketEntry, ImportPayload, ImportedEntry, PluginInfo, ResolvedEntry, Resolver};
use crate::core::format::Section;
use crate::core::property::scalar_text;
use crate::error::{PluginError, ResolverError, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Reply {
    Ok(Value),
    Error(ReplyError),
}

#[derive(Debug, Deserialize)]
struct ReplyError {
    #[serde(default = "unknown_code")]
    code: String,
    #[serde(default)]
    message: String,
}

fn unknown_code() -> String {
    "UNKNOWN".to_string()
}

/// A resolver running as a child process.
#[derive(Debug, Clone)]
pub struct ProcessResolver {
    alias: String,
    program: PathBuf,
}

impl ProcessResolver {
    pub fn new(alias: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            alias: alias.into(),
            program: program.into(),
        }
    }

    fn protocol(&self, reason: impl Into<String>) -> crate::error::Error {
        ResolverError::Protocol {
            alias: self.alias.clone(),
            reason: reason.into(),
        }
        .into()
    }

    /// Run one method and return the `ok` payload.
    fn call(&self, method: &str, config: &Section, params: Value) -> Result<Value> {
        let request = json!({
            "method": method,
            "config": config,
            "params": params,
        });
        trace!(alias = %self.alias, method, "calling plugin");

        let mut child = Command::new(&self.program)
            .arg(method)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PluginError::InvalidInstallation {
                location: self.program.display().to_string(),
                reason: format!("failed to spawn plugin: {}", e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let mut line = serde_json::to_vec(&request)?;
            line.push(b'\n');
            // A plugin may exit without reading its input; that is not a failure.
            if let Err(e) = stdin.write_all(&line) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let output = child.wait_with_output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            // a structured error reply beats the exit status
            if let Some(Reply::Error(err)) = last_reply(&stdout) {
                return Err(self.failed(err));
            }
            return Err(self.protocol(format!(
                "plugin exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        match last_reply(&stdout) {
            Some(Reply::Ok(value)) => {
                debug!(alias = %self.alias, method, "plugin call succeeded");
                Ok(value)
            }
            Some(Reply::Error(err)) => Err(self.failed(err)),
            None => Err(self.protocol(format!(
                "expected a JSON reply on stdout, got {:?}",
                stdout.trim()
            ))),
        }
    }

    fn failed(&self, err: ReplyError) -> crate::error::Error {
        ResolverError::Failed {
            alias: self.alias.clone(),
            code: err.code,
            message: err.message,
        }
        .into()
    }

    fn call_as<T: DeserializeOwned>(&self, method: &str, config: &Section, params: Value) -> Result<T> {
        let value = self.call(method, config, params)?;
        serde_json::from_value(value)
            .map_err(|e| self.protocol(format!("invalid {} result: {}", method, e)))
    }
}

fn last_reply(stdout: &str) -> Option<Reply> {
    let line = stdout.lines().rev().find(|line| !line.trim().is_empty())?;
    serde_json::from_str(line.trim()).ok()
}

impl Resolver for ProcessResolver {
    fn alias(&self) -> &str {
        &self.alias
    }

    fn resolve_all(&self, entries: &[BucketEntry], config: &Section) -> Result<Vec<ResolvedEntry>> {
        let pairs: Vec<(String, Value)> =
            self.call_as("resolveAll", config, serde_json::to_value(entries)?)?;
        pairs
            .into_iter()
            .map(|(key, value)| match value {
                Value::Null => Ok((key, None)),
                value => match scalar_text(&value) {
                    Some(text) => Ok((key, Some(text))),
                    None => Err(self.protocol(format!("non-scalar value for {}", key))),
                },
            })
            .collect()
    }

    fn add(&self, entry: &BucketEntry, config: &Section) -> Result<()> {
        self.call("add", config, serde_json::to_value(entry)?).map(|_| ())
    }

    fn remove(&self, entry: &BucketEntry, config: &Section) -> Result<()> {
        self.call("remove", config, serde_json::to_value(entry)?).map(|_| ())
    }

    fn update(&self, entry: &BucketEntry, config: &Section) -> Result<()> {
        self.call("update", config, serde_json::to_value(entry)?).map(|_| ())
    }

    fn import_env(&self, payload: &ImportPayload, config: &Section) -> Result<Vec<ImportedEntry>> {
        self.call_as("importEnv", config, serde_json::to_value(payload)?)
    }

    fn info(&self) -> Result<PluginInfo> {
        self.call_as("info", &Section::new(), Value::Null)
    }
}
