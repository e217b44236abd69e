//! Resolver plugins.
//!
//! A resolver fetches (and optionally writes) secret values in one backend.
//! ymir never links a backend SDK; a plugin is either built in
//! (`@builtin/env`) or an executable spoken to over a one-shot JSON protocol:
//!
//! ```text
//! $ <installed> resolveAll
//! stdin:  {"method":"resolveAll","config":{...},"params":[{"key":"PORT","path":"/app/port",...}]}
//! stdout: {"ok":[["PORT","8080"]]}
//! ```
//!
//! Failures come back as `{"error":{"code":"...","message":"..."}}`.

mod builtin;
mod config;
mod descriptor;
pub mod edit;
mod process;

pub use builtin::EnvResolver;
pub use config::{
    config_by_stack_source, config_section_name, plugin_config, PluginConfig, ResolverConfig,
};
pub use descriptor::{
    install_plugin_with_path, installed_location, read_descriptor, validate_location,
    InstallOptions,
};
pub use process::ProcessResolver;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::debug;

use crate::core::constants;
use crate::core::format::Section;
use crate::error::{PluginError, ResolverError, Result};

/// A resolved key; `None` means the resolver could not fetch it.
pub type ResolvedEntry = (String, Option<String>);

/// One property handed to a resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketEntry {
    pub key: String,
    pub path: Option<String>,
    /// Value to write, for `add` and `update`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// The full property section as written in the stack.
    pub config: Section,
}

impl BucketEntry {
    pub fn new(key: impl Into<String>, config: Section) -> Self {
        let path = config
            .get("path")
            .or_else(|| config.get("path?"))
            .and_then(crate::core::property::scalar_text);
        Self {
            key: key.into(),
            path,
            value: None,
            config,
        }
    }

    pub fn with_value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }
}

/// What a plugin says about itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub alias: String,
    #[serde(default)]
    pub required_config: Vec<String>,
    #[serde(default)]
    pub install_path: String,
}

/// `.env` data pushed through `importEnv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPayload {
    pub data: Map<String, Value>,
    pub stack_name: String,
}

impl ImportPayload {
    pub fn new(data: &[(String, String)], stack_name: impl Into<String>) -> Self {
        Self {
            data: data
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
            stack_name: stack_name.into(),
        }
    }
}

/// A property a resolver stored during `importEnv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedEntry {
    pub key: String,
    pub path: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// A secret backend.
///
/// `config` is the resolver's `RESOLVER_CONFIG_<ALIAS>` section. Per-key
/// failures in `resolve_all` are `None` values; an `Err` is a
/// resolver-level failure and aborts the whole call.
pub trait Resolver {
    fn alias(&self) -> &str;

    fn resolve_all(&self, entries: &[BucketEntry], config: &Section) -> Result<Vec<ResolvedEntry>>;

    fn add(&self, entry: &BucketEntry, config: &Section) -> Result<()>;

    fn remove(&self, entry: &BucketEntry, config: &Section) -> Result<()>;

    fn update(&self, _entry: &BucketEntry, _config: &Section) -> Result<()> {
        Err(ResolverError::Unsupported {
            alias: self.alias().to_string(),
            operation: "update",
        }
        .into())
    }

    fn import_env(&self, payload: &ImportPayload, config: &Section) -> Result<Vec<ImportedEntry>>;

    fn info(&self) -> Result<PluginInfo>;
}

/// Turns an installed location into a [`Resolver`].
pub trait Loader {
    fn load(&self, alias: &str, installed: &str) -> Result<Box<dyn Resolver>>;
}

/// Loads built-in resolvers and external executables.
///
/// Relative executable paths are taken relative to `base`.
#[derive(Debug, Clone)]
pub struct DefaultLoader {
    base: PathBuf,
}

impl DefaultLoader {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl Loader for DefaultLoader {
    fn load(&self, alias: &str, installed: &str) -> Result<Box<dyn Resolver>> {
        if let Some(name) = installed.strip_prefix(constants::BUILTIN_PREFIX) {
            debug!(alias, name, "loading builtin resolver");
            return builtin::load(alias, name);
        }

        let program = descriptor::locate_executable(&self.base, installed).ok_or_else(|| {
            PluginError::InvalidInstallation {
                location: installed.to_string(),
                reason: "executable not found".to_string(),
            }
        })?;
        debug!(alias, program = %program.display(), "loading plugin executable");
        Ok(Box::new(ProcessResolver::new(alias, program)))
    }
}
