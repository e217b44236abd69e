//! Resolvers compiled into ymir.

use tracing::trace;

use super::{BucketEntry, ImportPayload, ImportedEntry, PluginInfo, ResolvedEntry, Resolver};
use crate::core::format::Section;
use crate::error::{PluginError, ResolverError, Result};

pub(super) fn load(alias: &str, name: &str) -> Result<Box<dyn Resolver>> {
    match name {
        EnvResolver::NAME => Ok(Box::new(EnvResolver::new(alias))),
        _ => Err(PluginError::InvalidInstallation {
            location: format!("{}{}", crate::core::constants::BUILTIN_PREFIX, name),
            reason: "unknown builtin resolver".to_string(),
        }
        .into()),
    }
}

/// Whether `name` is a builtin resolver.
pub(super) fn exists(name: &str) -> bool {
    name == EnvResolver::NAME
}

/// Reads values from the process environment; `path` is the variable name.
///
/// Read only: the environment of a finished process is not a store.
#[derive(Debug, Clone)]
pub struct EnvResolver {
    alias: String,
}

impl EnvResolver {
    pub const NAME: &'static str = "env";

    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
        }
    }

    fn unsupported(&self, operation: &'static str) -> crate::error::Error {
        ResolverError::Unsupported {
            alias: self.alias.clone(),
            operation,
        }
        .into()
    }
}

impl Resolver for EnvResolver {
    fn alias(&self) -> &str {
        &self.alias
    }

    fn resolve_all(&self, entries: &[BucketEntry], _config: &Section) -> Result<Vec<ResolvedEntry>> {
        Ok(entries
            .iter()
            .map(|entry| {
                let value = entry.path.as_deref().and_then(|var| std::env::var(var).ok());
                trace!(key = %entry.key, found = value.is_some(), "resolved from environment");
                (entry.key.clone(), value)
            })
            .collect())
    }

    fn add(&self, _entry: &BucketEntry, _config: &Section) -> Result<()> {
        Err(self.unsupported("add"))
    }

    fn remove(&self, _entry: &BucketEntry, _config: &Section) -> Result<()> {
        Err(self.unsupported("remove"))
    }

    fn import_env(&self, _payload: &ImportPayload, _config: &Section) -> Result<Vec<ImportedEntry>> {
        Err(self.unsupported("importEnv"))
    }

    fn info(&self) -> Result<PluginInfo> {
        Ok(PluginInfo {
            name: "ymir-env".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            alias: self.alias.clone(),
            required_config: Vec::new(),
            install_path: format!("{}{}", crate::core::constants::BUILTIN_PREFIX, Self::NAME),
        })
    }
}
