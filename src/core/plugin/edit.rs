//! Checked resolver calls.
//!
//! Unlike aggregation, which passes resolver errors through untouched,
//! these wrap every failure in an operation-specific error carrying the
//! alias and key.

use std::path::Path;
use tracing::debug;

use super::{BucketEntry, ImportPayload, ImportedEntry, Loader, Resolver, ResolverConfig};
use crate::core::format::Section;
use crate::core::project::plugin_path_in;
use crate::error::{PluginError, ResolverError, Result};

pub fn add(resolver: &dyn Resolver, entry: &BucketEntry, config: &Section) -> Result<()> {
    debug!(alias = resolver.alias(), key = %entry.key, "resolver add");
    resolver.add(entry, config).map_err(|e| {
        ResolverError::Add {
            alias: resolver.alias().to_string(),
            key: entry.key.clone(),
            source: Box::new(e),
        }
        .into()
    })
}

pub fn remove(resolver: &dyn Resolver, entry: &BucketEntry, config: &Section) -> Result<()> {
    debug!(alias = resolver.alias(), key = %entry.key, "resolver remove");
    resolver.remove(entry, config).map_err(|e| {
        ResolverError::Remove {
            alias: resolver.alias().to_string(),
            key: entry.key.clone(),
            source: Box::new(e),
        }
        .into()
    })
}

pub fn update(resolver: &dyn Resolver, entry: &BucketEntry, config: &Section) -> Result<()> {
    debug!(alias = resolver.alias(), key = %entry.key, "resolver update");
    resolver.update(entry, config).map_err(|e| {
        ResolverError::Update {
            alias: resolver.alias().to_string(),
            key: entry.key.clone(),
            source: Box::new(e),
        }
        .into()
    })
}

/// Load the resolver configured under `alias`.
///
/// # Errors
///
/// Returns `PluginError::ConfigNotFound` if `alias` is not configured and
/// `PluginError::InvalidConfig` if it has no installed location.
pub fn load_configured(
    ymir_path: &Path,
    resolvers: &ResolverConfig,
    alias: &str,
    loader: &dyn Loader,
) -> Result<(Box<dyn Resolver>, Section)> {
    let plugin = resolvers.get(alias).ok_or_else(|| PluginError::ConfigNotFound {
        alias: alias.to_string(),
        path: plugin_path_in(ymir_path, alias),
    })?;
    let installed = plugin.installed.as_deref().ok_or_else(|| PluginError::InvalidConfig {
        alias: alias.to_string(),
        reason: "missing installed path".to_string(),
    })?;
    Ok((loader.load(alias, installed)?, plugin.config.clone()))
}

/// Push `.env` data through the `importEnv` of the resolver under `alias`.
///
/// # Errors
///
/// Configuration problems are reported as by [`load_configured`]; a
/// failing plugin call is `ResolverError::Import`.
pub fn import_env_data(
    ymir_path: &Path,
    data: &[(String, String)],
    resolvers: &ResolverConfig,
    alias: &str,
    stack_name: &str,
    loader: &dyn Loader,
) -> Result<Vec<ImportedEntry>> {
    let (resolver, config) = load_configured(ymir_path, resolvers, alias, loader)?;
    let payload = ImportPayload::new(data, stack_name);

    debug!(alias, stack = stack_name, count = data.len(), "importing env data");
    resolver.import_env(&payload, &config).map_err(|e| {
        ResolverError::Import {
            alias: alias.to_string(),
            source: Box::new(e),
        }
        .into()
    })
}
