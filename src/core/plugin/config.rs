//! Per-alias resolver configuration.

use std::path::PathBuf;
use tracing::debug;

use super::descriptor::{installed_location, read_descriptor};
use crate::core::constants;
use crate::core::format::Section;
use crate::core::project::Project;
use crate::core::stack::ParsedStack;
use crate::core::types::{Alias, Location};
use crate::error::Result;

/// Everything needed to call one resolver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginConfig {
    /// Descriptor file, `.ymir/plugins/<alias>`.
    pub file: PathBuf,
    /// `LOCATION.path` of the descriptor.
    pub installed: Option<Location>,
    /// `RESOLVER_CONFIG_<ALIAS>` section of the stack config.
    pub config: Section,
}

/// Alias to [`PluginConfig`], in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolverConfig {
    entries: Vec<(Alias, PluginConfig)>,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, alias: &str) -> Option<&PluginConfig> {
        self.entries
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, c)| c)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.get(alias).is_some()
    }

    /// Insert or replace; a replaced alias keeps its position.
    pub fn insert(&mut self, alias: impl Into<Alias>, config: PluginConfig) {
        let alias = alias.into();
        match self.entries.iter_mut().find(|(a, _)| *a == alias) {
            Some(existing) => existing.1 = config,
            None => self.entries.push((alias, config)),
        }
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(a, _)| a.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Name of the stack-config section configuring `alias`.
pub fn config_section_name(alias: &str) -> String {
    format!("{}{}", constants::RESOLVER_CONFIG_PREFIX, alias.to_uppercase())
}

/// Config of a single alias as seen from `parsed`.
///
/// `config` comes from the stack config, falling back to the default
/// stack config, and is empty when neither has the section.
///
/// # Errors
///
/// Returns `PluginError::ConfigNotFound` if the alias has no descriptor
/// and `PluginError::InvalidConfig` if the descriptor has no `LOCATION.path`.
pub fn plugin_config(project: &Project, parsed: &ParsedStack, alias: &str) -> Result<PluginConfig> {
    let descriptor = read_descriptor(project, alias)?;
    let installed = installed_location(alias, &descriptor)?;

    let section_name = config_section_name(alias);
    let config = parsed
        .stack_config
        .get(&section_name)
        .or_else(|| parsed.default_stack_config.get(&section_name))
        .cloned()
        .unwrap_or_default();

    debug!(alias, installed = %installed, "resolver configured");
    Ok(PluginConfig {
        file: project.plugin_path(alias),
        installed: Some(installed),
        config,
    })
}

/// Build the resolver config for every alias the stack can route to.
///
/// # Errors
///
/// Fails like [`plugin_config`] on the first alias that cannot be configured.
pub fn config_by_stack_source(project: &Project, parsed: &ParsedStack) -> Result<ResolverConfig> {
    let mut resolvers = ResolverConfig::new();
    for alias in parsed.resolver_aliases() {
        let config = plugin_config(project, parsed, &alias)?;
        resolvers.insert(alias, config);
    }
    Ok(resolvers)
}
