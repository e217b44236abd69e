//! `.env` file into a stack.
//!
//! The values go to the resolver; the stack only records where they went.

use std::path::Path;
use tracing::{info, warn};

use crate::core::dotenv;
use crate::core::plugin::{edit, plugin_config, Loader, ResolverConfig};
use crate::core::project::Project;
use crate::core::property::{format_key, Property};
use crate::core::format::StackDocument;
use crate::core::stack::{get_and_merge, parsed_stack, StackSource};
use crate::core::types::{Alias, PropertyKey};
use crate::error::Result;

/// Outcome of an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub alias: Alias,
    pub added: Vec<PropertyKey>,
    /// Keys left alone, with the reason.
    pub skipped: Vec<(String, String)>,
}

/// Push the `.env` file at `file` through a resolver and record the
/// returned properties in `stack`.
///
/// `alias` defaults to the stack's default resolver. Properties get a
/// `resolver` tag only when they went to a different resolver. Keys that
/// already exist in the stack, or that cannot be section names, are skipped.
///
/// # Errors
///
/// Returns `PluginError::ConfigNotFound` or `PluginError::InvalidConfig`
/// for an unusable alias and `ResolverError::Import` if the plugin fails.
pub fn import_env_file(
    project: &Project,
    file: &Path,
    stack: &str,
    alias: Option<&str>,
    loader: &dyn Loader,
) -> Result<ImportReport> {
    let data = dotenv::load(file)?;
    let parsed = StackSource::load(project, stack)?.parse();

    let default_alias = parsed.default_resolver()?;
    let alias = alias.map(str::to_string).unwrap_or_else(|| default_alias.clone());

    let mut resolvers = ResolverConfig::new();
    resolvers.insert(alias.clone(), plugin_config(project, &parsed, &alias)?);

    let imported = edit::import_env_data(project.ymir_path(), &data, &resolvers, &alias, stack, loader)?;

    let (existing, _) = parsed_stack(project, stack, false)?;
    let mut additions = StackDocument::new();
    let mut report = ImportReport {
        alias: alias.clone(),
        added: Vec::new(),
        skipped: Vec::new(),
    };

    for entry in imported {
        let key = match format_key(&entry.key) {
            Ok(key) => key,
            Err(e) => {
                warn!(key = %entry.key, "skipping imported key");
                report.skipped.push((entry.key, e.to_string()));
                continue;
            }
        };
        if existing.contains(&key) || additions.contains(&key) {
            report.skipped.push((key, format!("already defined in stack {}", stack)));
            continue;
        }

        let mut prop = Property::with_path(entry.path);
        if alias != default_alias {
            prop.resolver = Some(alias.clone());
        }
        additions.insert(key.clone(), prop.to_section());
        report.added.push(key);
    }

    get_and_merge(project, stack, additions)?;
    info!(stack, alias = %alias, added = report.added.len(), "imported env file");
    Ok(report)
}
