//! Plugin descriptor files (`.ymir/plugins/<alias>`).
//!
//! ```text
//! [DESCRIBE]
//!   alias: "ssm"
//!   pk_name?: "ymir-plugin-ssm"
//!
//! [LOCATION]
//!   path: "/usr/local/bin/ymir-plugin-ssm"
//!   install_cmd?: "cargo install ymir-plugin-ssm"
//!   is_global?: true
//! ```

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::builtin;
use crate::core::constants;
use crate::core::format::{parse_stack_file, serialize_stack, StackDocument};
use crate::core::project::Project;
use crate::core::property::{scalar_text, RequiredProps};
use crate::core::types::Location;
use crate::core::validation::validate_alias;
use crate::error::{PluginError, Result};

/// Optional descriptor fields written by [`install_plugin_with_path`].
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub pk_name: Option<String>,
    pub install_cmd: Option<String>,
    pub is_global: bool,
}

/// Parsed descriptor of `alias`.
///
/// # Errors
///
/// Returns `PluginError::InvalidAlias` for an alias that is not a plain
/// file name and `PluginError::ConfigNotFound` if the file does not exist.
pub fn read_descriptor(project: &Project, alias: &str) -> Result<StackDocument> {
    validate_alias(alias)?;
    let path = project.plugin_path(alias);
    if !path.is_file() {
        return Err(PluginError::ConfigNotFound {
            alias: alias.to_string(),
            path,
        }
        .into());
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(parse_stack_file(&content, false).0)
}

/// `LOCATION.path` of a descriptor.
///
/// # Errors
///
/// Returns `PluginError::InvalidConfig` if it is missing or empty.
pub fn installed_location(alias: &str, descriptor: &StackDocument) -> Result<Location> {
    descriptor
        .get(constants::SECTION_LOCATION)
        .and_then(|location| location.get("path").or_else(|| location.get("path?")))
        .and_then(scalar_text)
        .filter(|path| !path.trim().is_empty())
        .ok_or_else(|| {
            PluginError::InvalidConfig {
                alias: alias.to_string(),
                reason: "missing install path in LOCATION".to_string(),
            }
            .into()
        })
}

/// Check an installed location: a known builtin, an existing path, or
/// a command on `PATH`.
///
/// # Errors
///
/// Returns `PluginError::InvalidInstallation` otherwise.
pub fn validate_location(base: &Path, location: &str) -> Result<()> {
    let found = match location.strip_prefix(constants::BUILTIN_PREFIX) {
        Some(name) => builtin::exists(name),
        None => locate_executable(base, location).is_some(),
    };
    if !found {
        return Err(PluginError::InvalidInstallation {
            location: location.to_string(),
            reason: "unable to locate plugin".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Resolve an executable location.
///
/// Anything containing a path separator is a path (relative to `base`),
/// anything else is looked up on `PATH`.
pub(super) fn locate_executable(base: &Path, location: &str) -> Option<PathBuf> {
    let is_path = location.contains('/') || location.contains(std::path::MAIN_SEPARATOR);
    if !is_path {
        return which::which(location).ok();
    }
    let path = base.join(location);
    path.is_file().then_some(path)
}

/// Register the plugin at `location` under `alias`.
///
/// Merges into an existing descriptor, keeping its comments and any fields
/// not written here. Returns the descriptor path.
///
/// # Errors
///
/// Returns `PluginError::InvalidAlias` if `alias` is not a plain file name
/// and `PluginError::InvalidInstallation` if `location` does not exist.
pub fn install_plugin_with_path(
    project: &Project,
    location: &str,
    alias: &str,
    opts: &InstallOptions,
) -> Result<PathBuf> {
    validate_alias(alias)?;
    validate_location(project.root(), location)?;

    let path = project.plugin_path(alias);
    let (mut doc, comments) = if path.is_file() {
        debug!(alias, "merging into existing plugin descriptor");
        parse_stack_file(&std::fs::read_to_string(&path)?, true)
    } else {
        Default::default()
    };

    let describe = doc.entry(constants::SECTION_DESCRIBE);
    describe.insert("alias".to_string(), Value::String(alias.to_string()));
    let pk_name = opts
        .pk_name
        .clone()
        .unwrap_or_else(|| package_name(location));
    describe.insert("pk_name?".to_string(), Value::String(pk_name));

    let section = doc.entry(constants::SECTION_LOCATION);
    section.insert("path".to_string(), Value::String(location.to_string()));
    if let Some(install_cmd) = &opts.install_cmd {
        section.insert("install_cmd?".to_string(), Value::String(install_cmd.clone()));
    }
    section.insert("is_global?".to_string(), Value::Bool(opts.is_global));

    let text = serialize_stack(&doc, Some(&comments), &RequiredProps::plugin());
    std::fs::write(&path, text)?;

    info!(alias, location, "installed plugin");
    Ok(path)
}

/// Best guess at a package name: the file name of the location.
fn package_name(location: &str) -> String {
    let trimmed = location.trim_end_matches('/');
    match trimmed.strip_prefix(constants::BUILTIN_PREFIX) {
        Some(name) => format!("ymir-{}", name),
        None => Path::new(trimmed)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| trimmed.to_string()),
    }
}
