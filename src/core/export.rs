//! Stack to `.env` file.

use std::path::PathBuf;
use tracing::info;

use crate::core::dotenv::{entries_to_env_file, write_env_file};
use crate::core::plugin::{config_by_stack_source, Loader};
use crate::core::project::Project;
use crate::core::resolve::resolve_stack;
use crate::core::stack::StackSource;
use crate::core::validation::validate_stack_name;
use crate::error::Result;

/// Outcome of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub count: usize,
    /// Keys no resolver returned a value for; written as `null`.
    pub unresolved: Vec<String>,
}

/// Resolve stack `name` and write its `.env` file.
///
/// The target is `<project>/<FILE.path>/<FILE.name>` from the stack config,
/// falling back to the default stack config.
///
/// # Errors
///
/// Returns `StackError::InvalidName`, stack loading errors, `StackError::NoDefaultResolver`,
/// `StackError::NoFileConfig`, plugin configuration errors, and resolver
/// errors as `resolve_stack` reports them.
pub fn export_stack(project: &Project, name: &str, loader: &dyn Loader) -> Result<ExportReport> {
    validate_stack_name(name)?;
    let parsed = StackSource::load(project, name)?.parse();
    let default_alias = parsed.default_resolver()?;
    let target = parsed.file_target()?.resolve(project);
    let resolvers = config_by_stack_source(project, &parsed)?;

    let resolved = resolve_stack(project.ymir_path(), &parsed, &default_alias, &resolvers, loader)?;
    let content = entries_to_env_file(&resolved);

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_env_file(&target, &content)?;

    let unresolved = resolved
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| key.clone())
        .collect();

    info!(stack = name, path = %target.display(), count = resolved.len(), "exported stack");
    Ok(ExportReport {
        path: target,
        count: resolved.len(),
        unresolved,
    })
}
