//! `.env` export and import commands.

use std::path::Path;

use crate::cli::{destination, output, Destination};
use crate::core::export::export_stack;
use crate::core::import::import_env_file;
use crate::core::plugin::DefaultLoader;
use crate::core::project::Project;
use crate::error::Result;

/// Resolve `stack` (or the checked out one) and write its `.env` file.
pub fn export(project: &Project, stack: Option<&str>) -> Result<()> {
    let stack = match stack {
        Some(stack) => stack.to_string(),
        None => project.current_stack_name()?,
    };

    let report = export_stack(project, &stack, &DefaultLoader::new(project.root()))?;

    output::success(&format!(
        "exported {} keys from {} to {}",
        report.count,
        output::key(&stack),
        output::path(report.path.display())
    ));
    for key in &report.unresolved {
        output::warn(&format!("{} did not resolve, written as null", output::key(key)));
    }
    Ok(())
}

pub fn import(
    project: &Project,
    file: &Path,
    resolver: Option<&str>,
    dest: &Destination,
) -> Result<()> {
    let stack = destination(project, dest)?;
    let report = import_env_file(
        project,
        file,
        &stack,
        resolver,
        &DefaultLoader::new(project.root()),
    )?;

    output::success(&format!(
        "imported {} keys from {} into {} via {}",
        report.added.len(),
        output::path(file.display()),
        output::key(&stack),
        report.alias
    ));
    for key in &report.added {
        output::list_item(key);
    }
    for (key, reason) in &report.skipped {
        output::warn(&format!("skipped {}: {}", output::key(key), reason));
    }
    Ok(())
}
