//! Stack bookkeeping commands: checkout, stack, create, delete.

use std::io::{self, IsTerminal};
use tracing::info;

use crate::cli::output;
use crate::core::constants;
use crate::core::project::Project;
use crate::core::format::serialize_stack;
use crate::core::property::RequiredProps;
use crate::core::stack::{
    checkout as checkout_stack, create_stack, remove_stack, stack_config_with_defaults,
};
use crate::error::Result;

/// Switch to `name`, creating it first with `create`.
pub fn checkout(project: &Project, name: &str, create: bool) -> Result<()> {
    if create && !project.stack_exists(name) {
        create_stack(project, name)?;
        output::success(&format!("created stack {}", output::key(name)));
    }
    checkout_stack(project, name, None)?;
    output::success(&format!("switched to stack {}", output::key(name)));
    Ok(())
}

/// Print the checked out stack, every stack, the stack file path, or the
/// effective stack config.
pub fn show(project: &Project, list: bool, path: bool, config: bool) -> Result<()> {
    let (current, location) = project.current_stack()?;

    if config {
        let doc = stack_config_with_defaults(project, &current)?;
        print!("{}", serialize_stack(&doc, None, &RequiredProps::for_stack_config(&doc)));
        return Ok(());
    }

    if list {
        for name in project.list_stacks()? {
            if name == current {
                output::current_item(&name);
            } else {
                output::list_item(&name);
            }
        }
        return Ok(());
    }

    if path {
        println!("{}", location.display());
    } else {
        println!("{}", current);
    }
    Ok(())
}

pub fn create(project: &Project, name: &str) -> Result<()> {
    create_stack(project, name)?;
    output::success(&format!("created stack {}", output::key(name)));
    output::hint(&format!(
        "switch to it with {}",
        output::cmd(&format!("ymir checkout {}", name))
    ));
    Ok(())
}

/// Delete the stack file of `name`.
///
/// Deleting the checked out stack asks first when stdin is a terminal,
/// unless `yes` is set.
pub fn delete(
    project: &Project,
    name: &str,
    force: bool,
    checkout_to: Option<&str>,
    yes: bool,
) -> Result<()> {
    let is_current = project
        .current_stack_name()
        .map(|current| current == name)
        .unwrap_or(false);

    if is_current && force && !yes && io::stdin().is_terminal() {
        let next = checkout_to.unwrap_or(constants::DEFAULT_STACK);
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "{} is checked out. Delete it and switch to {}?",
                name, next
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            output::dimmed("aborted");
            return Ok(());
        }
    }

    remove_stack(project, name, force, checkout_to)?;
    info!(stack = name, "deleted stack");

    output::success(&format!("deleted stack {}", output::key(name)));
    if is_current {
        let next = project.current_stack_name()?;
        output::kv("checked out", next);
    }
    Ok(())
}
