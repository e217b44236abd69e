//! Stack lifecycle: create, remove, checkout.

use tracing::{debug, info};

use crate::core::constants;
use crate::core::project::Project;
use crate::core::validation::validate_stack_name;
use crate::error::{Result, StackError};

/// Body of a freshly created stack file.
pub(crate) const NEW_STACK: &str =
    "[DESCRIBE]\n  description?: \"Variables shared by every stack belong in the default stack\"\n";

/// Create stack `name` with a `DESCRIBE` section and an empty stack config.
///
/// # Errors
///
/// Returns `StackError::InvalidName` for a name that is not a plain file
/// name, or `StackError::AlreadyExists` if the stack file exists.
pub fn create_stack(project: &Project, name: &str) -> Result<()> {
    validate_stack_name(name)?;
    if project.stack_exists(name) {
        return Err(StackError::AlreadyExists(name.to_string()).into());
    }

    std::fs::write(project.stack_path(name), NEW_STACK)?;
    std::fs::write(project.stack_config_path(name), "")?;

    info!(stack = name, "created stack");
    Ok(())
}

/// Delete the stack file of `name`.
///
/// The `default` stack can never be removed. Removing the checked out stack
/// needs `force` and moves the checkout to `checkout_to` (or `default`).
///
/// # Errors
///
/// Returns `StackError::InvalidName`, `StackError::DefaultProtected`,
/// `StackError::NotFound`, or `StackError::CurrentProtected`.
pub fn remove_stack(
    project: &Project,
    name: &str,
    force: bool,
    checkout_to: Option<&str>,
) -> Result<()> {
    validate_stack_name(name)?;
    if name == constants::DEFAULT_STACK {
        return Err(StackError::DefaultProtected.into());
    }
    if !project.stack_exists(name) {
        return Err(StackError::NotFound {
            name: name.to_string(),
            path: project.stack_path(name),
        }
        .into());
    }

    let is_current = project
        .current_stack_name()
        .map(|current| current == name)
        .unwrap_or(false);

    if is_current {
        if !force {
            return Err(StackError::CurrentProtected(name.to_string()).into());
        }
        let next = checkout_to.unwrap_or(constants::DEFAULT_STACK);
        if next == name {
            return Err(StackError::CurrentProtected(name.to_string()).into());
        }
        checkout(project, next, None)?;
    }

    std::fs::remove_file(project.stack_path(name))?;
    info!(stack = name, "removed stack");
    Ok(())
}

/// Make `name` the checked out stack.
///
/// `location` overrides the recorded path (`./stacks/<name>` otherwise).
///
/// # Errors
///
/// Returns `StackError::NotFound` if the stack does not exist.
pub fn checkout(project: &Project, name: &str, location: Option<&str>) -> Result<()> {
    validate_stack_name(name)?;
    if !project.stack_exists(name) {
        return Err(StackError::NotFound {
            name: name.to_string(),
            path: project.stack_path(name),
        }
        .into());
    }
    project.write_current_stack(name, location)?;
    debug!(stack = name, "checked out stack");
    Ok(())
}
