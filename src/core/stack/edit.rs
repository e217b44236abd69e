//! Property edits on a single stack file.
//!
//! Every edit is a read-modify-write of the whole file with the default
//! required-props policy, comments kept.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::{parsed_stack, write_stack};
use crate::core::constants;
use crate::core::project::Project;
use crate::core::property::Property;
use crate::core::types::StackName;
use crate::core::validation::validate_stack_name;
use crate::error::{Result, StackError};

/// Stack an edit applies to: `default` with `global`, the named `stack`,
/// otherwise the checked out one.
///
/// # Errors
///
/// Returns `StackError::ConflictingDestination` if both are given, or
/// `StackError::InvalidName` for a bad `stack`.
pub fn destination_stack(current: &str, global: bool, stack: Option<&str>) -> Result<StackName> {
    match (global, stack) {
        (true, Some(_)) => Err(StackError::ConflictingDestination.into()),
        (true, None) => Ok(constants::DEFAULT_STACK.to_string()),
        (false, Some(stack)) => {
            validate_stack_name(stack)?;
            Ok(stack.to_string())
        }
        (false, None) => Ok(current.to_string()),
    }
}

/// Add `key` to `stack`.
///
/// # Errors
///
/// Returns `StackError::PropertyExists` if the key is already defined.
pub fn add_property(
    project: &Project,
    stack: &str,
    key: &str,
    prop: &Property,
    comments: BTreeMap<String, String>,
) -> Result<()> {
    let (mut doc, mut stack_comments) = parsed_stack(project, stack, true)?;

    if doc.contains(key) {
        return Err(StackError::PropertyExists {
            key: key.to_string(),
            stack: stack.to_string(),
        }
        .into());
    }

    doc.insert(key, prop.to_section());
    stack_comments.set_section(key, comments);
    write_stack(project, stack, &doc, &stack_comments)?;

    debug!(stack, key, "added property");
    Ok(())
}

/// Replace the definition of `key` in `stack`.
///
/// The whole section is replaced, comments included. Returns `false` and
/// leaves the file alone when the key does not exist.
pub fn update_property(
    project: &Project,
    stack: &str,
    key: &str,
    prop: &Property,
    comments: BTreeMap<String, String>,
) -> Result<bool> {
    let (mut doc, mut stack_comments) = parsed_stack(project, stack, true)?;

    if !doc.contains(key) {
        warn!(stack, key, "tried to update a key that does not exist");
        return Ok(false);
    }

    doc.insert(key, prop.to_section());
    stack_comments.set_section(key, comments);
    write_stack(project, stack, &doc, &stack_comments)?;

    debug!(stack, key, "updated property");
    Ok(true)
}

/// Remove `key` and its comments from `stack`.
///
/// Returns `false` and leaves the file alone when the key does not exist.
pub fn remove_property(project: &Project, stack: &str, key: &str) -> Result<bool> {
    let (mut doc, mut stack_comments) = parsed_stack(project, stack, true)?;

    if doc.remove(key).is_none() {
        warn!(stack, key, "tried to remove a key that does not exist");
        return Ok(false);
    }

    stack_comments.remove_section(key);
    write_stack(project, stack, &doc, &stack_comments)?;

    debug!(stack, key, "removed property");
    Ok(true)
}
