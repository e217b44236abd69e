//! Validation of names that become file names under `.ymir`.
//!
//! Stack names and plugin aliases are joined onto `.ymir/stacks`,
//! `.ymir/stack-config` and `.ymir/plugins`, so each must be a single
//! plain path component.

use crate::error::{PluginError, Result, StackError};

/// Validate a stack name.
///
/// # Errors
///
/// Returns `StackError::InvalidName` if the name is empty, is `.` or `..`,
/// or contains a path separator or `..`.
pub fn validate_stack_name(name: &str) -> Result<()> {
    match component_problem(name) {
        Some(reason) => Err(StackError::InvalidName {
            name: name.to_string(),
            reason,
        }
        .into()),
        None => Ok(()),
    }
}

/// Validate a plugin alias.
///
/// # Errors
///
/// Returns `PluginError::InvalidAlias` under the same rules as
/// [`validate_stack_name`].
pub fn validate_alias(alias: &str) -> Result<()> {
    match component_problem(alias) {
        Some(reason) => Err(PluginError::InvalidAlias {
            alias: alias.to_string(),
            reason,
        }
        .into()),
        None => Ok(()),
    }
}

fn component_problem(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some("cannot be empty".to_string());
    }
    if let Some(ch) = name.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
        return Some(format!("cannot contain '{}'", ch.escape_default()));
    }
    if name == "." || name.contains("..") {
        return Some("cannot refer outside .ymir".to_string());
    }
    None
}
