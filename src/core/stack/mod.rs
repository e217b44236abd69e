//! Stacks and their configs.
//!
//! A named stack is always read together with the `default` stack and both
//! stack-config files. [`StackSource`] holds the four raw texts,
//! [`ParsedStack`] the four parsed documents.

mod edit;
mod ops;

pub use edit::{add_property, destination_stack, remove_property, update_property};
pub use ops::{checkout, create_stack, remove_stack};

use std::path::PathBuf;
use tracing::debug;

use crate::core::constants;
use crate::core::format::{parse_stack_file, serialize_stack, CommentMap, StackDocument};
use crate::core::project::Project;
use crate::core::property::{tagged_resolver, RequiredProps};
use crate::core::types::Alias;
use crate::error::{Result, StackError};

/// Raw text of a stack, the default stack, and both their configs.
#[derive(Debug, Clone, Default)]
pub struct StackSource {
    pub stack: String,
    pub default_stack: String,
    pub stack_config: String,
    pub default_stack_config: String,
}

impl StackSource {
    /// Read all four files for `name`.
    ///
    /// # Errors
    ///
    /// Returns `StackError::NotFound` if a stack file is missing, or
    /// `StackError::ConfigNotFound` if a stack-config file is missing.
    pub fn load(project: &Project, name: &str) -> Result<Self> {
        debug!(stack = name, "loading stack source");
        Ok(Self {
            stack: read_stack(project, name)?,
            default_stack: read_stack(project, constants::DEFAULT_STACK)?,
            stack_config: read_stack_config(project, name)?,
            default_stack_config: read_stack_config(project, constants::DEFAULT_STACK)?,
        })
    }

    pub fn parse(&self) -> ParsedStack {
        ParsedStack {
            stack: parse_stack_file(&self.stack, false).0,
            default_stack: parse_stack_file(&self.default_stack, false).0,
            stack_config: parse_stack_file(&self.stack_config, false).0,
            default_stack_config: parse_stack_file(&self.default_stack_config, false).0,
        }
    }
}

/// [`StackSource`] after parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedStack {
    pub stack: StackDocument,
    pub default_stack: StackDocument,
    pub stack_config: StackDocument,
    pub default_stack_config: StackDocument,
}

impl ParsedStack {
    /// `DEFAULT_RESOLVER.name` from the stack config, else the default config.
    ///
    /// # Errors
    ///
    /// Returns `StackError::NoDefaultResolver` if neither names one.
    pub fn default_resolver(&self) -> Result<Alias> {
        default_resolver_of(&self.stack_config)
            .or_else(|| default_resolver_of(&self.default_stack_config))
            .ok_or_else(|| StackError::NoDefaultResolver.into())
    }

    /// Every resolver alias the stack can route to, first appearance wins.
    ///
    /// Both default resolvers come first, then the `resolver?` tags of the
    /// named stack and the default stack.
    pub fn resolver_aliases(&self) -> Vec<Alias> {
        let mut aliases: Vec<Alias> = Vec::new();
        let mut push = |alias: String| {
            if !aliases.contains(&alias) {
                aliases.push(alias);
            }
        };

        if let Some(alias) = default_resolver_of(&self.stack_config) {
            push(alias);
        }
        if let Some(alias) = default_resolver_of(&self.default_stack_config) {
            push(alias);
        }
        for doc in [&self.stack, &self.default_stack] {
            for (name, section) in doc.iter() {
                if name == constants::SECTION_DESCRIBE {
                    continue;
                }
                if let Some(alias) = tagged_resolver(section) {
                    push(alias);
                }
            }
        }
        aliases
    }

    /// `FILE` target from the stack config, else the default config.
    ///
    /// # Errors
    ///
    /// Returns `StackError::NoFileConfig` if neither has a `FILE` section.
    pub fn file_target(&self) -> Result<FileTarget> {
        let section = self
            .stack_config
            .get(constants::SECTION_FILE)
            .or_else(|| self.default_stack_config.get(constants::SECTION_FILE))
            .ok_or(StackError::NoFileConfig)?;

        let field = |name: &str, fallback: &str| {
            section
                .get(name)
                .or_else(|| section.get(&format!("{}?", name)))
                .and_then(crate::core::property::scalar_text)
                .unwrap_or_else(|| fallback.to_string())
        };

        Ok(FileTarget {
            path: field("path", "."),
            name: field("name", constants::ENV_FILE),
        })
    }
}

/// Where `export` writes the `.env` file, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub path: String,
    pub name: String,
}

impl FileTarget {
    pub fn resolve(&self, project: &Project) -> PathBuf {
        project.root().join(&self.path).join(&self.name)
    }
}

fn default_resolver_of(config: &StackDocument) -> Option<Alias> {
    let section = config.get(constants::SECTION_DEFAULT_RESOLVER)?;
    section
        .get("name")
        .or_else(|| section.get("name?"))
        .and_then(crate::core::property::scalar_text)
}

fn read_stack(project: &Project, name: &str) -> Result<String> {
    let path = project.stack_path(name);
    if !path.is_file() {
        return Err(StackError::NotFound {
            name: name.to_string(),
            path,
        }
        .into());
    }
    Ok(std::fs::read_to_string(path)?)
}

fn read_stack_config(project: &Project, name: &str) -> Result<String> {
    let path = project.stack_config_path(name);
    if !path.is_file() {
        return Err(StackError::ConfigNotFound {
            name: name.to_string(),
            path,
        }
        .into());
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Parse one stack file, optionally with its comments.
pub fn parsed_stack(
    project: &Project,
    name: &str,
    store_comments: bool,
) -> Result<(StackDocument, CommentMap)> {
    let content = read_stack(project, name)?;
    Ok(parse_stack_file(&content, store_comments))
}

/// Parse one stack-config file.
pub fn parsed_stack_config(project: &Project, name: &str) -> Result<StackDocument> {
    let content = read_stack_config(project, name)?;
    Ok(parse_stack_file(&content, false).0)
}

/// Serialize and write a stack with the default required-props policy.
/// Returns the written text.
pub fn write_stack(
    project: &Project,
    name: &str,
    doc: &StackDocument,
    comments: &CommentMap,
) -> Result<String> {
    let text = serialize_stack(doc, Some(comments), &RequiredProps::default());
    let path = project.stack_path(name);
    debug!(path = %path.display(), sections = doc.len(), "writing stack");
    std::fs::write(path, &text)?;
    Ok(text)
}

/// Stack config with `FILE` and `DEFAULT_RESOLVER` filled from the default
/// config where missing. `DESCRIBE` always comes from the default config.
///
/// # Errors
///
/// Returns `StackError::InvalidConfig` naming every section missing from
/// both files.
pub fn stack_config_with_defaults(project: &Project, name: &str) -> Result<StackDocument> {
    let mut config = parsed_stack_config(project, name)?;
    let defaults = parsed_stack_config(project, constants::DEFAULT_STACK)?;

    match defaults.get(constants::SECTION_DESCRIBE) {
        Some(describe) => {
            config.insert(constants::SECTION_DESCRIBE, describe.clone());
        }
        None => {
            config.remove(constants::SECTION_DESCRIBE);
        }
    }

    let mut missing = Vec::new();
    for &section in constants::DEFAULTED_CONFIG_SECTIONS {
        if config.contains(section) {
            continue;
        }
        match defaults.get(section) {
            Some(fallback) => {
                config.insert(section, fallback.clone());
            }
            None => missing.push(section.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(StackError::InvalidConfig { missing }.into());
    }
    Ok(config)
}

/// Shallow-merge `props` into stack `name` and write it back, keeping
/// comments. Returns the written text.
///
/// # Errors
///
/// Returns `StackError::NotFound` if the stack does not exist.
pub fn get_and_merge(project: &Project, name: &str, props: StackDocument) -> Result<String> {
    let (mut doc, comments) = parsed_stack(project, name, true)?;
    doc.merge(props);
    write_stack(project, name, &doc, &comments)
}
