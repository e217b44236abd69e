//! Property commands: add, update, remove.
//!
//! Edits land in the stack file. With `--value` or `--purge` the change is
//! forwarded to the property's resolver first, so a failing resolver leaves
//! the stack untouched.

use std::collections::BTreeMap;
use tracing::debug;

use crate::cli::{destination, output, Destination, PropertyArgs};
use crate::core::format::Section;
use crate::core::plugin::{edit, plugin_config, BucketEntry, DefaultLoader, Resolver, ResolverConfig};
use crate::core::project::Project;
use crate::core::property::{format_key, strip_marker, Property, RequiredProps};
use crate::core::stack::{
    add_property, parsed_stack, remove_property, update_property, StackSource,
};
use crate::error::{Result, StackError};

impl PropertyArgs {
    /// Overlay the given fields on `prop`.
    fn apply(self, prop: &mut Property) {
        if let Some(path) = self.path {
            prop.path = Some(path);
        }
        if let Some(description) = self.description {
            prop.description = Some(description);
        }
        if let Some(resolver) = self.resolver {
            prop.resolver = Some(resolver);
        }
        if let Some(required) = self.required {
            prop.required = Some(required);
        }
    }
}

pub fn add(
    project: &Project,
    key: &str,
    args: PropertyArgs,
    value: Option<String>,
    dest: &Destination,
) -> Result<()> {
    let key = format_key(key)?;
    let stack = destination(project, dest)?;

    let (doc, _) = parsed_stack(project, &stack, false)?;
    if doc.contains(&key) {
        return Err(StackError::PropertyExists { key, stack }.into());
    }

    let mut prop = Property::default();
    args.apply(&mut prop);
    if prop.path.is_none() {
        return Err(StackError::MissingRequired {
            key,
            missing: vec!["path".to_string()],
        }
        .into());
    }

    if let Some(value) = value {
        let (resolver, config) = resolver_for(project, &stack, &prop)?;
        let entry = stack_entry(&key, &prop).with_value(Some(value));
        edit::add(resolver.as_ref(), &entry, &config)?;
        output::success(&format!("stored {} in {}", output::key(&key), resolver.alias()));
    }

    add_property(project, &stack, &key, &prop, BTreeMap::new())?;
    output::success(&format!("added {} to stack {}", output::key(&key), stack));
    Ok(())
}

/// Merge the given fields over the current definition of `key`.
pub fn update(
    project: &Project,
    key: &str,
    args: PropertyArgs,
    value: Option<String>,
    dest: &Destination,
) -> Result<()> {
    let key = format_key(key)?;
    let stack = destination(project, dest)?;

    let (doc, comments) = parsed_stack(project, &stack, true)?;
    let Some(section) = doc.get(&key) else {
        output::warn(&format!("{} is not defined in stack {}", output::key(&key), stack));
        return Ok(());
    };

    let mut prop = Property::from_section(section);
    args.apply(&mut prop);

    if let Some(value) = value {
        let (resolver, config) = resolver_for(project, &stack, &prop)?;
        let entry = stack_entry(&key, &prop).with_value(Some(value));
        edit::update(resolver.as_ref(), &entry, &config)?;
        output::success(&format!("updated {} in {}", output::key(&key), resolver.alias()));
    }

    // Comments follow the marker-free keys of the rewritten section.
    let section_comments = comments
        .section(&key)
        .map(|c| {
            c.iter()
                .map(|(k, v)| (strip_marker(k).to_string(), v.clone()))
                .collect()
        })
        .unwrap_or_default();

    update_property(project, &stack, &key, &prop, section_comments)?;
    output::success(&format!("updated {} in stack {}", output::key(&key), stack));
    Ok(())
}

pub fn remove(project: &Project, key: &str, purge: bool, dest: &Destination) -> Result<()> {
    let key = format_key(key)?;
    let stack = destination(project, dest)?;

    let (doc, _) = parsed_stack(project, &stack, false)?;
    let Some(section) = doc.get(&key) else {
        output::warn(&format!("{} is not defined in stack {}", output::key(&key), stack));
        return Ok(());
    };

    if purge {
        let prop = Property::from_section(section);
        let (resolver, config) = resolver_for(project, &stack, &prop)?;
        let entry = BucketEntry::new(&key, section.clone());
        edit::remove(resolver.as_ref(), &entry, &config)?;
        output::success(&format!("purged {} from {}", output::key(&key), resolver.alias()));
    }

    remove_property(project, &stack, &key)?;
    output::success(&format!("removed {} from stack {}", output::key(&key), stack));
    Ok(())
}

/// `prop` as a resolver sees it during `resolveAll`: keys spelled as on disk.
fn stack_entry(key: &str, prop: &Property) -> BucketEntry {
    BucketEntry::new(key, RequiredProps::default().mark(&prop.to_section()))
}

/// Load the resolver `prop` routes to: its tag, else the stack's default.
fn resolver_for(
    project: &Project,
    stack: &str,
    prop: &Property,
) -> Result<(Box<dyn Resolver>, Section)> {
    let parsed = StackSource::load(project, stack)?.parse();
    let alias = match &prop.resolver {
        Some(alias) => alias.clone(),
        None => parsed.default_resolver()?,
    };
    debug!(stack, alias = %alias, "forwarding property edit");

    let mut resolvers = ResolverConfig::new();
    resolvers.insert(alias.clone(), plugin_config(project, &parsed, &alias)?);
    edit::load_configured(
        project.ymir_path(),
        &resolvers,
        &alias,
        &DefaultLoader::new(project.root()),
    )
}
