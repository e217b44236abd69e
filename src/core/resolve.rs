//! Stack resolution.
//!
//! The named stack is laid over the default stack, every property is routed
//! to one resolver, and each resolver is called once with its bucket. Buckets
//! run one after another; results are concatenated in dispatch order.

use std::path::Path;
use tracing::{debug, info};

use crate::core::constants;
use crate::core::format::{Section, StackDocument};
use crate::core::plugin::edit::load_configured;
use crate::core::plugin::{BucketEntry, Loader, ResolvedEntry, ResolverConfig};
use crate::core::property::tagged_resolver;
use crate::core::stack::ParsedStack;
use crate::core::types::Alias;
use crate::error::Result;

/// Properties routed to one resolver, in merged stack order.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub alias: Alias,
    pub entries: Vec<BucketEntry>,
}

/// Merge `stack` over `default` without their `DESCRIBE` sections.
pub fn effective_stack(stack: &StackDocument, default: &StackDocument) -> StackDocument {
    let mut base = default.clone();
    base.remove(constants::SECTION_DESCRIBE);
    let mut named = stack.clone();
    named.remove(constants::SECTION_DESCRIBE);
    named.merged_over(&base)
}

/// Route every property of `stack` to a bucket.
///
/// One bucket exists per configured alias, in config order, even if it ends
/// up empty. Aliases without config get a bucket after those, in order of
/// first appearance.
pub fn partition(stack: &StackDocument, default_alias: &str, resolvers: &ResolverConfig) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = resolvers
        .aliases()
        .map(|alias| Bucket {
            alias: alias.to_string(),
            entries: Vec::new(),
        })
        .collect();

    for (key, section) in stack.iter() {
        let alias = route(section, default_alias);
        let entry = BucketEntry::new(key, section.clone());
        match buckets.iter_mut().find(|b| b.alias == alias) {
            Some(bucket) => bucket.entries.push(entry),
            None => buckets.push(Bucket {
                alias,
                entries: vec![entry],
            }),
        }
    }

    buckets
}

fn route(section: &Section, default_alias: &str) -> Alias {
    tagged_resolver(section).unwrap_or_else(|| default_alias.to_string())
}

/// Resolve every property of a stack.
///
/// # Errors
///
/// Returns `PluginError::ConfigNotFound` for a non-empty bucket whose alias
/// has no config, or `PluginError::InvalidConfig` if it has no installed
/// location. Loader and resolver errors are returned as they are; the
/// first failing bucket stops the run.
pub fn resolve_stack(
    ymir_path: &Path,
    parsed: &ParsedStack,
    default_alias: &str,
    resolvers: &ResolverConfig,
    loader: &dyn Loader,
) -> Result<Vec<ResolvedEntry>> {
    let effective = effective_stack(&parsed.stack, &parsed.default_stack);
    let buckets = partition(&effective, default_alias, resolvers);
    let mut resolved = Vec::with_capacity(effective.len());

    for bucket in buckets.into_iter().filter(|b| !b.entries.is_empty()) {
        debug!(alias = %bucket.alias, count = bucket.entries.len(), "dispatching bucket");
        let (resolver, config) = load_configured(ymir_path, resolvers, &bucket.alias, loader)?;
        resolved.extend(resolver.resolve_all(&bucket.entries, &config)?);
    }

    info!(count = resolved.len(), "resolved stack");
    Ok(resolved)
}
