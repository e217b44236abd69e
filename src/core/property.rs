//! Typed view over stack sections.
//!
//! On disk a property's optionality is encoded in the key (`description?`).
//! In memory [`Property`] strips that marker into plain optional fields, and
//! [`RequiredProps`] decides at write time which keys lose it again.

use serde_json::{Map, Value};

use crate::core::constants;
use crate::core::format::{Section, StackDocument};
use crate::error::{Result, StackError};

/// One key's definition inside a stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Property {
    /// Location hint for the resolver.
    pub path: Option<String>,
    /// Resolver alias overriding the stack's default resolver.
    pub resolver: Option<String>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub value: Option<Value>,
    /// Keys ymir does not interpret, marker stripped.
    pub extra: Map<String, Value>,
}

impl Property {
    /// Property with only a path.
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Read a section, treating `key` and `key?` alike.
    ///
    /// When both spellings exist the last one in file order wins.
    pub fn from_section(section: &Section) -> Self {
        let mut prop = Self::default();
        for (key, value) in section {
            match strip_marker(key) {
                "path" => prop.path = scalar_text(value),
                "resolver" => prop.resolver = scalar_text(value),
                "description" => prop.description = scalar_text(value),
                "required" => prop.required = value.as_bool(),
                "value" => prop.value = Some(value.clone()),
                other => {
                    prop.extra.insert(other.to_string(), value.clone());
                }
            }
        }
        prop
    }

    /// Section with marker-free keys; absent fields are left out.
    pub fn to_section(&self) -> Section {
        let mut section = Section::new();
        if let Some(path) = &self.path {
            section.insert("path".to_string(), Value::String(path.clone()));
        }
        if let Some(description) = &self.description {
            section.insert("description".to_string(), Value::String(description.clone()));
        }
        if let Some(resolver) = &self.resolver {
            section.insert("resolver".to_string(), Value::String(resolver.clone()));
        }
        if let Some(required) = self.required {
            section.insert("required".to_string(), Value::Bool(required));
        }
        if let Some(value) = &self.value {
            section.insert("value".to_string(), value.clone());
        }
        for (key, value) in &self.extra {
            section.insert(key.clone(), value.clone());
        }
        section
    }
}

/// Resolver alias a section is tagged with, if any.
pub fn tagged_resolver(section: &Section) -> Option<String> {
    section
        .get("resolver?")
        .or_else(|| section.get("resolver"))
        .and_then(scalar_text)
}

/// Key without its trailing `?` marker.
pub fn strip_marker(key: &str) -> &str {
    key.strip_suffix('?').unwrap_or(key)
}

/// Scalar value as text; strings are unquoted, `null` and containers yield `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Normalize and validate a property key (section name).
///
/// Keys are trimmed and upper-cased, then must be non-empty and made of
/// `A-Z` and `_` only, since that is all a section header can hold.
pub fn format_key(key: &str) -> Result<String> {
    let key = key.trim().to_uppercase();

    if key.is_empty() {
        return Err(StackError::InvalidKey {
            key,
            reason: "cannot be empty".to_string(),
        }
        .into());
    }

    if let Some((i, ch)) = key
        .chars()
        .enumerate()
        .find(|&(_, ch)| !(ch.is_ascii_uppercase() || ch == '_'))
    {
        return Err(StackError::InvalidKey {
            reason: format!(
                "invalid character '{}' at position {}. Only A-Z and underscore are allowed",
                ch,
                i + 1
            ),
            key,
        }
        .into());
    }

    Ok(key)
}

/// Whitelist of keys written without the `?` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredProps(Vec<String>);

impl RequiredProps {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    pub fn is_required(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }

    /// `key` as it is written to disk: `?` appended unless required or
    /// already marked.
    pub fn marked_key(&self, key: &str) -> String {
        if self.is_required(key) || key.ends_with('?') {
            key.to_string()
        } else {
            format!("{}?", key)
        }
    }

    /// `section` with every key spelled as on disk.
    pub fn mark(&self, section: &Section) -> Section {
        section
            .iter()
            .map(|(key, value)| (self.marked_key(key), value.clone()))
            .collect()
    }

    /// Whitelist for plugin descriptors.
    pub fn plugin() -> Self {
        Self::new(constants::PLUGIN_REQUIRED_PROPS.iter().copied())
    }

    /// Whitelist for a stack config: the fixed keys plus every key of every
    /// `RESOLVER_CONFIG_*` section.
    ///
    /// Because the whitelist is per file, a key named in one resolver block
    /// is also written as required wherever else it appears.
    pub fn for_stack_config(config: &StackDocument) -> Self {
        let mut keys: Vec<String> = constants::CONFIG_REQUIRED_PROPS
            .iter()
            .map(|k| k.to_string())
            .collect();
        for (name, section) in config.iter() {
            if name.starts_with(constants::RESOLVER_CONFIG_PREFIX) {
                keys.extend(section.keys().cloned());
            }
        }
        Self(keys)
    }
}

impl Default for RequiredProps {
    fn default() -> Self {
        Self::new(constants::DEFAULT_REQUIRED_PROPS.iter().copied())
    }
}
