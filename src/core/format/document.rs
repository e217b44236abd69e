//! In-memory stack documents.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Properties of one section, in file order.
pub type Section = Map<String, Value>;

/// An ordered mapping of section name to [`Section`].
///
/// Inserting an existing name replaces the section where it stands, so
/// merges behave like object spread: the first occurrence fixes the
/// position, the last one wins the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackDocument {
    sections: Vec<(String, Section)>,
}

impl StackDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// Get a section, creating an empty one at the end if missing.
    pub fn entry(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                self.sections.push((name.to_string(), Section::new()));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index].1
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert or replace a section; returns the replaced one.
    pub fn insert(&mut self, name: impl Into<String>, section: Section) -> Option<Section> {
        let name = name.into();
        match self.get_mut(&name) {
            Some(existing) => Some(std::mem::replace(existing, section)),
            None => {
                self.sections.push((name, section));
                None
            }
        }
    }

    /// Remove a section, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Section> {
        let index = self.sections.iter().position(|(n, _)| n == name)?;
        Some(self.sections.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Shallow merge: every section of `other` replaces the same-named one.
    pub fn merge(&mut self, other: StackDocument) {
        for (name, section) in other.sections {
            self.insert(name, section);
        }
    }

    /// `base` with this document's sections laid over it.
    pub fn merged_over(&self, base: &StackDocument) -> StackDocument {
        let mut merged = base.clone();
        merged.merge(self.clone());
        merged
    }

    /// String value of `section.key`, if it is a string.
    pub fn get_str(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section)?.get(key)?.as_str()
    }
}

impl FromIterator<(String, Section)> for StackDocument {
    fn from_iter<I: IntoIterator<Item = (String, Section)>>(iter: I) -> Self {
        let mut doc = StackDocument::new();
        for (name, section) in iter {
            doc.insert(name, section);
        }
        doc
    }
}

impl IntoIterator for StackDocument {
    type Item = (String, Section);
    type IntoIter = std::vec::IntoIter<(String, Section)>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_iter()
    }
}

impl TryFrom<Value> for StackDocument {
    type Error = Value;

    /// Build from a JSON object of objects; returns the input on shape mismatch.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(map) = value else {
            return Err(value);
        };
        if !map.values().all(Value::is_object) {
            return Err(Value::Object(map));
        }
        Ok(map
            .into_iter()
            .filter_map(|(name, section)| match section {
                Value::Object(section) => Some((name, section)),
                _ => None,
            })
            .collect())
    }
}

/// Trailing comments keyed by section, then property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentMap {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl CommentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key).map(String::as_str)
    }

    pub fn section(&self, section: &str) -> Option<&BTreeMap<String, String>> {
        self.sections.get(section)
    }

    /// Make sure `section` has an entry, even if it carries no comments.
    pub fn ensure_section(&mut self, section: &str) {
        self.sections.entry(section.to_string()).or_default();
    }

    pub fn insert(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        comment: impl Into<String>,
    ) {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(key.into(), comment.into());
    }

    /// Replace all comments of a section.
    pub fn set_section(&mut self, section: impl Into<String>, comments: BTreeMap<String, String>) {
        self.sections.insert(section.into(), comments);
    }

    pub fn remove_section(&mut self, section: &str) -> Option<BTreeMap<String, String>> {
        self.sections.remove(section)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
