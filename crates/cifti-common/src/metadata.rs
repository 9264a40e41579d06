//! Name/value metadata attached to files and maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata key holding a map's unique identifier.
pub const UNIQUE_ID_KEY: &str = "UniqueID";

/// Ordered name/value metadata with modification tracking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaData {
    entries: BTreeMap<String, String>,

    #[serde(skip)]
    modified: bool,
}

impl MetaData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create metadata from existing name/value pairs (not marked modified).
    pub fn from_map(entries: BTreeMap<String, String>) -> Self {
        Self {
            entries,
            modified: false,
        }
    }

    /// Replace all entries.
    pub fn replace_with_map(&mut self, entries: BTreeMap<String, String>) {
        if self.entries != entries {
            self.entries = entries;
            self.modified = true;
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Set a value. Marks modified only when the value actually changes.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if self.entries.get(&name) != Some(&value) {
            self.entries.insert(name, value);
            self.modified = true;
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let removed = self.entries.remove(name);
        if removed.is_some() {
            self.modified = true;
        }
        removed
    }

    /// Remove all entries and reset the modified flag.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.modified = false;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn unique_id(&self) -> Option<&str> {
        self.get(UNIQUE_ID_KEY)
    }

    /// Assign a random unique identifier if none is present.
    ///
    /// Does not mark the metadata modified; the identifier is generated state,
    /// not a user edit.
    pub fn ensure_unique_id(&mut self) -> &str {
        self.entries
            .entry(UNIQUE_ID_KEY.to_string())
            .or_insert_with(|| uuid::Uuid::new_v4().to_string())
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self) {
        self.modified = true;
    }

    pub fn clear_modified(&mut self) {
        self.modified = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_marks_modified_only_on_change() {
        let mut md = MetaData::new();
        md.set("Description", "resting state");
        assert!(md.is_modified());

        md.clear_modified();
        md.set("Description", "resting state");
        assert!(!md.is_modified());
    }

    #[test]
    fn test_unique_id_is_stable() {
        let mut md = MetaData::new();
        let first = md.ensure_unique_id().to_string();
        let second = md.ensure_unique_id().to_string();
        assert_eq!(first, second);
        assert!(!md.is_modified());
        assert_eq!(md.unique_id(), Some(first.as_str()));
    }

    #[test]
    fn test_json_is_plain_object() {
        let md: MetaData = serde_json::from_str(r#"{"Name":"rest"}"#).unwrap();
        assert_eq!(md.get("Name"), Some("rest"));
        assert!(!md.is_modified());
    }
}
