//! Label tables: integer keys mapped to names and colors.

use crate::error::{CiftiError, CiftiResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

/// Key conventionally used for "no label".
pub const UNASSIGNED_LABEL_KEY: i32 = 0;

/// Name conventionally used for "no label".
pub const UNASSIGNED_LABEL_NAME: &str = "???";

/// A single label: key, name and RGBA color with components in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub key: i32,
    pub name: String,
    pub rgba: [f32; 4],
}

impl Label {
    pub fn new(key: i32, name: impl Into<String>, rgba: [f32; 4]) -> Self {
        Self {
            key,
            name: name.into(),
            rgba,
        }
    }
}

/// Association of integer keys with labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelTable {
    labels: BTreeMap<i32, Label>,

    #[serde(skip)]
    modified: bool,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table containing only the transparent unassigned label.
    pub fn with_unassigned() -> Self {
        let mut table = Self::new();
        table.labels.insert(
            UNASSIGNED_LABEL_KEY,
            Label::new(UNASSIGNED_LABEL_KEY, UNASSIGNED_LABEL_NAME, [0.0, 0.0, 0.0, 0.0]),
        );
        table
    }

    /// Parse a label table from JSON.
    pub fn from_json(json: &str) -> CiftiResult<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a label table from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> CiftiResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check that every entry is stored under its own key.
    pub fn validate(&self) -> CiftiResult<()> {
        for (key, label) in &self.labels {
            if *key != label.key {
                return Err(CiftiError::ValidationError(format!(
                    "label '{}' stored under key {} but has key {}",
                    label.name, key, label.key
                )));
            }
        }
        Ok(())
    }

    /// Insert or replace a label.
    pub fn set_label(&mut self, label: Label) {
        if self.labels.get(&label.key) != Some(&label) {
            self.labels.insert(label.key, label);
            self.modified = true;
        }
    }

    pub fn remove_label(&mut self, key: i32) -> Option<Label> {
        let removed = self.labels.remove(&key);
        if removed.is_some() {
            self.modified = true;
        }
        removed
    }

    pub fn label(&self, key: i32) -> Option<&Label> {
        self.labels.get(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = i32> + '_ {
        self.labels.keys().copied()
    }

    pub fn keys_and_names(&self) -> BTreeMap<i32, &str> {
        self.labels
            .iter()
            .map(|(k, l)| (*k, l.name.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn clear_modified(&mut self) {
        self.modified = false;
    }

    /// Human readable listing, one label per line with the given indentation.
    pub fn to_formatted_string(&self, indent: &str) -> String {
        let mut out = String::new();
        for label in self.labels.values() {
            let _ = writeln!(
                out,
                "{}{:>6} {} ({:.3}, {:.3}, {:.3}, {:.3})",
                indent,
                label.key,
                label.name,
                label.rgba[0],
                label.rgba[1],
                label.rgba[2],
                label.rgba[3]
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_lookup() {
        let mut table = LabelTable::with_unassigned();
        table.set_label(Label::new(7, "V1", [1.0, 0.0, 0.0, 1.0]));

        assert!(table.is_modified());
        assert_eq!(table.label(7).unwrap().name, "V1");
        assert!(table.label(8).is_none());
        assert_eq!(table.keys().collect::<Vec<_>>(), vec![0, 7]);
    }

    #[test]
    fn test_from_json_string_keys() {
        let json = r#"{"labels":{"3":{"key":3,"name":"MT","rgba":[0.0,1.0,0.0,1.0]}}}"#;
        let table = LabelTable::from_json(json).unwrap();
        assert_eq!(table.label(3).unwrap().name, "MT");
        assert!(!table.is_modified());
    }

    #[test]
    fn test_validate_rejects_mismatched_key() {
        let json = r#"{"labels":{"3":{"key":4,"name":"MT","rgba":[0.0,1.0,0.0,1.0]}}}"#;
        assert!(LabelTable::from_json(json).is_err());
    }

    #[test]
    fn test_formatted_string_lists_labels() {
        let mut table = LabelTable::new();
        table.set_label(Label::new(1, "A", [1.0, 1.0, 1.0, 1.0]));
        let text = table.to_formatted_string("  ");
        assert!(text.starts_with("  "));
        assert!(text.contains(" A "));
    }
}
