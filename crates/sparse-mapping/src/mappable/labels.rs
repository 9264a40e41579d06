//! Label keys used by label maps and their consistency with the label tables.

use super::MappableDataFile;
use crate::error::Result;
use std::collections::BTreeSet;
use tracing::debug;

/// Mismatch between the keys in a label map and its label table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLabelReport {
    pub map_index: usize,
    pub map_name: String,
    /// Keys in the data with no label
    pub missing_label_keys: Vec<i32>,
    /// Labels whose key never appears in the data
    pub unused_labels: Vec<(i32, String)>,
}

impl KeyLabelReport {
    pub fn is_empty(&self) -> bool {
        self.missing_label_keys.is_empty() && self.unused_labels.is_empty()
    }
}

fn keys_in(data: &[f32]) -> BTreeSet<i32> {
    data.iter().map(|value| *value as i32).collect()
}

impl MappableDataFile {
    /// Distinct label keys in a map, ascending.
    pub fn unique_label_keys_used_in_map(&self, map_index: usize) -> Result<Vec<i32>> {
        let data = self.map_data(map_index)?;
        Ok(keys_in(&data).into_iter().collect())
    }

    /// Compare each label map's keys with its label table.
    ///
    /// Returns one report per map with missing or unused labels, and logs
    /// them at debug level. Palette files have nothing to report.
    pub fn validate_keys_and_labels(&self) -> Result<Vec<KeyLabelReport>> {
        if !self.is_mapped_with_label_table() {
            return Ok(Vec::new());
        }

        let mut reports = Vec::new();
        for map_index in 0..self.number_of_maps() {
            let data_keys = keys_in(&self.map_data(map_index)?);
            let table = self.map_label_table(map_index)?;

            let missing_label_keys = data_keys
                .iter()
                .copied()
                .filter(|key| table.and_then(|t| t.label(*key)).is_none())
                .collect();
            let unused_labels = table
                .map(|t| {
                    t.keys_and_names()
                        .into_iter()
                        .filter(|(key, _)| !data_keys.contains(key))
                        .map(|(key, name)| (key, name.to_string()))
                        .collect()
                })
                .unwrap_or_default();

            let report = KeyLabelReport {
                map_index,
                map_name: self.map_name(map_index)?.to_string(),
                missing_label_keys,
                unused_labels,
            };
            if report.is_empty() {
                continue;
            }

            debug!(
                file = %self.file_name,
                map = %report.map_name,
                missing = ?report.missing_label_keys,
                unused = ?report.unused_labels,
                "Label table does not match map keys\n{}",
                table.map(|t| t.to_formatted_string("    ")).unwrap_or_default()
            );
            reports.push(report);
        }

        Ok(reports)
    }
}
