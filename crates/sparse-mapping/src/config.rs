//! Configuration for loading and coloring mappable data files.

use serde::{Deserialize, Serialize};

/// Configuration for mappable data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// What to do when the sparse volume indexer fails its self-check.
    pub indexer_validation: IndexerValidation,

    /// Report label keys without data and data without labels after loading
    /// a label file (only when debug logging is enabled).
    pub validate_labels_on_load: bool,

    /// Number of buckets in per-map histograms.
    pub histogram_buckets: usize,

    /// Number of buckets used by the approximate statistics for coloring.
    pub fast_statistics_buckets: usize,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            indexer_validation: IndexerValidation::Log,
            validate_labels_on_load: true,
            histogram_buckets: 100,
            fast_statistics_buckets: 1000,
        }
    }
}

impl MappingConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("INDEXER_VALIDATION") {
            config.indexer_validation = IndexerValidation::from_str(&val);
        }

        if let Ok(val) = std::env::var("VALIDATE_LABELS_ON_LOAD") {
            config.validate_labels_on_load = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("HISTOGRAM_BUCKETS") {
            if let Ok(buckets) = val.parse() {
                config.histogram_buckets = buckets;
            }
        }

        if let Ok(val) = std::env::var("FAST_STATISTICS_BUCKETS") {
            if let Ok(buckets) = val.parse() {
                config.fast_statistics_buckets = buckets;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.histogram_buckets == 0 {
            return Err("histogram_buckets must be > 0".to_string());
        }

        if self.fast_statistics_buckets == 0 {
            return Err("fast_statistics_buckets must be > 0".to_string());
        }

        Ok(())
    }
}

/// Handling of an indexer whose entries cannot all be read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexerValidation {
    /// Skip the self-check.
    Off,
    /// Log mismatches and keep the indexer.
    #[default]
    Log,
    /// Log mismatches and mark the indexer invalid.
    Strict,
}

impl IndexerValidation {
    /// Parse from string (case-insensitive). Unknown values fall back to `Log`.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "off" | "none" => Self::Off,
            "strict" => Self::Strict,
            _ => Self::Log,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Log => "log",
            Self::Strict => "strict",
        }
    }
}

impl std::fmt::Display for IndexerValidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MappingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.indexer_validation, IndexerValidation::Log);
        assert!(config.validate_labels_on_load);
    }

    #[test]
    fn test_zero_buckets_rejected() {
        let config = MappingConfig {
            histogram_buckets: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MappingConfig {
            fast_statistics_buckets: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_mode_parsing() {
        assert_eq!(IndexerValidation::from_str("STRICT"), IndexerValidation::Strict);
        assert_eq!(IndexerValidation::from_str("off"), IndexerValidation::Off);
        assert_eq!(IndexerValidation::from_str("bogus"), IndexerValidation::Log);
    }

    #[test]
    fn test_config_from_json() {
        let config: MappingConfig = serde_json::from_str(
            r#"{"indexer_validation":"strict","validate_labels_on_load":false,
                "histogram_buckets":20,"fast_statistics_buckets":50}"#,
        )
        .unwrap();
        assert_eq!(config.indexer_validation, IndexerValidation::Strict);
        assert_eq!(config.histogram_buckets, 20);
    }
}
