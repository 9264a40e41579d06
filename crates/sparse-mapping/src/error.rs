//! Error types for loading and querying mappable data files.

use cifti_common::{IndexType, MatrixAxis};
use thiserror::Error;

/// Result type alias using DataFileError.
pub type Result<T> = std::result::Result<T, DataFileError>;

/// Errors raised by a container data source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to read data from the container.
    #[error("failed to read data: {0}")]
    ReadFailed(String),

    /// A row, column or brainordinate index beyond the matrix.
    #[error("{axis} index {index} out of range (count {count})")]
    IndexOutOfRange {
        axis: &'static str,
        index: usize,
        count: usize,
    },

    /// Underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// Create a ReadFailed error.
    pub fn read_failed(msg: impl Into<String>) -> Self {
        Self::ReadFailed(msg.into())
    }
}

/// Errors that can occur while loading or querying a mappable data file.
#[derive(Error, Debug)]
pub enum DataFileError {
    /// The container's index types do not match the file kind.
    #[error("{file}: {}", format_mismatches(.mismatches))]
    MappingTypeMismatch {
        file: String,
        mismatches: Vec<MappingMismatch>,
    },

    /// The file kind has no connectivity matrix policy.
    #[error("{file}: invalid data file type: {kind}")]
    UnsupportedFileKind { file: String, kind: String },

    /// The policy produced no usable map data type.
    #[error("{file}: invalid data type: {data_type}")]
    InvalidMapDataType { file: String, data_type: IndexType },

    /// A read from the container failed.
    #[error("{file}: {source}")]
    Source {
        file: String,
        #[source]
        source: SourceError,
    },

    /// A map index beyond the number of maps.
    #[error("map index {index} out of range (number of maps {count})")]
    MapIndexOutOfRange { index: usize, count: usize },

    /// A query that needs loaded data was made on an empty file.
    #[error("{0}: no data is loaded")]
    NotLoaded(String),
}

/// One axis whose index type differs from what the file kind expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingMismatch {
    pub axis: MatrixAxis,
    pub expected: IndexType,
    pub actual: IndexType,
}

impl std::fmt::Display for MappingMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.axis {
            MatrixAxis::AlongRow => "Row",
            MatrixAxis::AlongColumn => "Column",
        };
        write!(
            f,
            "{} Index Type should be {} but is {}",
            label, self.expected, self.actual
        )
    }
}

fn format_mismatches(mismatches: &[MappingMismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DataFileError {
    /// Wrap a container error with the file name.
    pub fn source(file: impl Into<String>, source: SourceError) -> Self {
        Self::Source {
            file: file.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_message_names_both_axes() {
        let err = DataFileError::MappingTypeMismatch {
            file: "rest.dtseries.nii".to_string(),
            mismatches: vec![
                MappingMismatch {
                    axis: MatrixAxis::AlongRow,
                    expected: IndexType::TimePoints,
                    actual: IndexType::Scalars,
                },
                MappingMismatch {
                    axis: MatrixAxis::AlongColumn,
                    expected: IndexType::BrainModels,
                    actual: IndexType::Parcels,
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("rest.dtseries.nii: "));
        assert!(msg.contains("Row Index Type should be CIFTI_INDEX_TYPE_TIME_POINTS"));
        assert!(msg.contains("but is CIFTI_INDEX_TYPE_PARCELS"));
    }

    #[test]
    fn test_source_error_is_chained() {
        use std::error::Error as _;
        let err = DataFileError::source("a.dscalar.nii", SourceError::read_failed("truncated"));
        assert_eq!(err.to_string(), "a.dscalar.nii: failed to read data: truncated");
        assert!(err.source().is_some());
    }
}
