//! Matrix axis and index-type tags for connectivity matrix containers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the indices along one matrix dimension refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexType {
    BrainModels,
    Fibers,
    Invalid,
    Labels,
    Parcels,
    Scalars,
    TimePoints,
}

impl IndexType {
    /// Get the canonical tag name.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexType::BrainModels => "CIFTI_INDEX_TYPE_BRAIN_MODELS",
            IndexType::Fibers => "CIFTI_INDEX_TYPE_FIBERS",
            IndexType::Invalid => "CIFTI_INDEX_TYPE_INVALID",
            IndexType::Labels => "CIFTI_INDEX_TYPE_LABELS",
            IndexType::Parcels => "CIFTI_INDEX_TYPE_PARCELS",
            IndexType::Scalars => "CIFTI_INDEX_TYPE_SCALARS",
            IndexType::TimePoints => "CIFTI_INDEX_TYPE_TIME_POINTS",
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dimension of the underlying data matrix.
///
/// `AlongRow` describes the indices that vary while walking along a row
/// (i.e. the columns); `AlongColumn` describes the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixAxis {
    AlongRow,
    AlongColumn,
}

/// How brainordinate data is read from the matrix for one file instance.
///
/// With `ColumnMethods` each map is one column (maps are indexed along the
/// row); with `RowMethods` each map is one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataAccess {
    ColumnMethods,
    RowMethods,
}

impl DataAccess {
    /// The matrix axis along which maps (and their metadata) are indexed.
    pub fn map_axis(&self) -> MatrixAxis {
        match self {
            DataAccess::ColumnMethods => MatrixAxis::AlongRow,
            DataAccess::RowMethods => MatrixAxis::AlongColumn,
        }
    }

    /// The matrix axis along which brainordinates (surface nodes and voxels)
    /// are indexed, i.e. the positions within one map.
    pub fn brainordinate_axis(&self) -> MatrixAxis {
        match self {
            DataAccess::ColumnMethods => MatrixAxis::AlongColumn,
            DataAccess::RowMethods => MatrixAxis::AlongRow,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataAccess::ColumnMethods => "column",
            DataAccess::RowMethods => "row",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_axis_follows_access() {
        assert_eq!(DataAccess::ColumnMethods.map_axis(), MatrixAxis::AlongRow);
        assert_eq!(DataAccess::RowMethods.map_axis(), MatrixAxis::AlongColumn);
        assert_eq!(DataAccess::ColumnMethods.brainordinate_axis(), MatrixAxis::AlongColumn);
        assert_eq!(DataAccess::RowMethods.brainordinate_axis(), MatrixAxis::AlongRow);
    }

    #[test]
    fn test_index_type_names() {
        assert_eq!(IndexType::Scalars.to_string(), "CIFTI_INDEX_TYPE_SCALARS");
        assert_eq!(IndexType::Invalid.as_str(), "CIFTI_INDEX_TYPE_INVALID");
    }
}
