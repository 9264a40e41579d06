//! Data file kinds and the matrix layout each connectivity kind expects.

use cifti_common::{DataAccess, IndexType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Border,
    ConnectivityDense,
    ConnectivityDenseLabel,
    ConnectivityDenseParcel,
    ConnectivityDenseScalar,
    ConnectivityDenseTimeSeries,
    ConnectivityParcel,
    ConnectivityParcelDense,
    Label,
    Metric,
    Surface,
    Volume,
    Unknown,
}

impl FileKind {
    /// Every connectivity kind that can be loaded from a matrix container.
    pub const CONNECTIVITY: [FileKind; 7] = [
        FileKind::ConnectivityDense,
        FileKind::ConnectivityDenseLabel,
        FileKind::ConnectivityDenseParcel,
        FileKind::ConnectivityDenseScalar,
        FileKind::ConnectivityDenseTimeSeries,
        FileKind::ConnectivityParcel,
        FileKind::ConnectivityParcelDense,
    ];

    /// Layout and coloring rules for this kind, or `None` if it is not a
    /// connectivity matrix kind.
    pub fn policy(&self) -> Option<FileKindPolicy> {
        use ColoringMode::{LabelTable, Palette};
        use DataAccess::{ColumnMethods, RowMethods};
        use IndexType::{BrainModels, Labels, Parcels, Scalars, TimePoints};

        let (row_type, column_type, access, coloring, one_map_per_file) = match self {
            FileKind::ConnectivityDense => (BrainModels, BrainModels, RowMethods, Palette, true),
            FileKind::ConnectivityDenseLabel => (Labels, BrainModels, ColumnMethods, LabelTable, false),
            FileKind::ConnectivityDenseParcel => (Parcels, BrainModels, RowMethods, Palette, true),
            FileKind::ConnectivityDenseScalar => (Scalars, BrainModels, ColumnMethods, Palette, false),
            FileKind::ConnectivityDenseTimeSeries => {
                (TimePoints, BrainModels, ColumnMethods, Palette, false)
            }
            FileKind::ConnectivityParcel => (Parcels, Parcels, RowMethods, Palette, true),
            FileKind::ConnectivityParcelDense => (BrainModels, Parcels, RowMethods, Palette, true),
            FileKind::Border
            | FileKind::Label
            | FileKind::Metric
            | FileKind::Surface
            | FileKind::Volume
            | FileKind::Unknown => return None,
        };

        Some(FileKindPolicy {
            row_type,
            column_type,
            access,
            coloring,
            one_map_per_file,
        })
    }

    /// Parse from a name or file-name extension (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().trim_start_matches('.') {
            "connectivity_dense" | "dconn" | "dconn.nii" => Self::ConnectivityDense,
            "connectivity_dense_label" | "dlabel" | "dlabel.nii" => Self::ConnectivityDenseLabel,
            "connectivity_dense_parcel" | "dpconn" | "dpconn.nii" => Self::ConnectivityDenseParcel,
            "connectivity_dense_scalar" | "dscalar" | "dscalar.nii" => Self::ConnectivityDenseScalar,
            "connectivity_dense_time_series" | "dtseries" | "dtseries.nii" => {
                Self::ConnectivityDenseTimeSeries
            }
            "connectivity_parcel" | "pconn" | "pconn.nii" => Self::ConnectivityParcel,
            "connectivity_parcel_dense" | "pdconn" | "pdconn.nii" => Self::ConnectivityParcelDense,
            "border" => Self::Border,
            "label" => Self::Label,
            "metric" => Self::Metric,
            "surface" => Self::Surface,
            "volume" => Self::Volume,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Border => "border",
            Self::ConnectivityDense => "connectivity_dense",
            Self::ConnectivityDenseLabel => "connectivity_dense_label",
            Self::ConnectivityDenseParcel => "connectivity_dense_parcel",
            Self::ConnectivityDenseScalar => "connectivity_dense_scalar",
            Self::ConnectivityDenseTimeSeries => "connectivity_dense_time_series",
            Self::ConnectivityParcel => "connectivity_parcel",
            Self::ConnectivityParcelDense => "connectivity_parcel_dense",
            Self::Label => "label",
            Self::Metric => "metric",
            Self::Surface => "surface",
            Self::Volume => "volume",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a file's maps are turned into colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColoringMode {
    Palette,
    LabelTable,
}

/// Expected matrix layout of a connectivity file kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileKindPolicy {
    /// Index type expected along the row (describing the columns)
    pub row_type: IndexType,
    /// Index type expected along the column (describing the rows)
    pub column_type: IndexType,
    pub access: DataAccess,
    pub coloring: ColoringMode,
    /// The whole file is a single map regardless of matrix size.
    pub one_map_per_file: bool,
}

impl FileKindPolicy {
    /// Number of maps for a matrix with `columns` columns.
    pub fn number_of_maps(&self, columns: usize) -> usize {
        if self.one_map_per_file {
            1
        } else {
            columns
        }
    }

    /// Number of values in each map.
    pub fn data_count(&self, rows: usize, columns: usize) -> usize {
        match self.access {
            DataAccess::RowMethods => columns,
            DataAccess::ColumnMethods => rows,
        }
    }

    /// Index type of the values in each map.
    pub fn map_data_type(&self) -> IndexType {
        match self.coloring {
            ColoringMode::Palette => IndexType::Scalars,
            ColoringMode::LabelTable => IndexType::Labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_connectivity_kind_has_policy() {
        for kind in FileKind::CONNECTIVITY {
            let policy = kind.policy().unwrap();
            assert_eq!(policy.one_map_per_file, policy.access == DataAccess::RowMethods);
        }
        for kind in [FileKind::Border, FileKind::Metric, FileKind::Volume, FileKind::Unknown] {
            assert!(kind.policy().is_none());
        }
    }

    #[test]
    fn test_dense_label_policy() {
        let policy = FileKind::ConnectivityDenseLabel.policy().unwrap();
        assert_eq!(policy.row_type, IndexType::Labels);
        assert_eq!(policy.column_type, IndexType::BrainModels);
        assert_eq!(policy.coloring, ColoringMode::LabelTable);
        assert_eq!(policy.map_data_type(), IndexType::Labels);
        assert_eq!(policy.number_of_maps(3), 3);
        assert_eq!(policy.data_count(100, 3), 100);
    }

    #[test]
    fn test_dense_connectivity_policy() {
        let policy = FileKind::ConnectivityDense.policy().unwrap();
        assert_eq!(policy.access, DataAccess::RowMethods);
        assert_eq!(policy.number_of_maps(100), 1);
        assert_eq!(policy.data_count(100, 80), 80);
        assert_eq!(policy.map_data_type(), IndexType::Scalars);
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(FileKind::from_str("dtseries.nii"), FileKind::ConnectivityDenseTimeSeries);
        assert_eq!(FileKind::from_str(".DSCALAR"), FileKind::ConnectivityDenseScalar);
        assert_eq!(FileKind::from_str("pconn"), FileKind::ConnectivityParcel);
        assert_eq!(FileKind::from_str("xyz"), FileKind::Unknown);
    }
}
