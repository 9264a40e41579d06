//! In-memory matrix container.

use crate::error::SourceError;
use crate::indexer::VoxelMapping;
use crate::source::{ContainerSource, SurfaceMapping};
use cifti_common::{
    DataAccess, IndexType, LabelTable, MatrixAxis, MetaData, PaletteColorMapping, Structure,
    VolumeSpace,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Description of one named entry (a map) along an axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapDescription {
    pub name: String,
    #[serde(default)]
    pub metadata: MetaData,
    #[serde(default)]
    pub label_table: Option<LabelTable>,
    #[serde(default)]
    pub palette_color_mapping: Option<PaletteColorMapping>,
}

impl MapDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_label_table(mut self, table: LabelTable) -> Self {
        self.label_table = Some(table);
        self
    }

    pub fn with_palette_color_mapping(mut self, mapping: PaletteColorMapping) -> Self {
        self.palette_color_mapping = Some(mapping);
        self
    }

    pub fn with_metadata(mut self, metadata: MetaData) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Surface nodes of one structure with data along an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceModel {
    pub structure: Structure,
    /// Number of nodes in the surface the data was mapped to
    pub node_count: usize,
    pub nodes: Vec<SurfaceMapping>,
}

/// Everything known about one axis of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisContent {
    pub index_type: IndexType,
    #[serde(default)]
    pub maps: Vec<MapDescription>,
    #[serde(default)]
    pub volume: Vec<VoxelMapping>,
    #[serde(default)]
    pub surfaces: Vec<SurfaceModel>,
}

impl Default for AxisContent {
    fn default() -> Self {
        Self {
            index_type: IndexType::Invalid,
            maps: Vec::new(),
            volume: Vec::new(),
            surfaces: Vec::new(),
        }
    }
}

/// A connectivity matrix held entirely in memory, row-major.
///
/// # Example
///
/// ```
/// use cifti_common::{IndexType, MatrixAxis};
/// use sparse_mapping::{InMemorySource, MapDescription};
///
/// let source = InMemorySource::new(3, 1)
///     .with_mapping_types(IndexType::Scalars, IndexType::BrainModels)
///     .with_map(MatrixAxis::AlongRow, MapDescription::new("thickness"))
///     .with_data(vec![1.0, 2.0, 3.0])
///     .unwrap();
/// assert_eq!(source.value(2, 0), Some(3.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemorySource {
    rows: usize,
    columns: usize,
    #[serde(default)]
    along_row: AxisContent,
    #[serde(default)]
    along_column: AxisContent,
    #[serde(default)]
    file_metadata: MetaData,
    #[serde(default)]
    volume_space: Option<VolumeSpace>,
    #[serde(default)]
    data: Vec<f32>,
}

impl InMemorySource {
    /// Create a zero-filled matrix with invalid index types on both axes.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            data: vec![0.0; rows * columns],
            ..Default::default()
        }
    }

    /// Parse a container description from JSON.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let source: Self = serde_json::from_str(json)
            .map_err(|e| SourceError::read_failed(format!("invalid container JSON: {}", e)))?;
        source.validate()?;
        Ok(source)
    }

    /// Load a container description from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check that the data matrix matches the declared size.
    pub fn validate(&self) -> Result<(), SourceError> {
        let expected = self.rows * self.columns;
        if self.data.len() != expected {
            return Err(SourceError::read_failed(format!(
                "matrix is {}x{} but has {} values",
                self.rows,
                self.columns,
                self.data.len()
            )));
        }
        Ok(())
    }

    /// Set the index type along the row and along the column.
    pub fn with_mapping_types(mut self, along_row: IndexType, along_column: IndexType) -> Self {
        self.along_row.index_type = along_row;
        self.along_column.index_type = along_column;
        self
    }

    pub fn with_map(mut self, axis: MatrixAxis, map: MapDescription) -> Self {
        self.axis_mut(axis).maps.push(map);
        self
    }

    pub fn with_volume(
        mut self,
        axis: MatrixAxis,
        space: VolumeSpace,
        voxels: Vec<VoxelMapping>,
    ) -> Self {
        self.volume_space = Some(space);
        self.axis_mut(axis).volume = voxels;
        self
    }

    pub fn with_surface(mut self, axis: MatrixAxis, surface: SurfaceModel) -> Self {
        self.axis_mut(axis).surfaces.push(surface);
        self
    }

    pub fn with_file_metadata(mut self, metadata: MetaData) -> Self {
        self.file_metadata = metadata;
        self
    }

    /// Replace the matrix values (row-major).
    pub fn with_data(mut self, data: Vec<f32>) -> Result<Self, SourceError> {
        self.data = data;
        self.validate()?;
        Ok(self)
    }

    /// Value at (row, column).
    pub fn value(&self, row: usize, column: usize) -> Option<f32> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.data.get(row * self.columns + column).copied()
    }

    pub fn set_value(&mut self, row: usize, column: usize, value: f32) -> Result<(), SourceError> {
        if row >= self.rows {
            return Err(SourceError::IndexOutOfRange {
                axis: "row",
                index: row,
                count: self.rows,
            });
        }
        if column >= self.columns {
            return Err(SourceError::IndexOutOfRange {
                axis: "column",
                index: column,
                count: self.columns,
            });
        }
        self.data[row * self.columns + column] = value;
        Ok(())
    }

    fn axis(&self, axis: MatrixAxis) -> &AxisContent {
        match axis {
            MatrixAxis::AlongRow => &self.along_row,
            MatrixAxis::AlongColumn => &self.along_column,
        }
    }

    fn axis_mut(&mut self, axis: MatrixAxis) -> &mut AxisContent {
        match axis {
            MatrixAxis::AlongRow => &mut self.along_row,
            MatrixAxis::AlongColumn => &mut self.along_column,
        }
    }

    fn map(&self, axis: MatrixAxis, index: usize) -> Option<&MapDescription> {
        self.axis(axis).maps.get(index)
    }

    fn surface(&self, access: DataAccess, structure: Structure) -> Option<&SurfaceModel> {
        self.axis(access.brainordinate_axis())
            .surfaces
            .iter()
            .find(|s| s.structure == structure)
    }
}

impl ContainerSource for InMemorySource {
    fn number_of_rows(&self) -> usize {
        self.rows
    }

    fn number_of_columns(&self) -> usize {
        self.columns
    }

    fn mapping_type(&self, axis: MatrixAxis) -> IndexType {
        self.axis(axis).index_type
    }

    fn file_metadata(&self) -> MetaData {
        self.file_metadata.clone()
    }

    fn map_name(&self, axis: MatrixAxis, index: usize) -> Option<String> {
        self.map(axis, index).map(|m| m.name.clone())
    }

    fn map_metadata(&self, axis: MatrixAxis, index: usize) -> Option<MetaData> {
        self.map(axis, index).map(|m| m.metadata.clone())
    }

    fn map_label_table(&self, axis: MatrixAxis, index: usize) -> Option<LabelTable> {
        self.map(axis, index).and_then(|m| m.label_table.clone())
    }

    fn map_palette_color_mapping(
        &self,
        axis: MatrixAxis,
        index: usize,
    ) -> Option<PaletteColorMapping> {
        self.map(axis, index)
            .and_then(|m| m.palette_color_mapping.clone())
    }

    fn volume_space(&self) -> Option<VolumeSpace> {
        self.volume_space.clone()
    }

    fn volume_mappings(&self, access: DataAccess) -> Result<Vec<VoxelMapping>, SourceError> {
        Ok(self.axis(access.brainordinate_axis()).volume.clone())
    }

    fn surface_mappings(
        &self,
        access: DataAccess,
        structure: Structure,
    ) -> Result<Vec<SurfaceMapping>, SourceError> {
        Ok(self
            .surface(access, structure)
            .map(|s| s.nodes.clone())
            .unwrap_or_default())
    }

    fn surface_node_count(&self, access: DataAccess, structure: Structure) -> Option<usize> {
        self.surface(access, structure).map(|s| s.node_count)
    }

    fn has_surface_data(&self, access: DataAccess, structure: Structure) -> bool {
        self.surface(access, structure)
            .map(|s| !s.nodes.is_empty())
            .unwrap_or(false)
    }

    fn read_row(&self, index: usize, out: &mut [f32]) -> Result<(), SourceError> {
        if index >= self.rows {
            return Err(SourceError::IndexOutOfRange {
                axis: "row",
                index,
                count: self.rows,
            });
        }
        if out.len() != self.columns {
            return Err(SourceError::read_failed(format!(
                "row buffer holds {} values, expected {}",
                out.len(),
                self.columns
            )));
        }
        let start = index * self.columns;
        out.copy_from_slice(&self.data[start..start + self.columns]);
        Ok(())
    }

    fn read_column(&self, index: usize, out: &mut [f32]) -> Result<(), SourceError> {
        if index >= self.columns {
            return Err(SourceError::IndexOutOfRange {
                axis: "column",
                index,
                count: self.columns,
            });
        }
        if out.len() != self.rows {
            return Err(SourceError::read_failed(format!(
                "column buffer holds {} values, expected {}",
                out.len(),
                self.rows
            )));
        }
        for (row, value) in out.iter_mut().enumerate() {
            *value = self.data[row * self.columns + index];
        }
        Ok(())
    }
}
