//! Data files whose maps are rows or columns of a connectivity matrix.
//!
//! A [`MappableDataFile`] is created empty for one [`FileKind`] and filled by
//! [`MappableDataFile::load`]. Loading checks that the container's axes match
//! what the kind expects, builds one [`MapContent`] per map and a
//! [`SparseVolumeIndexer`] for the voxels. Map values are never cached; each
//! query reads the needed row or column from the container.

mod labels;
mod surface;
mod volume;

pub use labels::KeyLabelReport;
pub use surface::{IdentifiedValue, VoxelIdentification};
pub use volume::VolumeSliceViewPlane;

use crate::config::MappingConfig;
use crate::error::{DataFileError, MappingMismatch, Result};
use crate::indexer::SparseVolumeIndexer;
use crate::map_content::MapContent;
use crate::policy::{ColoringMode, FileKind, FileKindPolicy};
use crate::source::ContainerSource;
use cifti_common::{
    DataAccess, IndexType, LabelTable, MatrixAxis, MetaData, PaletteColorMapping, PaletteSource,
    Structure,
};
use statistics::{DescriptiveStatistics, FastStatistics, Histogram, RangeFilter};
use tracing::{info, warn, Level};

/// Everything that exists only while a container is loaded.
struct LoadedContent {
    source: Box<dyn ContainerSource>,
    policy: FileKindPolicy,
    indexer: SparseVolumeIndexer,
    maps: Vec<MapContent>,
    rows: usize,
    columns: usize,
    /// I, J, K, time, components
    dimensions: [i64; 5],
    contains_surface_data: bool,
    contains_volume_data: bool,
}

/// A connectivity data file whose maps can be drawn on surfaces and volumes.
pub struct MappableDataFile {
    kind: FileKind,
    config: MappingConfig,
    file_name: String,
    file_metadata: MetaData,
    modified: bool,
    content: Option<LoadedContent>,
}

impl MappableDataFile {
    /// Create an empty file of the given kind with default configuration.
    pub fn new(kind: FileKind) -> Self {
        Self::with_config(kind, MappingConfig::default())
    }

    pub fn with_config(kind: FileKind, config: MappingConfig) -> Self {
        Self {
            kind,
            config,
            file_name: String::new(),
            file_metadata: MetaData::new(),
            modified: false,
            content: None,
        }
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// How maps are read from the matrix, if the kind is a connectivity kind.
    pub fn access(&self) -> Option<DataAccess> {
        self.kind.policy().map(|p| p.access)
    }

    /// Name used in logs and error messages.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn set_file_name(&mut self, name: impl Into<String>) {
        self.file_name = name.into();
    }

    /// Load the file from a container.
    ///
    /// On failure the file is left empty, as if [`clear`](Self::clear) had
    /// been called.
    pub fn load(&mut self, source: Box<dyn ContainerSource>) -> Result<()> {
        self.clear();

        let (content, file_metadata) = match self.build_content(source) {
            Ok(built) => built,
            Err(e) => {
                self.clear();
                return Err(e);
            }
        };

        self.file_metadata = file_metadata;
        self.content = Some(content);
        self.log_load_summary();
        self.clear_modified();

        if self.config.validate_labels_on_load
            && self.is_mapped_with_label_table()
            && tracing::enabled!(Level::DEBUG)
        {
            if let Err(e) = self.validate_keys_and_labels() {
                warn!(file = %self.file_name, error = %e, "Key/label validation failed");
            }
        }

        Ok(())
    }

    /// Assemble the loaded state without touching `self`.
    fn build_content(
        &self,
        source: Box<dyn ContainerSource>,
    ) -> Result<(LoadedContent, MetaData)> {
        let policy = self
            .kind
            .policy()
            .ok_or_else(|| DataFileError::UnsupportedFileKind {
                file: self.file_name.clone(),
                kind: self.kind.to_string(),
            })?;

        let mut mismatches = Vec::new();
        for (axis, expected) in [
            (MatrixAxis::AlongRow, policy.row_type),
            (MatrixAxis::AlongColumn, policy.column_type),
        ] {
            let actual = source.mapping_type(axis);
            if actual != expected {
                mismatches.push(MappingMismatch {
                    axis,
                    expected,
                    actual,
                });
            }
        }
        if !mismatches.is_empty() {
            return Err(DataFileError::MappingTypeMismatch {
                file: self.file_name.clone(),
                mismatches,
            });
        }

        let data_type = policy.map_data_type();
        if data_type == IndexType::Invalid {
            return Err(DataFileError::InvalidMapDataType {
                file: self.file_name.clone(),
                data_type,
            });
        }

        let rows = source.number_of_rows();
        let columns = source.number_of_columns();
        let data_count = policy.data_count(rows, columns);
        let map_axis = policy.access.map_axis();

        let maps = (0..policy.number_of_maps(columns))
            .map(|i| {
                MapContent::new(
                    data_type,
                    data_count,
                    source.map_metadata(map_axis, i).unwrap_or_default(),
                    source.map_palette_color_mapping(map_axis, i),
                    source.map_label_table(map_axis, i),
                    &self.config,
                )
                .with_name(source.map_name(map_axis, i).unwrap_or_default())
            })
            .collect();

        let voxels = source
            .volume_mappings(policy.access)
            .map_err(|e| DataFileError::source(self.file_name.clone(), e))?;
        let indexer = SparseVolumeIndexer::new(
            source.volume_space().as_ref(),
            &voxels,
            self.config.indexer_validation,
        );

        let mut dimensions = [0; 5];
        let contains_volume_data = indexer.is_valid();
        if let Some(geometry) = indexer.geometry().filter(|_| contains_volume_data) {
            let [i, j, k] = geometry.dims();
            dimensions = [i, j, k, 1, 1];
        }

        let contains_surface_data = Structure::all()
            .iter()
            .any(|structure| source.has_surface_data(policy.access, *structure));

        let file_metadata = source.file_metadata();

        Ok((
            LoadedContent {
                source,
                policy,
                indexer,
                maps,
                rows,
                columns,
                dimensions,
                contains_surface_data,
                contains_volume_data,
            },
            file_metadata,
        ))
    }

    fn log_load_summary(&self) {
        let Some(content) = self.content.as_ref() else {
            return;
        };
        let map_names = content
            .maps
            .iter()
            .enumerate()
            .map(|(i, m)| format!("{}:{}", i, m.name()))
            .collect::<Vec<_>>()
            .join(", ");

        info!(
            file = %self.file_name,
            kind = %self.kind,
            rows = content.rows,
            columns = content.columns,
            row_type = %content.source.mapping_type(MatrixAxis::AlongRow),
            column_type = %content.source.mapping_type(MatrixAxis::AlongColumn),
            has_surface_data = content.contains_surface_data,
            has_volume_data = content.contains_volume_data,
            voxel_count = content.indexer.voxel_count(),
            dimensions = ?content.dimensions,
            maps = content.maps.len(),
            map_names = %map_names,
            label_table = self.is_mapped_with_label_table(),
            palette = self.is_mapped_with_palette(),
            "Loaded mappable data file"
        );
    }

    /// Drop the container and all loaded state.
    pub fn clear(&mut self) {
        self.content = None;
        self.file_metadata.clear();
        self.modified = false;
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    pub fn number_of_maps(&self) -> usize {
        self.content.as_ref().map_or(0, |c| c.maps.len())
    }

    pub fn number_of_rows(&self) -> usize {
        self.content.as_ref().map_or(0, |c| c.rows)
    }

    pub fn number_of_columns(&self) -> usize {
        self.content.as_ref().map_or(0, |c| c.columns)
    }

    fn coloring_mode(&self) -> Option<ColoringMode> {
        self.content.as_ref().map(|c| c.policy.coloring)
    }

    pub fn is_mapped_with_palette(&self) -> bool {
        self.coloring_mode() == Some(ColoringMode::Palette)
    }

    pub fn is_mapped_with_label_table(&self) -> bool {
        self.coloring_mode() == Some(ColoringMode::LabelTable)
    }

    pub fn is_surface_mappable(&self) -> bool {
        self.content.as_ref().is_some_and(|c| c.contains_surface_data)
    }

    pub fn is_volume_mappable(&self) -> bool {
        self.content.as_ref().is_some_and(|c| c.contains_volume_data)
    }

    /// The sparse voxel lookup of the loaded file.
    pub fn volume_indexer(&self) -> Option<&SparseVolumeIndexer> {
        self.content.as_ref().map(|c| &c.indexer)
    }

    fn loaded(&self) -> Result<&LoadedContent> {
        self.content
            .as_ref()
            .ok_or_else(|| DataFileError::NotLoaded(self.file_name.clone()))
    }

    fn map_at(&self, map_index: usize) -> Result<&MapContent> {
        let count = self.number_of_maps();
        self.content
            .as_ref()
            .and_then(|c| c.maps.get(map_index))
            .ok_or(DataFileError::MapIndexOutOfRange {
                index: map_index,
                count,
            })
    }

    fn map_at_mut(&mut self, map_index: usize) -> Result<&mut MapContent> {
        let count = self.number_of_maps();
        self.content
            .as_mut()
            .and_then(|c| c.maps.get_mut(map_index))
            .ok_or(DataFileError::MapIndexOutOfRange {
                index: map_index,
                count,
            })
    }

    pub fn map_content(&self, map_index: usize) -> Result<&MapContent> {
        self.map_at(map_index)
    }

    pub fn map_name(&self, map_index: usize) -> Result<&str> {
        Ok(self.map_at(map_index)?.name())
    }

    /// Rename a map. Marks the file modified when the name changes.
    pub fn set_map_name(&mut self, map_index: usize, name: &str) -> Result<()> {
        let map = self.map_at_mut(map_index)?;
        if map.name() == name {
            return Ok(());
        }
        map.set_name(name);
        self.modified = true;
        Ok(())
    }

    pub fn map_metadata(&self, map_index: usize) -> Result<&MetaData> {
        Ok(self.map_at(map_index)?.metadata())
    }

    pub fn map_metadata_mut(&mut self, map_index: usize) -> Result<&mut MetaData> {
        Ok(self.map_at_mut(map_index)?.metadata_mut())
    }

    pub fn map_unique_id(&self, map_index: usize) -> Result<&str> {
        Ok(self.map_at(map_index)?.unique_id())
    }

    /// Label table of a map. `None` unless the file is colored with label
    /// tables.
    pub fn map_label_table(&self, map_index: usize) -> Result<Option<&LabelTable>> {
        let map = self.map_at(map_index)?;
        Ok(map.label_table().filter(|_| self.is_mapped_with_label_table()))
    }

    pub fn map_label_table_mut(&mut self, map_index: usize) -> Result<Option<&mut LabelTable>> {
        let label_mode = self.is_mapped_with_label_table();
        let map = self.map_at_mut(map_index)?;
        Ok(map.label_table_mut().filter(|_| label_mode))
    }

    /// Palette color mapping of a map. `None` unless the file is colored
    /// with palettes.
    pub fn map_palette_color_mapping(
        &self,
        map_index: usize,
    ) -> Result<Option<&PaletteColorMapping>> {
        let map = self.map_at(map_index)?;
        Ok(map
            .palette_color_mapping()
            .filter(|_| self.is_mapped_with_palette()))
    }

    pub fn map_palette_color_mapping_mut(
        &mut self,
        map_index: usize,
    ) -> Result<Option<&mut PaletteColorMapping>> {
        let palette_mode = self.is_mapped_with_palette();
        let map = self.map_at_mut(map_index)?;
        Ok(map.palette_color_mapping_mut().filter(|_| palette_mode))
    }

    pub fn file_metadata(&self) -> &MetaData {
        &self.file_metadata
    }

    pub fn file_metadata_mut(&mut self) -> &mut MetaData {
        &mut self.file_metadata
    }

    /// Read the values of one map from the container.
    ///
    /// With column access this is a column of `number_of_rows()` values, with
    /// row access a row of `number_of_columns()` values.
    pub fn map_data(&self, map_index: usize) -> Result<Vec<f32>> {
        let content = self.loaded()?;
        self.map_at(map_index)?;

        let read = match content.policy.access {
            DataAccess::ColumnMethods => {
                let mut data = vec![0.0; content.rows];
                content
                    .source
                    .read_column(map_index, &mut data)
                    .map(|_| data)
            }
            DataAccess::RowMethods => {
                let mut data = vec![0.0; content.columns];
                content.source.read_row(map_index, &mut data).map(|_| data)
            }
        };
        read.map_err(|e| DataFileError::source(self.file_name.clone(), e))
    }

    pub fn map_statistics(&mut self, map_index: usize) -> Result<&DescriptiveStatistics> {
        let data = self.map_data(map_index)?;
        Ok(self.map_at_mut(map_index)?.descriptive_statistics(&data))
    }

    pub fn map_statistics_in_range(
        &mut self,
        map_index: usize,
        filter: &RangeFilter,
    ) -> Result<&DescriptiveStatistics> {
        let data = self.map_data(map_index)?;
        Ok(self
            .map_at_mut(map_index)?
            .descriptive_statistics_in_range(&data, filter))
    }

    pub fn map_fast_statistics(&mut self, map_index: usize) -> Result<&FastStatistics> {
        let data = self.map_data(map_index)?;
        Ok(self.map_at_mut(map_index)?.fast_statistics(&data))
    }

    pub fn map_fast_statistics_in_range(
        &mut self,
        map_index: usize,
        filter: &RangeFilter,
    ) -> Result<&FastStatistics> {
        let data = self.map_data(map_index)?;
        Ok(self
            .map_at_mut(map_index)?
            .fast_statistics_in_range(&data, filter))
    }

    pub fn map_histogram(&mut self, map_index: usize) -> Result<&Histogram> {
        let data = self.map_data(map_index)?;
        Ok(self.map_at_mut(map_index)?.histogram(&data))
    }

    pub fn map_histogram_in_range(
        &mut self,
        map_index: usize,
        filter: &RangeFilter,
    ) -> Result<&Histogram> {
        let data = self.map_data(map_index)?;
        Ok(self.map_at_mut(map_index)?.histogram_in_range(&data, filter))
    }

    /// Recolor one map. Palette files use `palettes`; label files color
    /// with the map's label table and never consult `palettes`.
    pub fn update_scalar_coloring_for_map(
        &mut self,
        map_index: usize,
        palettes: &dyn PaletteSource,
    ) -> Result<()> {
        let data = self.map_data(map_index)?;
        let palette_source = match self.coloring_mode() {
            Some(ColoringMode::Palette) => Some(palettes),
            _ => None,
        };
        self.map_at_mut(map_index)?
            .update_coloring(&data, palette_source);
        Ok(())
    }

    /// True if the file, its metadata or any map was edited since loading.
    pub fn is_modified(&self) -> bool {
        self.modified
            || self.file_metadata.is_modified()
            || self
                .content
                .as_ref()
                .is_some_and(|c| c.maps.iter().any(MapContent::is_modified_status))
    }

    pub fn clear_modified(&mut self) {
        self.modified = false;
        self.file_metadata.clear_modified();
        if let Some(content) = self.content.as_mut() {
            content
                .maps
                .iter_mut()
                .for_each(MapContent::clear_modified_status);
        }
    }

    /// Mark the file itself modified.
    pub fn set_modified(&mut self) {
        self.modified = true;
    }
}

impl std::fmt::Debug for MappableDataFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappableDataFile")
            .field("kind", &self.kind)
            .field("file_name", &self.file_name)
            .field("maps", &self.number_of_maps())
            .field("rows", &self.number_of_rows())
            .field("columns", &self.number_of_columns())
            .field("modified", &self.is_modified())
            .finish()
    }
}
