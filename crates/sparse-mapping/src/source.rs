//! Access to the matrix container behind a mappable data file.

use crate::error::SourceError;
use crate::indexer::VoxelMapping;
use cifti_common::{
    DataAccess, IndexType, LabelTable, MatrixAxis, MetaData, PaletteColorMapping, Structure,
    VolumeSpace,
};
use serde::{Deserialize, Serialize};

/// A surface node present in the sparse data and where its value lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceMapping {
    pub node: usize,
    /// Position along the brainordinate axis of the matrix
    pub offset: usize,
}

impl SurfaceMapping {
    pub fn new(node: usize, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// Trait for reading a two-dimensional connectivity matrix and the
/// descriptions of its axes.
///
/// One axis lists brainordinates (surface nodes and voxels); the other lists
/// maps (scalars, time points, labels or parcels). Which is which depends on
/// the [`DataAccess`] the file kind uses: with column access a map is one
/// column, with row access a map is one row.
pub trait ContainerSource: Send + Sync {
    fn number_of_rows(&self) -> usize;

    fn number_of_columns(&self) -> usize;

    /// What the indices along an axis refer to.
    fn mapping_type(&self, axis: MatrixAxis) -> IndexType;

    /// File-level metadata.
    fn file_metadata(&self) -> MetaData;

    /// Name of entry `index` along `axis`, if the axis names its entries.
    fn map_name(&self, axis: MatrixAxis, index: usize) -> Option<String>;

    fn map_metadata(&self, axis: MatrixAxis, index: usize) -> Option<MetaData>;

    fn map_label_table(&self, axis: MatrixAxis, index: usize) -> Option<LabelTable>;

    fn map_palette_color_mapping(
        &self,
        axis: MatrixAxis,
        index: usize,
    ) -> Option<PaletteColorMapping>;

    /// Dimensions and affine of the volume the voxels belong to.
    fn volume_space(&self) -> Option<VolumeSpace>;

    /// Voxels along the brainordinate axis for `access`.
    fn volume_mappings(&self, access: DataAccess) -> Result<Vec<VoxelMapping>, SourceError>;

    /// Nodes of one surface structure along the brainordinate axis for
    /// `access`. Empty when the structure has no data.
    fn surface_mappings(
        &self,
        access: DataAccess,
        structure: Structure,
    ) -> Result<Vec<SurfaceMapping>, SourceError>;

    /// Node count of the surface the structure's data was mapped to.
    fn surface_node_count(&self, access: DataAccess, structure: Structure) -> Option<usize>;

    fn has_surface_data(&self, access: DataAccess, structure: Structure) -> bool;

    /// Read row `index` into `out`, which must hold `number_of_columns()` values.
    fn read_row(&self, index: usize, out: &mut [f32]) -> Result<(), SourceError>;

    /// Read column `index` into `out`, which must hold `number_of_rows()` values.
    fn read_column(&self, index: usize, out: &mut [f32]) -> Result<(), SourceError>;
}
