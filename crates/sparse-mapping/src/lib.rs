//! Sparse brainordinate indexing and mappable connectivity data files.
//!
//! Connectivity matrices store values for a sparse set of brainordinates
//! (surface nodes and voxels) along one axis and a set of maps along the
//! other. This crate turns such a matrix into per-map coloring that can be
//! drawn on surfaces and volume slices:
//!
//! - **Voxel lookup**: [`SparseVolumeIndexer`] finds a voxel's data offset in O(1)
//! - **Map state**: [`MapContent`] keeps each map's coloring, statistics,
//!   label table and palette color mapping
//! - **File kinds**: [`FileKind::policy`] gives the expected axis types, map
//!   count and coloring mode of each connectivity kind
//!
//! # Architecture
//!
//! ```text
//! ContainerSource (rows x columns)
//!      │
//!      ▼
//! MappableDataFile::load()
//!      │
//!      ├─► Check row/column index types against FileKindPolicy
//!      │
//!      ├─► One MapContent per map (metadata, label table, palette mapping)
//!      │
//!      ├─► SparseVolumeIndexer from the voxel list
//!      │
//!      └─► Surface structures present?
//!               │
//!               ▼
//! update_scalar_coloring_for_map(map)
//!      │
//!      ├─► map_data(map): one row or column from the container
//!      │
//!      └─► MapContent::update_coloring (palette or label table)
//!               │
//!               ▼
//!      voxel_colors_for_slice_in_map / map_surface_node_coloring
//! ```
//!
//! # Example
//!
//! ```
//! use cifti_common::{IndexType, MatrixAxis, PaletteColorMapping, PaletteFile, VolumeSpace};
//! use sparse_mapping::{
//!     FileKind, InMemorySource, MapDescription, MappableDataFile, VolumeSliceViewPlane,
//!     VoxelMapping,
//! };
//!
//! let source = InMemorySource::new(2, 1)
//!     .with_mapping_types(IndexType::Scalars, IndexType::BrainModels)
//!     .with_map(
//!         MatrixAxis::AlongRow,
//!         MapDescription::new("activation")
//!             .with_palette_color_mapping(PaletteColorMapping::new("Gray_Interp")),
//!     )
//!     .with_volume(
//!         MatrixAxis::AlongColumn,
//!         VolumeSpace::plumb([2, 2, 2], [0.0; 3], [1.0; 3]),
//!         vec![VoxelMapping::new([0, 0, 0], 0), VoxelMapping::new([1, 1, 1], 1)],
//!     )
//!     .with_data(vec![1.0, 5.0])
//!     .unwrap();
//!
//! let mut file = MappableDataFile::new(FileKind::ConnectivityDenseScalar);
//! file.load(Box::new(source)).unwrap();
//! file.update_scalar_coloring_for_map(0, &PaletteFile::builtin()).unwrap();
//!
//! let mut rgba = vec![0u8; file.voxel_count_in_slice(VolumeSliceViewPlane::Axial) * 4];
//! file.voxel_colors_for_slice_in_map(0, VolumeSliceViewPlane::Axial, 1, &mut rgba).unwrap();
//! assert_eq!(file.value([1, 1, 1], 0).unwrap(), Some(5.0));
//! ```

pub mod config;
pub mod error;
pub mod indexer;
pub mod map_content;
pub mod mappable;
pub mod memory;
pub mod policy;
pub mod source;

// Re-export commonly used types at crate root
pub use config::{IndexerValidation, MappingConfig};
pub use error::{DataFileError, MappingMismatch, Result, SourceError};
pub use indexer::{SparseVolumeIndexer, VoxelMapping, MAX_DENSE_LOOKUP_VOXELS};
pub use map_content::MapContent;
pub use mappable::{
    IdentifiedValue, KeyLabelReport, MappableDataFile, VolumeSliceViewPlane, VoxelIdentification,
};
pub use memory::{AxisContent, InMemorySource, MapDescription, SurfaceModel};
pub use policy::{ColoringMode, FileKind, FileKindPolicy};
pub use source::{ContainerSource, SurfaceMapping};
