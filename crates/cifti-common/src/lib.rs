//! Common types shared across the sparse brainordinate mapping crates.

pub mod bbox;
pub mod error;
pub mod index;
pub mod label;
pub mod metadata;
pub mod palette;
pub mod space;
pub mod structure;

pub use bbox::BoundingBox;
pub use error::{CiftiError, CiftiResult};
pub use index::{DataAccess, IndexType, MatrixAxis};
pub use label::{Label, LabelTable};
pub use metadata::MetaData;
pub use palette::{
    Palette, PaletteColor, PaletteColorMapping, PaletteFile, PalettePoint, PaletteScaleMode,
    PaletteSource, Threshold, ThresholdTest, ThresholdType, DEFAULT_PALETTE_NAME,
};
pub use space::{Orientation, PlumbAttributes, VolumeGeometry, VolumeSpace};
pub use structure::Structure;
