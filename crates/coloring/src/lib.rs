//! Coloring of map samples into RGBA float buffers.
//!
//! Buffers hold four floats per sample with components in [0, 1]. A sample
//! that is not displayed is written as (0, 0, 0, 0).

pub mod label;
pub mod palette;

pub use label::color_indices_with_label_table;
pub use palette::{color_scalars_with_palette, ScaleRange};
