//! Volume queries: geometry, voxel values and slice coloring.

use super::MappableDataFile;
use crate::error::Result;
use cifti_common::BoundingBox;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Orientation of a volume slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeSliceViewPlane {
    /// Constant K
    Axial,
    /// Constant J
    Coronal,
    /// Constant I
    Parasagittal,
}

impl VolumeSliceViewPlane {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "axial" => Some(Self::Axial),
            "coronal" => Some(Self::Coronal),
            "parasagittal" | "sagittal" => Some(Self::Parasagittal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Axial => "axial",
            Self::Coronal => "coronal",
            Self::Parasagittal => "parasagittal",
        }
    }
}

impl fmt::Display for VolumeSliceViewPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a float color component in [0, 1] to a byte.
#[inline]
fn to_byte(component: f32) -> u8 {
    (component * 255.0) as u8
}

impl MappableDataFile {
    /// Volume dimensions: I, J, K, time and components. All zero unless the
    /// file maps to a volume.
    pub fn dimensions(&self) -> [i64; 5] {
        self.content.as_ref().map_or([0; 5], |c| c.dimensions)
    }

    pub fn number_of_components(&self) -> i64 {
        self.dimensions()[4]
    }

    /// Corner coordinate of a voxel, if the file maps to a volume.
    pub fn index_to_space(&self, ijk: [i64; 3]) -> Option<[f32; 3]> {
        self.volume_indexer()?
            .indices_to_coordinate(ijk[0], ijk[1], ijk[2])
    }

    /// Indices of the voxel containing a coordinate (not bounds checked).
    pub fn enclosing_voxel(&self, xyz: [f32; 3]) -> Option<[i64; 3]> {
        self.volume_indexer()?
            .coordinate_to_indices(xyz[0], xyz[1], xyz[2])
    }

    /// True if the indices lie within the volume dimensions.
    pub fn index_valid(&self, ijk: [i64; 3]) -> bool {
        let dims = self.dimensions();
        (0..3).all(|axis| ijk[axis] >= 0 && ijk[axis] < dims[axis])
    }

    /// Box spanning the first and last voxel corners. Empty when the file
    /// does not map to a volume.
    pub fn voxel_space_bounding_box(&self) -> BoundingBox {
        let mut bounds = BoundingBox::empty();
        let dims = self.dimensions();
        if let (Some(first), Some(last)) = (
            self.index_to_space([0, 0, 0]),
            self.index_to_space([dims[0] - 1, dims[1] - 1, dims[2] - 1]),
        ) {
            bounds.update(first);
            bounds.update(last);
        }
        bounds
    }

    /// Value of a voxel in a map, or `None` if the voxel has no data.
    pub fn value(&self, ijk: [i64; 3], map_index: usize) -> Result<Option<f32>> {
        self.map_at(map_index)?;
        let Some(offset) = self
            .volume_indexer()
            .and_then(|indexer| indexer.offset_for_indices(ijk[0], ijk[1], ijk[2]))
        else {
            return Ok(None);
        };
        let data = self.map_data(map_index)?;
        Ok(data.get(offset).copied())
    }

    /// Color of a voxel in a map as RGBA bytes, (0, 0, 0, 0) if the voxel
    /// has no data.
    pub fn voxel_color_in_map(&self, ijk: [i64; 3], map_index: usize) -> Result<[u8; 4]> {
        let map = self.map_at(map_index)?;
        let mut rgba = [0u8; 4];
        let offset = self
            .volume_indexer()
            .and_then(|indexer| indexer.offset_for_indices(ijk[0], ijk[1], ijk[2]));
        if let Some(color) = offset.and_then(|o| map.rgba().get(o * 4..o * 4 + 4)) {
            for (out, component) in rgba.iter_mut().zip(color) {
                *out = to_byte(*component);
            }
        }
        Ok(rgba)
    }

    /// Number of voxels in one slice of the given plane.
    pub fn voxel_count_in_slice(&self, plane: VolumeSliceViewPlane) -> usize {
        let [di, dj, dk, _, _] = self.dimensions();
        let count = match plane {
            VolumeSliceViewPlane::Axial => di * dj,
            VolumeSliceViewPlane::Coronal => di * dk,
            VolumeSliceViewPlane::Parasagittal => dj * dk,
        };
        count.max(0) as usize
    }

    /// Write the RGBA bytes of one slice of a map into `rgba_out`.
    ///
    /// The first `voxel_count_in_slice(plane) * 4` bytes are cleared and
    /// voxels with data are colored from the map's coloring buffer. Slices
    /// outside the volume leave `rgba_out` untouched. Nothing is written
    /// past the end of `rgba_out`.
    pub fn voxel_colors_for_slice_in_map(
        &self,
        map_index: usize,
        plane: VolumeSliceViewPlane,
        slice: i64,
        rgba_out: &mut [u8],
    ) -> Result<()> {
        let map = self.map_at(map_index)?;
        let Some(indexer) = self.volume_indexer() else {
            return Ok(());
        };

        let [di, dj, dk, _, _] = self.dimensions();
        let slice_limit = match plane {
            VolumeSliceViewPlane::Axial => dk,
            VolumeSliceViewPlane::Coronal => dj,
            VolumeSliceViewPlane::Parasagittal => di,
        };
        if slice < 0 || slice >= slice_limit {
            return Ok(());
        }

        let voxel_count = self.voxel_count_in_slice(plane);
        if voxel_count == 0 {
            return Ok(());
        }
        let clear_len = (voxel_count * 4).min(rgba_out.len());
        rgba_out[..clear_len].fill(0);

        let map_rgba = map.rgba();
        if map_rgba.is_empty() {
            return Ok(());
        }

        // Slice rows and the number of voxels in each
        let (rows, row_len): (i64, i64) = match plane {
            VolumeSliceViewPlane::Axial => (dj, di),
            VolumeSliceViewPlane::Coronal => (dk, di),
            VolumeSliceViewPlane::Parasagittal => (dk, dj),
        };

        for row in 0..rows {
            for column in 0..row_len {
                let (i, j, k) = match plane {
                    VolumeSliceViewPlane::Axial => (column, row, slice),
                    VolumeSliceViewPlane::Coronal => (column, slice, row),
                    VolumeSliceViewPlane::Parasagittal => (slice, column, row),
                };
                let Some(offset) = indexer.offset_for_indices(i, j, k) else {
                    continue;
                };
                let Some(color) = map_rgba.get(offset * 4..offset * 4 + 4) else {
                    continue;
                };
                let out_offset = ((row * row_len + column) * 4) as usize;
                if let Some(out) = rgba_out.get_mut(out_offset..out_offset + 4) {
                    for (byte, component) in out.iter_mut().zip(color) {
                        *byte = to_byte(*component);
                    }
                }
            }
        }

        Ok(())
    }
}
