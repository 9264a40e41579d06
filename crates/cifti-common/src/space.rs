//! Volume space and plumb (axis-aligned) volume geometry.

use nalgebra::{Matrix3, Matrix3x4, Vector4};
use serde::{Deserialize, Serialize};

/// Volume dimensions and index-to-space transform as reported by a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSpace {
    /// Number of voxels along I, J and K
    pub dims: [i64; 3],
    /// Rows of the 3x4 affine mapping (i, j, k, 1) to the voxel center (x, y, z)
    pub sform: [[f32; 4]; 3],
}

impl VolumeSpace {
    /// Create a volume space from dimensions and a 3x4 affine.
    pub fn new(dims: [i64; 3], sform: [[f32; 4]; 3]) -> Self {
        Self { dims, sform }
    }

    /// Create an axis-aligned volume space from the center of voxel
    /// (0, 0, 0) and per-axis spacing.
    pub fn plumb(dims: [i64; 3], origin: [f32; 3], spacing: [f32; 3]) -> Self {
        Self {
            dims,
            sform: [
                [spacing[0], 0.0, 0.0, origin[0]],
                [0.0, spacing[1], 0.0, origin[1]],
                [0.0, 0.0, spacing[2], origin[2]],
            ],
        }
    }

    fn affine(&self) -> Matrix3x4<f32> {
        Matrix3x4::from_fn(|r, c| self.sform[r][c])
    }

    /// Map voxel indices to the coordinate of the voxel center.
    pub fn index_to_space(&self, ijk: [f32; 3]) -> [f32; 3] {
        let xyz = self.affine() * Vector4::new(ijk[0], ijk[1], ijk[2], 1.0);
        [xyz[0], xyz[1], xyz[2]]
    }

    /// Total number of voxels in the dense volume, `None` if it overflows.
    pub fn voxel_count(&self) -> Option<i64> {
        self.dims.iter().try_fold(1i64, |count, d| count.checked_mul(*d))
    }

    /// Get the plumb attributes of this space.
    ///
    /// Returns `None` when the rotation/scale part of the affine is not
    /// diagonal (rotated, sheared or axis-permuted volumes) or when a
    /// diagonal entry is zero.
    pub fn plumb_attributes(&self) -> Option<PlumbAttributes> {
        let linear: Matrix3<f32> = self.affine().fixed_columns::<3>(0).into_owned();

        for r in 0..3 {
            for c in 0..3 {
                if r != c && linear[(r, c)] != 0.0 {
                    return None;
                }
            }
        }

        let spacing = [linear[(0, 0)], linear[(1, 1)], linear[(2, 2)]];
        if spacing.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return None;
        }

        let orientation = [
            Orientation::for_axis(0, spacing[0]),
            Orientation::for_axis(1, spacing[1]),
            Orientation::for_axis(2, spacing[2]),
        ];

        Some(PlumbAttributes {
            orientation,
            dims: self.dims,
            origin: [self.sform[0][3], self.sform[1][3], self.sform[2][3]],
            spacing,
        })
    }
}

/// Direction in which an index axis increases in patient space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    LeftToRight,
    RightToLeft,
    PosteriorToAnterior,
    AnteriorToPosterior,
    InferiorToSuperior,
    SuperiorToInferior,
}

impl Orientation {
    fn for_axis(axis: usize, spacing: f32) -> Self {
        match (axis, spacing > 0.0) {
            (0, true) => Orientation::LeftToRight,
            (0, false) => Orientation::RightToLeft,
            (1, true) => Orientation::PosteriorToAnterior,
            (1, false) => Orientation::AnteriorToPosterior,
            (_, true) => Orientation::InferiorToSuperior,
            (_, false) => Orientation::SuperiorToInferior,
        }
    }
}

/// Orientation, dimensions, voxel-center origin and spacing of a plumb volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlumbAttributes {
    pub orientation: [Orientation; 3],
    pub dims: [i64; 3],
    /// Center of voxel (0, 0, 0)
    pub origin: [f32; 3],
    pub spacing: [f32; 3],
}

/// Immutable geometry of a plumb volume.
///
/// The stored origin is the corner of voxel (0, 0, 0), i.e. the voxel-center
/// origin shifted back by half a voxel, so that index/coordinate conversion
/// is a pure per-axis affine map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeGeometry {
    dims: [i64; 3],
    origin: [f32; 3],
    spacing: [f32; 3],
}

impl VolumeGeometry {
    /// Build the geometry from plumb attributes.
    ///
    /// Returns `None` if any spacing component is zero or not finite.
    pub fn from_plumb(attributes: &PlumbAttributes) -> Option<Self> {
        let spacing = attributes.spacing;
        if spacing.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return None;
        }

        let origin = [
            attributes.origin[0] - spacing[0] * 0.5,
            attributes.origin[1] - spacing[1] * 0.5,
            attributes.origin[2] - spacing[2] * 0.5,
        ];

        Some(Self {
            dims: attributes.dims,
            origin,
            spacing,
        })
    }

    pub fn dims(&self) -> [i64; 3] {
        self.dims
    }

    /// Corner-adjusted origin.
    pub fn origin(&self) -> [f32; 3] {
        self.origin
    }

    pub fn spacing(&self) -> [f32; 3] {
        self.spacing
    }

    /// Number of voxels in the dense volume (zero if any dimension is not
    /// positive), or `None` if the count does not fit in an `i64`.
    pub fn voxel_count(&self) -> Option<i64> {
        if self.dims.iter().any(|d| *d <= 0) {
            return Some(0);
        }
        self.dims.iter().try_fold(1i64, |count, d| count.checked_mul(*d))
    }

    /// Check whether the indices lie inside the dense volume.
    pub fn contains_indices(&self, i: i64, j: i64, k: i64) -> bool {
        i >= 0 && i < self.dims[0] && j >= 0 && j < self.dims[1] && k >= 0 && k < self.dims[2]
    }

    /// Flat row-major (I fastest) offset of in-range indices.
    pub fn flat_index(&self, i: i64, j: i64, k: i64) -> Option<usize> {
        if !self.contains_indices(i, j, k) {
            return None;
        }
        let index = k
            .checked_mul(self.dims[1])?
            .checked_add(j)?
            .checked_mul(self.dims[0])?
            .checked_add(i)?;
        usize::try_from(index).ok()
    }

    /// `coord = origin + idx * spacing`. Any indices are accepted.
    pub fn indices_to_coordinate(&self, i: i64, j: i64, k: i64) -> [f32; 3] {
        [
            self.origin[0] + i as f32 * self.spacing[0],
            self.origin[1] + j as f32 * self.spacing[1],
            self.origin[2] + k as f32 * self.spacing[2],
        ]
    }

    /// `idx = floor((coord - origin) / spacing)`. No bounds checking.
    pub fn coordinate_to_indices(&self, x: f32, y: f32, z: f32) -> [i64; 3] {
        [
            ((x - self.origin[0]) / self.spacing[0]).floor() as i64,
            ((y - self.origin[1]) / self.spacing[1]).floor() as i64,
            ((z - self.origin[2]) / self.spacing[2]).floor() as i64,
        ]
    }
}
