//! Axis-aligned 3D bounding box.

use serde::{Deserialize, Serialize};

/// An axis-aligned box in volume space (millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub min_z: f32,
    pub max_x: f32,
    pub max_y: f32,
    pub max_z: f32,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self {
            min_x: min[0],
            min_y: min[1],
            min_z: min[2],
            max_x: max[0],
            max_y: max[1],
            max_z: max[2],
        }
    }

    /// An inverted box that any call to [`BoundingBox::update`] will replace.
    pub fn empty() -> Self {
        Self {
            min_x: f32::MAX,
            min_y: f32::MAX,
            min_z: f32::MAX,
            max_x: -f32::MAX,
            max_y: -f32::MAX,
            max_z: -f32::MAX,
        }
    }

    /// Reset so the next update starts a fresh box.
    pub fn reset_for_update(&mut self) {
        *self = Self::empty();
    }

    /// Grow the box to include the point.
    pub fn update(&mut self, xyz: [f32; 3]) {
        self.min_x = self.min_x.min(xyz[0]);
        self.min_y = self.min_y.min(xyz[1]);
        self.min_z = self.min_z.min(xyz[2]);
        self.max_x = self.max_x.max(xyz[0]);
        self.max_y = self.max_y.max(xyz[1]);
        self.max_z = self.max_z.max(xyz[2]);
    }

    /// True until at least one point has been added.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y || self.min_z > self.max_z
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }

    /// Check if a point is contained within this box.
    pub fn contains_point(&self, xyz: [f32; 3]) -> bool {
        xyz[0] >= self.min_x
            && xyz[0] <= self.max_x
            && xyz[1] >= self.min_y
            && xyz[1] <= self.max_y
            && xyz[2] >= self.min_z
            && xyz[2] <= self.max_z
    }

    /// Get the center point of the box.
    pub fn center(&self) -> [f32; 3] {
        [
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        ]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
