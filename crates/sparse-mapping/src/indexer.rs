//! Lookup from dense volume indices to offsets in sparse brainordinate data.
//!
//! A connectivity container stores values for a subset of the voxels of a
//! volume, listed as (i, j, k) -> offset pairs. Finding a voxel in that list
//! is a linear search; [`SparseVolumeIndexer`] instead builds a lookup table
//! covering the whole dense volume so that a voxel is found in constant time.
//! Volumes too large for a dense table are indexed with a hash map.

use crate::config::IndexerValidation;
use cifti_common::{VolumeGeometry, VolumeSpace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, warn};

/// Marker for a voxel with no data.
const NO_OFFSET: i64 = -1;

/// Largest volume given a dense lookup table (a 256^3 volume).
pub const MAX_DENSE_LOOKUP_VOXELS: i64 = 1 << 24;

/// A voxel present in the sparse data and where its value lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoxelMapping {
    pub ijk: [i64; 3],
    /// Position along the brainordinate axis of the matrix
    pub offset: usize,
}

impl VoxelMapping {
    pub fn new(ijk: [i64; 3], offset: usize) -> Self {
        Self { ijk, offset }
    }
}

#[derive(Debug, Clone)]
enum VoxelLookup {
    /// One slot per voxel of the volume, I fastest
    Dense(Vec<i64>),
    Sparse(HashMap<[i64; 3], usize>),
}

impl VoxelLookup {
    fn for_volume(geometry: &VolumeGeometry, dense_count: i64, entries: &[VoxelMapping]) -> Self {
        if dense_count > MAX_DENSE_LOOKUP_VOXELS {
            let lookup = entries
                .iter()
                .filter(|entry| {
                    let [i, j, k] = entry.ijk;
                    geometry.contains_indices(i, j, k)
                })
                .map(|entry| (entry.ijk, entry.offset))
                .collect();
            return VoxelLookup::Sparse(lookup);
        }

        let mut lookup = vec![NO_OFFSET; dense_count as usize];
        for entry in entries {
            let [i, j, k] = entry.ijk;
            if let Some(slot) = geometry
                .flat_index(i, j, k)
                .and_then(|index| lookup.get_mut(index))
            {
                *slot = entry.offset as i64;
            }
        }
        VoxelLookup::Dense(lookup)
    }

    fn get(&self, geometry: &VolumeGeometry, ijk: [i64; 3]) -> Option<usize> {
        match self {
            VoxelLookup::Dense(lookup) => {
                let index = geometry.flat_index(ijk[0], ijk[1], ijk[2])?;
                match lookup.get(index) {
                    Some(offset) if *offset >= 0 => Some(*offset as usize),
                    _ => None,
                }
            }
            VoxelLookup::Sparse(lookup) => lookup.get(&ijk).copied(),
        }
    }
}

/// Constant-time (i, j, k) -> offset lookup over a sparse set of voxels.
///
/// An invalid indexer answers every query with `None`.
#[derive(Debug, Clone)]
pub struct SparseVolumeIndexer {
    geometry: Option<VolumeGeometry>,
    lookup: VoxelLookup,
    voxel_count: usize,
    valid: bool,
}

impl SparseVolumeIndexer {
    /// Build the lookup from the container's volume space and voxel list.
    ///
    /// The indexer is invalid when the list is empty, the volume space is
    /// missing or not plumb, or the volume has no voxels. Every pair is read
    /// back after insertion; with [`IndexerValidation::Strict`] any pair that
    /// cannot be read back also makes the indexer invalid.
    pub fn new(
        volume_space: Option<&VolumeSpace>,
        entries: &[VoxelMapping],
        validation: IndexerValidation,
    ) -> Self {
        if entries.is_empty() {
            return Self::invalid(None);
        }

        let Some(attributes) = volume_space.and_then(VolumeSpace::plumb_attributes) else {
            warn!(voxels = entries.len(), "Volume is not plumb, voxel lookup disabled");
            return Self::invalid(None);
        };

        let Some(geometry) = VolumeGeometry::from_plumb(&attributes) else {
            return Self::invalid(None);
        };

        let Some(dense_count) = geometry.voxel_count() else {
            warn!(dims = ?geometry.dims(), "Volume dimensions overflow, voxel lookup disabled");
            return Self::invalid(Some(geometry));
        };
        if dense_count <= 0 {
            return Self::invalid(Some(geometry));
        }

        let lookup = VoxelLookup::for_volume(&geometry, dense_count, entries);

        let mut indexer = Self {
            geometry: Some(geometry),
            lookup,
            voxel_count: entries.len(),
            valid: true,
        };

        if validation != IndexerValidation::Off {
            let problems = indexer.check_entries(entries);
            if !problems.is_empty() {
                error!(
                    errors = problems.len(),
                    strict = validation == IndexerValidation::Strict,
                    "Sparse indexer errors:\n{}",
                    problems.join("\n")
                );
                if validation == IndexerValidation::Strict {
                    indexer.valid = false;
                }
            }
        }

        indexer
    }

    fn invalid(geometry: Option<VolumeGeometry>) -> Self {
        Self {
            geometry,
            lookup: VoxelLookup::Dense(Vec::new()),
            voxel_count: 0,
            valid: false,
        }
    }

    /// Describe every entry whose offset cannot be read back.
    fn check_entries(&self, entries: &[VoxelMapping]) -> Vec<String> {
        entries
            .iter()
            .filter_map(|entry| {
                let [i, j, k] = entry.ijk;
                match self.offset_for_indices(i, j, k) {
                    Some(found) if found == entry.offset => None,
                    Some(found) => Some(format!(
                        "IJK ({},{},{}) should have lookup value {} but has value {}",
                        i, j, k, entry.offset, found
                    )),
                    None => Some(format!(
                        "IJK ({},{},{}) should have lookup value {} but was not found",
                        i, j, k, entry.offset
                    )),
                }
            })
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Geometry of the dense volume, if the volume space was plumb.
    pub fn geometry(&self) -> Option<&VolumeGeometry> {
        self.geometry.as_ref()
    }

    /// Number of voxels in the sparse list.
    pub fn voxel_count(&self) -> usize {
        self.voxel_count
    }

    /// Offset of the voxel's data, or `None` if the indices are outside the
    /// volume or the voxel has no data.
    pub fn offset_for_indices(&self, i: i64, j: i64, k: i64) -> Option<usize> {
        if !self.valid {
            return None;
        }
        self.lookup.get(self.geometry.as_ref()?, [i, j, k])
    }

    /// Offset of the data for the voxel containing a coordinate.
    pub fn offset_for_coordinate(&self, x: f32, y: f32, z: f32) -> Option<usize> {
        let [i, j, k] = self.coordinate_to_indices(x, y, z)?;
        self.offset_for_indices(i, j, k)
    }

    /// Indices of the voxel containing a coordinate. The result is not
    /// bounds checked.
    pub fn coordinate_to_indices(&self, x: f32, y: f32, z: f32) -> Option<[i64; 3]> {
        if !self.valid {
            return None;
        }
        Some(self.geometry.as_ref()?.coordinate_to_indices(x, y, z))
    }

    /// Corner coordinate of a voxel. Any indices are accepted.
    pub fn indices_to_coordinate(&self, i: i64, j: i64, k: i64) -> Option<[f32; 3]> {
        if !self.valid {
            return None;
        }
        Some(self.geometry.as_ref()?.indices_to_coordinate(i, j, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(dims: [i64; 3]) -> VolumeSpace {
        VolumeSpace::plumb(dims, [0.0, 0.0, 0.0], [2.0, 2.0, 2.0])
    }

    #[test]
    fn test_lookup_inserted_and_absent() {
        let entries = [VoxelMapping::new([1, 2, 3], 0), VoxelMapping::new([0, 0, 0], 7)];
        let indexer = SparseVolumeIndexer::new(Some(&space([4, 4, 4])), &entries, IndexerValidation::Log);

        assert!(indexer.is_valid());
        assert_eq!(indexer.voxel_count(), 2);
        assert_eq!(indexer.offset_for_indices(1, 2, 3), Some(0));
        assert_eq!(indexer.offset_for_indices(0, 0, 0), Some(7));
        assert_eq!(indexer.offset_for_indices(3, 3, 3), None);
        assert_eq!(indexer.offset_for_indices(4, 0, 0), None);
        assert_eq!(indexer.offset_for_indices(-1, 0, 0), None);
    }

    #[test]
    fn test_empty_entries_invalid() {
        let indexer = SparseVolumeIndexer::new(Some(&space([4, 4, 4])), &[], IndexerValidation::Log);
        assert!(!indexer.is_valid());
        assert_eq!(indexer.coordinate_to_indices(0.0, 0.0, 0.0), None);
    }

    #[test]
    fn test_missing_space_invalid() {
        let entries = [VoxelMapping::new([0, 0, 0], 0)];
        let indexer = SparseVolumeIndexer::new(None, &entries, IndexerValidation::Log);
        assert!(!indexer.is_valid());
        assert!(indexer.geometry().is_none());
    }

    #[test]
    fn test_zero_dimension_invalid() {
        let entries = [VoxelMapping::new([0, 0, 0], 0)];
        let indexer = SparseVolumeIndexer::new(Some(&space([4, 0, 4])), &entries, IndexerValidation::Log);
        assert!(!indexer.is_valid());
        assert_eq!(indexer.indices_to_coordinate(0, 0, 0), None);
    }

    #[test]
    fn test_out_of_volume_entry_strict() {
        let entries = [VoxelMapping::new([0, 0, 0], 0), VoxelMapping::new([9, 0, 0], 1)];

        let logged = SparseVolumeIndexer::new(Some(&space([2, 2, 2])), &entries, IndexerValidation::Log);
        assert!(logged.is_valid());
        assert_eq!(logged.offset_for_indices(0, 0, 0), Some(0));

        let strict = SparseVolumeIndexer::new(Some(&space([2, 2, 2])), &entries, IndexerValidation::Strict);
        assert!(!strict.is_valid());
    }

    #[test]
    fn test_duplicate_ijk_reports_mismatch() {
        let entries = [VoxelMapping::new([1, 1, 1], 3), VoxelMapping::new([1, 1, 1], 4)];
        let indexer = SparseVolumeIndexer::new(Some(&space([2, 2, 2])), &entries, IndexerValidation::Log);
        let problems = indexer.check_entries(&entries);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("should have lookup value 3 but has value 4"));
    }

    #[test]
    fn test_coordinate_conversion_uses_voxel_corner() {
        let entries = [VoxelMapping::new([5, 5, 5], 0)];
        let indexer = SparseVolumeIndexer::new(Some(&space([10, 10, 10])), &entries, IndexerValidation::Log);

        assert_eq!(indexer.indices_to_coordinate(5, 5, 5), Some([9.0, 9.0, 9.0]));
        assert_eq!(indexer.coordinate_to_indices(9.0, 9.0, 9.0), Some([5, 5, 5]));
        assert_eq!(indexer.offset_for_coordinate(10.5, 9.2, 10.9), Some(0));
        assert_eq!(indexer.coordinate_to_indices(-5.0, 0.0, 0.0), Some([-2, 0, 0]));
    }
}
