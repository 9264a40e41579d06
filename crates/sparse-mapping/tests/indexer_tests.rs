//! Tests for the sparse volume indexer.
//!
//! Covers index/coordinate conversion, lookup completeness and behavior of
//! indexers built from degenerate input.

use cifti_common::VolumeSpace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sparse_mapping::{IndexerValidation, SparseVolumeIndexer, VoxelMapping};
use std::collections::HashSet;
use test_utils::{assert_coords_approx_eq, checkerboard_voxel_list, dense_voxel_list};

fn voxel_mappings(list: &[([i64; 3], usize)]) -> Vec<VoxelMapping> {
    list.iter()
        .map(|(ijk, offset)| VoxelMapping::new(*ijk, *offset))
        .collect()
}

// ============================================================================
// Coordinate conversion
// ============================================================================

#[test]
fn test_corner_round_trip_on_exact_grid() {
    let space = VolumeSpace::plumb([8, 6, 4], [3.0, -90.0, 0.5], [1.5, 2.0, 0.25]);
    let entries = voxel_mappings(&dense_voxel_list([8, 6, 4]));
    let indexer = SparseVolumeIndexer::new(Some(&space), &entries, IndexerValidation::Log);
    assert!(indexer.is_valid());

    for k in 0..4 {
        for j in 0..6 {
            for i in 0..8 {
                let [x, y, z] = indexer.indices_to_coordinate(i, j, k).unwrap();
                assert_eq!(indexer.coordinate_to_indices(x, y, z), Some([i, j, k]));
            }
        }
    }
}

#[test]
fn test_voxel_center_round_trip_random_geometry() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..50 {
        let dims = [rng.gen_range(1..12), rng.gen_range(1..12), rng.gen_range(1..12)];
        let mut spacing = [0.0f32; 3];
        for s in spacing.iter_mut() {
            let magnitude = rng.gen_range(0.5..3.0);
            *s = if rng.gen_bool(0.2) { -magnitude } else { magnitude };
        }
        let origin = [
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
        ];
        let space = VolumeSpace::plumb(dims, origin, spacing);
        let entries = [VoxelMapping::new([0, 0, 0], 0)];
        let indexer = SparseVolumeIndexer::new(Some(&space), &entries, IndexerValidation::Log);
        assert!(indexer.is_valid());

        for _ in 0..20 {
            let ijk = [
                rng.gen_range(0..dims[0]),
                rng.gen_range(0..dims[1]),
                rng.gen_range(0..dims[2]),
            ];
            let corner = indexer.indices_to_coordinate(ijk[0], ijk[1], ijk[2]).unwrap();
            let center = [
                corner[0] + spacing[0] * 0.5,
                corner[1] + spacing[1] * 0.5,
                corner[2] + spacing[2] * 0.5,
            ];
            // The voxel center is where the container's affine puts the indices.
            assert_coords_approx_eq!(
                center,
                space.index_to_space([ijk[0] as f32, ijk[1] as f32, ijk[2] as f32]),
                1e-3
            );
            assert_eq!(
                indexer.coordinate_to_indices(center[0], center[1], center[2]),
                Some(ijk)
            );
        }
    }
}

#[test]
fn test_scenario_corner_coordinate() {
    let space = VolumeSpace::plumb([10, 10, 10], [0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
    let entries = [VoxelMapping::new([5, 5, 5], 0), VoxelMapping::new([1, 1, 1], 1)];
    let indexer = SparseVolumeIndexer::new(Some(&space), &entries, IndexerValidation::Log);

    assert_eq!(indexer.indices_to_coordinate(5, 5, 5), Some([9.0, 9.0, 9.0]));
    assert_eq!(indexer.indices_to_coordinate(-1, 0, 20), Some([-3.0, -1.0, 39.0]));
    assert_eq!(indexer.offset_for_coordinate(9.5, 9.5, 9.5), Some(0));
    assert_eq!(indexer.offset_for_coordinate(100.0, 0.0, 0.0), None);
}

// ============================================================================
// Lookup completeness
// ============================================================================

#[test]
fn test_dense_volume_every_voxel_found() {
    let list = dense_voxel_list([5, 4, 3]);
    let indexer = SparseVolumeIndexer::new(
        Some(&VolumeSpace::plumb([5, 4, 3], [0.0; 3], [1.0; 3])),
        &voxel_mappings(&list),
        IndexerValidation::Strict,
    );

    assert!(indexer.is_valid());
    assert_eq!(indexer.voxel_count(), 60);
    for (ijk, offset) in &list {
        assert_eq!(indexer.offset_for_indices(ijk[0], ijk[1], ijk[2]), Some(*offset));
    }
}

#[test]
fn test_checkerboard_absent_voxels_not_found() {
    let dims = [6, 5, 4];
    let list = checkerboard_voxel_list(dims);
    let present: HashSet<[i64; 3]> = list.iter().map(|(ijk, _)| *ijk).collect();
    let indexer = SparseVolumeIndexer::new(
        Some(&VolumeSpace::plumb(dims, [10.0, 20.0, 30.0], [2.0, 2.0, 2.0])),
        &voxel_mappings(&list),
        IndexerValidation::Strict,
    );
    assert!(indexer.is_valid());

    for (ijk, offset) in &list {
        assert_eq!(indexer.offset_for_indices(ijk[0], ijk[1], ijk[2]), Some(*offset));
    }
    for k in 0..dims[2] {
        for j in 0..dims[1] {
            for i in 0..dims[0] {
                if !present.contains(&[i, j, k]) {
                    assert_eq!(indexer.offset_for_indices(i, j, k), None);
                }
            }
        }
    }
}

#[test]
fn test_out_of_volume_queries() {
    let indexer = SparseVolumeIndexer::new(
        Some(&VolumeSpace::plumb([3, 3, 3], [0.0; 3], [1.0; 3])),
        &[VoxelMapping::new([2, 2, 2], 5)],
        IndexerValidation::Log,
    );
    assert_eq!(indexer.offset_for_indices(3, 2, 2), None);
    assert_eq!(indexer.offset_for_indices(2, -1, 2), None);
    assert_eq!(indexer.offset_for_indices(i64::MAX, 0, 0), None);
}

// ============================================================================
// Invalid input
// ============================================================================

fn assert_all_queries_fail(indexer: &SparseVolumeIndexer) {
    assert!(!indexer.is_valid());
    assert_eq!(indexer.offset_for_indices(0, 0, 0), None);
    assert_eq!(indexer.offset_for_coordinate(0.0, 0.0, 0.0), None);
    assert_eq!(indexer.coordinate_to_indices(1.0, 1.0, 1.0), None);
    assert_eq!(indexer.indices_to_coordinate(1, 1, 1), None);
}

#[test]
fn test_non_plumb_volume_is_invalid() {
    test_utils::init_tracing();
    let rotated = VolumeSpace::new(
        [4, 4, 4],
        [
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
        ],
    );
    let indexer = SparseVolumeIndexer::new(
        Some(&rotated),
        &[VoxelMapping::new([0, 0, 0], 0)],
        IndexerValidation::Log,
    );
    assert_all_queries_fail(&indexer);
}

#[test]
fn test_empty_voxel_list_is_invalid() {
    let indexer = SparseVolumeIndexer::new(
        Some(&VolumeSpace::plumb([4, 4, 4], [0.0; 3], [1.0; 3])),
        &[],
        IndexerValidation::Log,
    );
    assert_all_queries_fail(&indexer);
    assert_eq!(indexer.voxel_count(), 0);
}

#[test]
fn test_zero_spacing_is_invalid() {
    let indexer = SparseVolumeIndexer::new(
        Some(&VolumeSpace::plumb([4, 4, 4], [0.0; 3], [1.0, 0.0, 1.0])),
        &[VoxelMapping::new([0, 0, 0], 0)],
        IndexerValidation::Log,
    );
    assert_all_queries_fail(&indexer);
}

#[test]
fn test_validation_off_keeps_unstorable_entries_silent() {
    let indexer = SparseVolumeIndexer::new(
        Some(&VolumeSpace::plumb([2, 2, 2], [0.0; 3], [1.0; 3])),
        &[VoxelMapping::new([5, 5, 5], 0), VoxelMapping::new([1, 0, 0], 1)],
        IndexerValidation::Off,
    );
    assert!(indexer.is_valid());
    assert_eq!(indexer.offset_for_indices(1, 0, 0), Some(1));
}

#[test]
fn test_overflowing_dimensions_are_invalid() {
    let indexer = SparseVolumeIndexer::new(
        Some(&VolumeSpace::plumb([1 << 40, 1 << 40, 2], [0.0; 3], [1.0; 3])),
        &[VoxelMapping::new([0, 0, 0], 0)],
        IndexerValidation::Log,
    );
    assert_all_queries_fail(&indexer);
    assert!(indexer.geometry().is_some());
}

// ============================================================================
// Large volumes
// ============================================================================

#[test]
fn test_large_sparse_volume_uses_hashed_lookup() {
    let dims = [1 << 20, 1 << 20, 1 << 20];
    let entries = [
        VoxelMapping::new([0, 0, 0], 0),
        VoxelMapping::new([(1 << 20) - 1, 12, (1 << 20) - 1], 1),
        VoxelMapping::new([77, 1 << 19, 5], 2),
    ];
    let indexer = SparseVolumeIndexer::new(
        Some(&VolumeSpace::plumb(dims, [0.0; 3], [1.0; 3])),
        &entries,
        IndexerValidation::Strict,
    );

    assert!(indexer.is_valid());
    assert_eq!(indexer.voxel_count(), 3);
    for entry in &entries {
        let [i, j, k] = entry.ijk;
        assert_eq!(indexer.offset_for_indices(i, j, k), Some(entry.offset));
    }
    assert_eq!(indexer.offset_for_indices(1, 0, 0), None);
    assert_eq!(indexer.offset_for_indices(1 << 20, 0, 0), None);
    assert_eq!(indexer.offset_for_indices(-1, 0, 0), None);
}

#[test]
fn test_hashed_lookup_drops_entries_outside_volume() {
    let side = 512;
    assert!(side * side * side > sparse_mapping::MAX_DENSE_LOOKUP_VOXELS);
    let indexer = SparseVolumeIndexer::new(
        Some(&VolumeSpace::plumb([side, side, side], [0.0; 3], [2.0; 3])),
        &[VoxelMapping::new([side, 0, 0], 0), VoxelMapping::new([3, 4, 5], 1)],
        IndexerValidation::Log,
    );

    assert!(indexer.is_valid());
    assert_eq!(indexer.offset_for_indices(side, 0, 0), None);
    assert_eq!(indexer.offset_for_coordinate(6.0, 8.0, 10.0), Some(1));
}
