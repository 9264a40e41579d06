//! Test data generators for synthetic map samples and voxel lists.
//!
//! These generators create predictable, verifiable patterns that can be used
//! across the test suite.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates `count` evenly spaced values from `min` to `max` inclusive.
///
/// # Example
///
/// ```
/// use test_utils::ramp_values;
///
/// let values = ramp_values(5, 0.0, 4.0);
/// assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn ramp_values(count: usize, min: f32, max: f32) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (count - 1) as f32;
            (0..count).map(|i| min + i as f32 * step).collect()
        }
    }
}

/// Creates a ramp symmetric around zero, from `-magnitude` to `magnitude`.
///
/// With an odd `count` the middle value is exactly zero.
pub fn signed_ramp_values(count: usize, magnitude: f32) -> Vec<f32> {
    ramp_values(count, -magnitude, magnitude)
}

/// Creates label-key samples by cycling through `keys`.
///
/// # Example
///
/// ```
/// use test_utils::label_values;
///
/// assert_eq!(label_values(5, &[0, 7]), vec![0.0, 7.0, 0.0, 7.0, 0.0]);
/// ```
pub fn label_values(count: usize, keys: &[i32]) -> Vec<f32> {
    if keys.is_empty() {
        return vec![0.0; count];
    }
    (0..count).map(|i| keys[i % keys.len()] as f32).collect()
}

/// Uniform random values in [min, max) from a fixed seed.
pub fn random_values(count: usize, min: f32, max: f32, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen_range(min..max)).collect()
}

/// Every voxel of a `dims` volume with sequential offsets, I fastest.
///
/// Each entry is `([i, j, k], offset)` with `offset == i + di * (j + dj * k)`.
pub fn dense_voxel_list(dims: [i64; 3]) -> Vec<([i64; 3], usize)> {
    let mut voxels = Vec::new();
    for k in 0..dims[2] {
        for j in 0..dims[1] {
            for i in 0..dims[0] {
                let offset = voxels.len();
                voxels.push(([i, j, k], offset));
            }
        }
    }
    voxels
}

/// Voxels where `i + j + k` is even, with sequential offsets.
///
/// Roughly half the volume, with every present voxel surrounded by absent
/// ones along each axis.
pub fn checkerboard_voxel_list(dims: [i64; 3]) -> Vec<([i64; 3], usize)> {
    let mut voxels = Vec::new();
    for k in 0..dims[2] {
        for j in 0..dims[1] {
            for i in 0..dims[0] {
                if (i + j + k) % 2 == 0 {
                    let offset = voxels.len();
                    voxels.push(([i, j, k], offset));
                }
            }
        }
    }
    voxels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_values() {
        assert!(ramp_values(0, 0.0, 1.0).is_empty());
        assert_eq!(ramp_values(1, 3.0, 9.0), vec![3.0]);
        assert_eq!(signed_ramp_values(3, 2.0), vec![-2.0, 0.0, 2.0]);
    }

    #[test]
    fn test_dense_voxel_list_offsets() {
        let voxels = dense_voxel_list([2, 3, 4]);
        assert_eq!(voxels.len(), 24);
        for ([i, j, k], offset) in voxels {
            assert_eq!(offset as i64, i + 2 * (j + 3 * k));
        }
    }

    #[test]
    fn test_checkerboard_voxel_list() {
        let voxels = checkerboard_voxel_list([4, 4, 4]);
        assert_eq!(voxels.len(), 32);
        assert!(voxels.iter().all(|([i, j, k], _)| (i + j + k) % 2 == 0));
        assert_eq!(voxels.last().map(|(_, o)| *o), Some(31));
    }

    #[test]
    fn test_random_values_are_reproducible() {
        let a = random_values(16, -1.0, 1.0, 42);
        let b = random_values(16, -1.0, 1.0, 42);
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (-1.0..1.0).contains(v)));
    }
}
