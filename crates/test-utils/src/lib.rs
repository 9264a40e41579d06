//! Shared test utilities for the cifti-mapping workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Approximate float assertions
//! - Synthetic sample and voxel-list generators
//! - Palette and label table fixtures
//! - Tracing setup for tests
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, fixtures, ramp_values};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Honors `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Macro for approximate floating-point equality assertions.
///
/// The epsilon defaults to `1e-5` when omitted.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// assert_approx_eq!(0.1_f32 + 0.2_f32, 0.3_f32);      // passes
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_approx_eq!($left, $right, 1e-5)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of 3D coordinates or RGB(A) colors given
/// as arrays or slices of equal length.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_coords_approx_eq;
///
/// assert_coords_approx_eq!([9.0001, 9.0, 9.0], [9.0, 9.0, 9.0], 0.001);
/// ```
#[macro_export]
macro_rules! assert_coords_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_coords_approx_eq!($left, $right, 1e-5)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left = $left;
        let right = $right;
        assert_eq!(left.len(), right.len(), "coordinate lengths differ");
        for (l, r) in left.iter().zip(right.iter()) {
            $crate::assert_approx_eq!(*l, *r, $epsilon);
        }
    }};
}
