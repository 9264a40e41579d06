//! Statistics over the samples of one map.
//!
//! - [`DescriptiveStatistics`]: exact values computed from sorted samples
//! - [`FastStatistics`]: exact moments, bucket-approximated median and percentiles
//! - [`Histogram`]: equal-width bucket counts
//!
//! Every type can be restricted to a value range with a [`RangeFilter`].
//! Non-finite samples are always ignored.

pub mod descriptive;
pub mod fast;
pub mod histogram;
pub mod range;

pub use descriptive::DescriptiveStatistics;
pub use fast::FastStatistics;
pub use histogram::Histogram;
pub use range::RangeFilter;
