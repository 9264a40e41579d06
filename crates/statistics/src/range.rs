//! Value-range filters for statistics.

use serde::{Deserialize, Serialize};

/// Inclusion range for samples.
///
/// Positive samples are kept when in [`least_positive`, `most_positive`],
/// negative samples when in [`most_negative`, `least_negative`], and zeros
/// when `include_zero` is set.
///
/// [`least_positive`]: RangeFilter::least_positive
/// [`most_negative`]: RangeFilter::most_negative
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub most_positive: f32,
    pub least_positive: f32,
    pub least_negative: f32,
    pub most_negative: f32,
    pub include_zero: bool,
}

impl RangeFilter {
    pub fn new(
        most_positive: f32,
        least_positive: f32,
        least_negative: f32,
        most_negative: f32,
        include_zero: bool,
    ) -> Self {
        Self {
            most_positive,
            least_positive,
            least_negative,
            most_negative,
            include_zero,
        }
    }

    /// A filter that keeps every finite sample.
    pub fn all() -> Self {
        Self {
            most_positive: f32::INFINITY,
            least_positive: 0.0,
            least_negative: 0.0,
            most_negative: f32::NEG_INFINITY,
            include_zero: true,
        }
    }

    pub fn includes(&self, value: f32) -> bool {
        if !value.is_finite() {
            return false;
        }
        if value > 0.0 {
            value >= self.least_positive && value <= self.most_positive
        } else if value < 0.0 {
            value <= self.least_negative && value >= self.most_negative
        } else {
            self.include_zero
        }
    }

    /// Copy the included samples.
    pub fn filter(&self, values: &[f32]) -> Vec<f32> {
        values.iter().copied().filter(|v| self.includes(*v)).collect()
    }
}

impl Default for RangeFilter {
    fn default() -> Self {
        Self::all()
    }
}
