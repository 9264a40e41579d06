//! Exact descriptive statistics.

use crate::range::RangeFilter;

/// Exact statistics of a set of samples.
///
/// Positive and negative samples are kept sorted so that sign-specific
/// percentiles can be answered after an update. Zeros count toward the
/// mean, deviation and median but belong to neither sign.
#[derive(Debug, Clone, Default)]
pub struct DescriptiveStatistics {
    count: usize,
    mean: f32,
    population_std_dev: f32,
    sample_std_dev: f32,
    median: f32,
    minimum: f32,
    maximum: f32,
    /// Ascending (least positive first)
    positives: Vec<f32>,
    /// Descending (least negative first)
    negatives: Vec<f32>,
}

impl DescriptiveStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from all finite samples.
    pub fn update(&mut self, values: &[f32]) {
        self.update_in_range(values, &RangeFilter::all());
    }

    /// Recompute from the samples the filter includes.
    pub fn update_in_range(&mut self, values: &[f32], filter: &RangeFilter) {
        *self = Self::default();

        let mut included = filter.filter(values);
        if included.is_empty() {
            return;
        }

        let n = included.len();
        let sum: f64 = included.iter().map(|v| *v as f64).sum();
        let mean = sum / n as f64;
        let sum_sq: f64 = included
            .iter()
            .map(|v| {
                let d = *v as f64 - mean;
                d * d
            })
            .sum();

        included.sort_by(f32::total_cmp);

        self.count = n;
        self.mean = mean as f32;
        self.population_std_dev = (sum_sq / n as f64).sqrt() as f32;
        self.sample_std_dev = if n > 1 {
            (sum_sq / (n - 1) as f64).sqrt() as f32
        } else {
            0.0
        };
        self.minimum = included[0];
        self.maximum = included[n - 1];
        self.median = if n % 2 == 1 {
            included[n / 2]
        } else {
            (included[n / 2 - 1] + included[n / 2]) * 0.5
        };

        self.negatives = included.iter().copied().filter(|v| *v < 0.0).rev().collect();
        self.positives = included.into_iter().filter(|v| *v > 0.0).collect();
    }

    /// Number of samples that contributed.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f32 {
        self.mean
    }

    pub fn population_standard_deviation(&self) -> f32 {
        self.population_std_dev
    }

    pub fn sample_standard_deviation(&self) -> f32 {
        self.sample_std_dev
    }

    pub fn median(&self) -> f32 {
        self.median
    }

    /// Smallest sample (zero when empty).
    pub fn min(&self) -> f32 {
        self.minimum
    }

    /// Largest sample (zero when empty).
    pub fn max(&self) -> f32 {
        self.maximum
    }

    /// Largest positive sample, or zero.
    pub fn most_positive_value(&self) -> f32 {
        self.maximum.max(0.0)
    }

    /// Most negative sample, or zero.
    pub fn most_negative_value(&self) -> f32 {
        self.minimum.min(0.0)
    }

    /// Smallest positive sample, or zero if there are none.
    pub fn least_positive_value(&self) -> f32 {
        self.positives.first().copied().unwrap_or(0.0)
    }

    /// Negative sample closest to zero, or zero if there are none.
    pub fn least_negative_value(&self) -> f32 {
        self.negatives.first().copied().unwrap_or(0.0)
    }

    pub fn positive_count(&self) -> usize {
        self.positives.len()
    }

    pub fn negative_count(&self) -> usize {
        self.negatives.len()
    }

    /// Percentile of the positive samples: 0 is the least positive,
    /// 100 the most positive. Zero when there are no positive samples.
    pub fn positive_percentile(&self, percent: f32) -> f32 {
        percentile_of_sorted(&self.positives, percent)
    }

    /// Percentile of the negative samples by magnitude: 0 is the least
    /// negative, 100 the most negative. Zero when there are no negative samples.
    pub fn negative_percentile(&self, percent: f32) -> f32 {
        percentile_of_sorted(&self.negatives, percent)
    }
}

/// Linearly interpolated percentile of an ordered slice.
fn percentile_of_sorted(sorted: &[f32], percent: f32) -> f32 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (percent.clamp(0.0, 100.0) / 100.0) * (n - 1) as f32;
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(n - 1);
            let t = rank - lower as f32;
            sorted[lower] + (sorted[upper] - sorted[lower]) * t
        }
    }
}
