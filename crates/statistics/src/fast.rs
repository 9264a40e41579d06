//! Approximate statistics for coloring.

use crate::histogram::Histogram;
use crate::range::RangeFilter;

/// Exact mean, deviation and extremes with bucket-approximated median and
/// sign-specific percentiles.
///
/// Avoids sorting, so an update is linear in the number of samples.
#[derive(Debug, Clone)]
pub struct FastStatistics {
    count: usize,
    mean: f32,
    population_std_dev: f32,
    sample_std_dev: f32,
    minimum: f32,
    maximum: f32,
    all: Histogram,
    positive: Histogram,
    /// Magnitudes of the negative samples
    negative: Histogram,
}

impl FastStatistics {
    pub fn new(number_of_buckets: usize) -> Self {
        Self {
            count: 0,
            mean: 0.0,
            population_std_dev: 0.0,
            sample_std_dev: 0.0,
            minimum: 0.0,
            maximum: 0.0,
            all: Histogram::new(number_of_buckets),
            positive: Histogram::new(number_of_buckets),
            negative: Histogram::new(number_of_buckets),
        }
    }

    pub fn update(&mut self, values: &[f32]) {
        self.update_in_range(values, &RangeFilter::all());
    }

    pub fn update_in_range(&mut self, values: &[f32], filter: &RangeFilter) {
        let mut count = 0usize;
        let mut sum = 0.0f64;
        let mut minimum = f32::INFINITY;
        let mut maximum = f32::NEG_INFINITY;
        let mut positives = Vec::new();
        let mut negatives = Vec::new();

        for v in values.iter().copied().filter(|v| filter.includes(*v)) {
            count += 1;
            sum += v as f64;
            minimum = minimum.min(v);
            maximum = maximum.max(v);
            if v > 0.0 {
                positives.push(v);
            } else if v < 0.0 {
                negatives.push(-v);
            }
        }

        self.count = count;
        if count == 0 {
            self.mean = 0.0;
            self.population_std_dev = 0.0;
            self.sample_std_dev = 0.0;
            self.minimum = 0.0;
            self.maximum = 0.0;
        } else {
            let mean = sum / count as f64;
            let sum_sq: f64 = values
                .iter()
                .copied()
                .filter(|v| filter.includes(*v))
                .map(|v| {
                    let d = v as f64 - mean;
                    d * d
                })
                .sum();
            self.mean = mean as f32;
            self.population_std_dev = (sum_sq / count as f64).sqrt() as f32;
            self.sample_std_dev = if count > 1 {
                (sum_sq / (count - 1) as f64).sqrt() as f32
            } else {
                0.0
            };
            self.minimum = minimum;
            self.maximum = maximum;
        }

        self.all.update_in_range(values, filter);
        self.positive.update(&positives);
        self.negative.update(&negatives);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f32 {
        self.mean
    }

    pub fn population_std_dev(&self) -> f32 {
        self.population_std_dev
    }

    pub fn sample_std_dev(&self) -> f32 {
        self.sample_std_dev
    }

    pub fn min(&self) -> f32 {
        self.minimum
    }

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

    pub fn approximate_median(&self) -> f32 {
        self.all.approximate_percentile(50.0)
    }

    /// See [`DescriptiveStatistics::positive_percentile`](crate::DescriptiveStatistics::positive_percentile).
    pub fn approximate_positive_percentile(&self, percent: f32) -> f32 {
        self.positive.approximate_percentile(percent)
    }

    /// See [`DescriptiveStatistics::negative_percentile`](crate::DescriptiveStatistics::negative_percentile).
    pub fn approximate_negative_percentile(&self, percent: f32) -> f32 {
        -self.negative.approximate_percentile(percent)
    }

    /// Histogram of all included samples.
    pub fn histogram(&self) -> &Histogram {
        &self.all
    }
}

impl Default for FastStatistics {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_moments() {
        let mut stats = FastStatistics::new(100);
        stats.update(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.count(), 8);
        assert_eq!(stats.mean(), 5.0);
        assert_eq!(stats.population_std_dev(), 2.0);
        assert_eq!(stats.min(), 2.0);
        assert_eq!(stats.max(), 9.0);
        assert_eq!(stats.most_negative_value(), 0.0);
    }

    #[test]
    fn test_signed_extremes() {
        let mut stats = FastStatistics::new(10);
        stats.update(&[-3.0, -1.0, 0.0, 2.0]);
        assert_eq!(stats.most_positive_value(), 2.0);
        assert_eq!(stats.most_negative_value(), -3.0);
        assert_eq!(stats.approximate_negative_percentile(100.0), -3.0);
        assert_eq!(stats.approximate_positive_percentile(100.0), 2.0);
    }

    #[test]
    fn test_empty_update_resets() {
        let mut stats = FastStatistics::new(10);
        stats.update(&[1.0, 2.0]);
        stats.update(&[]);
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.approximate_median(), 0.0);
    }
}
