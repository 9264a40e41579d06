//! Equal-width histogram.

use crate::range::RangeFilter;

/// Bucket counts over [min, max] of the included samples.
#[derive(Debug, Clone)]
pub struct Histogram {
    buckets: Vec<u64>,
    min: f32,
    max: f32,
    total: u64,
}

impl Histogram {
    /// Create an empty histogram. At least one bucket is always used.
    pub fn new(number_of_buckets: usize) -> Self {
        Self {
            buckets: vec![0; number_of_buckets.max(1)],
            min: 0.0,
            max: 0.0,
            total: 0,
        }
    }

    pub fn update(&mut self, values: &[f32]) {
        self.update_in_range(values, &RangeFilter::all());
    }

    pub fn update_in_range(&mut self, values: &[f32], filter: &RangeFilter) {
        self.buckets.iter_mut().for_each(|b| *b = 0);
        self.total = 0;
        self.min = 0.0;
        self.max = 0.0;

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for v in values.iter().copied().filter(|v| filter.includes(*v)) {
            min = min.min(v);
            max = max.max(v);
        }
        if min > max {
            return;
        }
        self.min = min;
        self.max = max;

        for v in values.iter().copied().filter(|v| filter.includes(*v)) {
            let bucket = self.bucket_for(v);
            self.buckets[bucket] += 1;
            self.total += 1;
        }
    }

    /// Bucket holding a value, clamped to the first/last bucket.
    pub fn bucket_for(&self, value: f32) -> usize {
        let width = self.bucket_width();
        if width <= 0.0 {
            return 0;
        }
        let index = ((value - self.min) / width).floor();
        if index <= 0.0 {
            0
        } else {
            (index as usize).min(self.buckets.len() - 1)
        }
    }

    pub fn bucket_counts(&self) -> &[u64] {
        &self.buckets
    }

    pub fn number_of_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// (min, max) of the counted samples; (0, 0) when empty.
    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn bucket_width(&self) -> f32 {
        (self.max - self.min) / self.buckets.len() as f32
    }

    pub fn counts_total(&self) -> u64 {
        self.total
    }

    /// Percentile estimated by linear interpolation inside the bucket that
    /// holds the requested rank.
    pub fn approximate_percentile(&self, percent: f32) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        if percent <= 0.0 {
            return self.min;
        }
        if percent >= 100.0 {
            return self.max;
        }
        let target = (percent.clamp(0.0, 100.0) / 100.0) as f64 * self.total as f64;
        let width = self.bucket_width();

        let mut cumulative = 0.0f64;
        for (i, count) in self.buckets.iter().enumerate() {
            let count = *count as f64;
            if count > 0.0 && cumulative + count >= target {
                let fraction = ((target - cumulative) / count) as f32;
                let value = self.min + (i as f32 + fraction) * width;
                return value.clamp(self.min, self.max);
            }
            cumulative += count;
        }
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_range() {
        let mut hist = Histogram::new(4);
        hist.update(&[0.0, 1.0, 2.0, 3.0, 4.0, f32::NAN]);

        assert_eq!(hist.range(), (0.0, 4.0));
        assert_eq!(hist.bucket_width(), 1.0);
        assert_eq!(hist.bucket_counts(), &[1, 1, 1, 2]);
        assert_eq!(hist.counts_total(), 5);
    }

    #[test]
    fn test_constant_values_use_first_bucket() {
        let mut hist = Histogram::new(10);
        hist.update(&[3.0; 7]);
        assert_eq!(hist.bucket_counts()[0], 7);
        assert_eq!(hist.approximate_percentile(50.0), 3.0);
    }

    #[test]
    fn test_empty_histogram() {
        let mut hist = Histogram::new(0);
        hist.update(&[]);
        assert_eq!(hist.number_of_buckets(), 1);
        assert_eq!(hist.counts_total(), 0);
        assert_eq!(hist.approximate_percentile(90.0), 0.0);
    }
}
