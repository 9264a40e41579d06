//! Palette coloring of scalar samples.

use cifti_common::{Palette, PaletteColorMapping, PaletteScaleMode};
use statistics::FastStatistics;

/// Data values mapped to the ends of the positive and negative palette halves.
///
/// Negative bounds carry their sign; `negative_minimum` is the one closer
/// to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    pub positive_minimum: f32,
    pub positive_maximum: f32,
    pub negative_minimum: f32,
    pub negative_maximum: f32,
}

impl ScaleRange {
    /// Resolve the mapping's scale mode against the map's statistics.
    pub fn resolve(mapping: &PaletteColorMapping, stats: &FastStatistics) -> Self {
        match mapping.scale_mode() {
            PaletteScaleMode::AutoScale => Self {
                positive_minimum: 0.0,
                positive_maximum: stats.most_positive_value(),
                negative_minimum: 0.0,
                negative_maximum: stats.most_negative_value(),
            },
            PaletteScaleMode::AutoScalePercentage {
                positive_minimum,
                positive_maximum,
                negative_minimum,
                negative_maximum,
            } => Self {
                positive_minimum: stats.approximate_positive_percentile(positive_minimum),
                positive_maximum: stats.approximate_positive_percentile(positive_maximum),
                negative_minimum: stats.approximate_negative_percentile(negative_minimum),
                negative_maximum: stats.approximate_negative_percentile(negative_maximum),
            },
            PaletteScaleMode::UserScale {
                positive_minimum,
                positive_maximum,
                negative_minimum,
                negative_maximum,
            } => Self {
                positive_minimum,
                positive_maximum,
                negative_minimum,
                negative_maximum,
            },
        }
    }

    /// Position of a positive value on [0, 1], or `None` below the minimum.
    fn normalize_positive(&self, value: f32) -> Option<f32> {
        if value < self.positive_minimum {
            return None;
        }
        let span = self.positive_maximum - self.positive_minimum;
        if span <= 0.0 {
            return Some(1.0);
        }
        Some(((value - self.positive_minimum) / span).clamp(0.0, 1.0))
    }

    /// Position of a negative value on [-1, 0], or `None` above the minimum.
    fn normalize_negative(&self, value: f32) -> Option<f32> {
        if value > self.negative_minimum {
            return None;
        }
        let span = self.negative_minimum - self.negative_maximum;
        if span <= 0.0 {
            return Some(-1.0);
        }
        Some(((value - self.negative_minimum) / span).clamp(-1.0, 0.0))
    }
}

/// Color `values` with a palette, writing RGBA into `rgba_out`.
///
/// `threshold_values` are tested against the mapping's threshold; pass the
/// values themselves when thresholding by the data being colored. Only the
/// first `min(values.len(), rgba_out.len() / 4)` samples are written.
/// Returns the number of samples given a visible color.
pub fn color_scalars_with_palette(
    stats: &FastStatistics,
    mapping: &PaletteColorMapping,
    palette: &Palette,
    values: &[f32],
    threshold_values: &[f32],
    rgba_out: &mut [f32],
) -> usize {
    let range = ScaleRange::resolve(mapping, stats);
    let threshold = mapping.threshold();
    let interpolate = mapping.interpolate();

    let mut colored = 0;
    for (i, (value, rgba)) in values.iter().zip(rgba_out.chunks_exact_mut(4)).enumerate() {
        rgba.fill(0.0);

        let value = *value;
        if !value.is_finite() {
            continue;
        }

        let threshold_value = threshold_values.get(i).copied().unwrap_or(value);
        if !threshold.passes(threshold_value) {
            continue;
        }

        let normalized = if value > 0.0 {
            if !mapping.display_positive() {
                continue;
            }
            range.normalize_positive(value)
        } else if value < 0.0 {
            if !mapping.display_negative() {
                continue;
            }
            range.normalize_negative(value)
        } else if mapping.display_zero() {
            Some(0.0)
        } else {
            None
        };

        if let Some(normalized) = normalized {
            let rgb = palette.color_at(normalized, interpolate);
            rgba.copy_from_slice(&[rgb[0], rgb[1], rgb[2], 1.0]);
            colored += 1;
        }
    }
    colored
}
