//! Label-table coloring of integer-keyed samples.

use cifti_common::LabelTable;

/// Color samples by looking up their value, truncated to an integer, as a label key.
///
/// Samples with no matching label, non-finite samples and every sample when
/// `table` is `None` get (0, 0, 0, 0). Only the first
/// `min(values.len(), rgba_out.len() / 4)` samples are written.
/// Returns the number of samples that matched a label.
pub fn color_indices_with_label_table(
    table: Option<&LabelTable>,
    values: &[f32],
    rgba_out: &mut [f32],
) -> usize {
    let mut matched = 0;
    for (value, rgba) in values.iter().zip(rgba_out.chunks_exact_mut(4)) {
        let label = table.and_then(|t| {
            if value.is_finite() {
                t.label(*value as i32)
            } else {
                None
            }
        });

        match label {
            Some(label) => {
                rgba.copy_from_slice(&label.rgba);
                matched += 1;
            }
            None => rgba.fill(0.0),
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use cifti_common::Label;

    #[test]
    fn test_known_and_unknown_keys() {
        let mut table = LabelTable::new();
        table.set_label(Label::new(5, "five", [0.5, 0.5, 0.5, 1.0]));

        let mut rgba = vec![9.0; 12];
        let matched = color_indices_with_label_table(Some(&table), &[5.0, 6.0, f32::NAN], &mut rgba);

        assert_eq!(matched, 1);
        assert_eq!(&rgba[0..4], &[0.5, 0.5, 0.5, 1.0]);
        assert_eq!(&rgba[4..12], &[0.0; 8]);
    }

    #[test]
    fn test_missing_table_clears() {
        let mut rgba = vec![1.0; 8];
        assert_eq!(color_indices_with_label_table(None, &[1.0, 2.0], &mut rgba), 0);
        assert!(rgba.iter().all(|c| *c == 0.0));
    }
}
