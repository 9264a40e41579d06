//! Tests for palette and label coloring into RGBA buffers.

use cifti_common::{PaletteColorMapping, PaletteScaleMode, Threshold, ThresholdTest, ThresholdType};
use coloring::{color_indices_with_label_table, color_scalars_with_palette};
use statistics::FastStatistics;
use test_utils::{
    assert_coords_approx_eq, label_values, sample_label_table, sample_palette_file,
    signed_ramp_values, SAMPLE_LABEL_COLORS,
};

fn user_scaled_mapping(palette: &str) -> PaletteColorMapping {
    let mut mapping = PaletteColorMapping::new(palette);
    mapping.set_scale_mode(PaletteScaleMode::UserScale {
        positive_minimum: 0.0,
        positive_maximum: 2.0,
        negative_minimum: 0.0,
        negative_maximum: -2.0,
    });
    mapping
}

fn stats_for(values: &[f32]) -> FastStatistics {
    let mut stats = FastStatistics::new(100);
    stats.update(values);
    stats
}

// ============================================================================
// Palette coloring
// ============================================================================

#[test]
fn test_signed_values_use_palette_halves() {
    let palettes = sample_palette_file();
    let palette = palettes.get("sign").unwrap();
    let values = signed_ramp_values(5, 2.0); // -2, -1, 0, 1, 2
    let mapping = user_scaled_mapping("sign");

    let mut rgba = vec![0.0; values.len() * 4];
    let colored =
        color_scalars_with_palette(&stats_for(&values), &mapping, palette, &values, &values, &mut rgba);

    // zero is hidden by default
    assert_eq!(colored, 4);
    assert_coords_approx_eq!(&rgba[0..4], [0.0, 0.0, 1.0, 1.0]);
    assert_coords_approx_eq!(&rgba[4..8], [0.5, 0.5, 1.0, 1.0]);
    assert_coords_approx_eq!(&rgba[8..12], [0.0, 0.0, 0.0, 0.0]);
    assert_coords_approx_eq!(&rgba[12..16], [1.0, 0.5, 0.5, 1.0]);
    assert_coords_approx_eq!(&rgba[16..20], [1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_display_flags_hide_signs() {
    let palettes = sample_palette_file();
    let palette = palettes.get("sign").unwrap();
    let values = signed_ramp_values(5, 2.0);

    let mut mapping = user_scaled_mapping("sign");
    mapping.set_display_negative(false);
    mapping.set_display_zero(true);

    let mut rgba = vec![0.0; values.len() * 4];
    let colored =
        color_scalars_with_palette(&stats_for(&values), &mapping, palette, &values, &values, &mut rgba);

    assert_eq!(colored, 3);
    assert_eq!(rgba[3], 0.0);
    assert_eq!(rgba[7], 0.0);
    // zero maps to the palette center (white)
    assert_coords_approx_eq!(&rgba[8..12], [1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn test_threshold_hides_values_inside_band() {
    let palettes = sample_palette_file();
    let palette = palettes.get("red_blue").unwrap();
    let values = signed_ramp_values(5, 2.0);

    let mut mapping = user_scaled_mapping("red_blue");
    mapping.set_threshold(Threshold {
        kind: ThresholdType::Normal,
        test: ThresholdTest::ShowOutside,
        low: -1.5,
        high: 1.5,
    });

    let mut rgba = vec![0.0; values.len() * 4];
    let colored =
        color_scalars_with_palette(&stats_for(&values), &mapping, palette, &values, &values, &mut rgba);

    assert_eq!(colored, 2);
    assert_eq!(rgba[3], 1.0);
    assert_eq!(rgba[7], 0.0);
    assert_eq!(rgba[15], 0.0);
    assert_eq!(rgba[19], 1.0);
}

#[test]
fn test_short_output_buffer_is_not_overrun() {
    let palettes = sample_palette_file();
    let palette = palettes.get("red_blue").unwrap();
    let values = signed_ramp_values(9, 1.0);
    let mapping = user_scaled_mapping("red_blue");

    let mut rgba = vec![0.0; 8];
    let colored =
        color_scalars_with_palette(&stats_for(&values), &mapping, palette, &values, &values, &mut rgba);

    assert!(colored <= 2);
    assert_eq!(rgba.len(), 8);
}

// ============================================================================
// Label coloring
// ============================================================================

#[test]
fn test_label_values_take_table_colors() {
    let table = sample_label_table();
    let values = label_values(4, &[1, 2, 3, 99]);

    let mut rgba = vec![0.5; 16];
    let matched = color_indices_with_label_table(Some(&table), &values, &mut rgba);

    assert_eq!(matched, 3);
    for (i, (_, color)) in SAMPLE_LABEL_COLORS.iter().enumerate() {
        assert_coords_approx_eq!(&rgba[i * 4..i * 4 + 4], color);
    }
    assert_coords_approx_eq!(&rgba[12..16], [0.0, 0.0, 0.0, 0.0]);
}
