//! Common test fixtures: palettes and label tables.

use cifti_common::{Label, LabelTable, PaletteFile};
use std::io::Write;
use tempfile::NamedTempFile;

/// Palette JSON with one two-color palette and one three-point palette.
pub const SAMPLE_PALETTES_JSON: &str = r##"{
    "version": "1.0",
    "palettes": {
        "red_blue": {
            "name": "red_blue",
            "points": [
                {"scalar": -1.0, "color": "#0000FF"},
                {"scalar": 1.0, "color": "#FF0000"}
            ]
        },
        "sign": {
            "name": "sign",
            "points": [
                {"scalar": -1.0, "color": "blue"},
                {"scalar": 0.0, "color": "white"},
                {"scalar": 1.0, "color": "red"}
            ]
        }
    }
}"##;

/// Parsed form of [`SAMPLE_PALETTES_JSON`].
pub fn sample_palette_file() -> PaletteFile {
    PaletteFile::from_json(SAMPLE_PALETTES_JSON).expect("sample palettes are valid")
}

/// [`SAMPLE_PALETTES_JSON`] written to a temporary file.
pub fn temp_palette_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(SAMPLE_PALETTES_JSON.as_bytes())
        .expect("write temp palette file");
    file
}

/// Colors of [`sample_label_table`], by key.
pub const SAMPLE_LABEL_COLORS: [(i32, [f32; 4]); 3] = [
    (1, [1.0, 0.0, 0.0, 1.0]),
    (2, [0.0, 1.0, 0.0, 1.0]),
    (3, [0.0, 0.0, 1.0, 1.0]),
];

/// Unassigned label plus keys 1 (red), 2 (green) and 3 (blue), not marked modified.
pub fn sample_label_table() -> LabelTable {
    let mut table = LabelTable::with_unassigned();
    let names = ["V1", "V2", "MT"];
    for ((key, rgba), name) in SAMPLE_LABEL_COLORS.iter().zip(names) {
        table.set_label(Label::new(*key, name, *rgba));
    }
    table.clear_modified();
    table
}
