//! Palettes and palette color mapping.
//!
//! A [`Palette`] is an ordered list of control points on the normalized
//! range [-1, 1], each carrying an RGB color. A [`PaletteColorMapping`]
//! says which palette a map uses and how raw data values are normalized
//! onto that range (scaling, thresholding, sign display).

use crate::error::{CiftiError, CiftiResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Name of the palette used when a mapping does not specify one.
pub const DEFAULT_PALETTE_NAME: &str = "ROY-BIG-BL";

/// Lookup of palettes by name.
pub trait PaletteSource {
    fn palette_by_name(&self, name: &str) -> Option<&Palette>;
}

/// Collection of named palettes loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteFile {
    /// Version of the palette schema
    #[serde(default = "default_version")]
    pub version: String,

    /// Palettes keyed by name
    pub palettes: HashMap<String, Palette>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl PaletteFile {
    /// Load palettes from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> CiftiResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file = Self::from_json(&content)?;
        debug!(path = %path.display(), palettes = file.palettes.len(), "Loaded palette file");
        Ok(file)
    }

    /// Parse palettes from a JSON string and validate them.
    pub fn from_json(json: &str) -> CiftiResult<Self> {
        let file: Self = serde_json::from_str(json)?;
        file.validate()?;
        Ok(file)
    }

    /// Get a palette by name.
    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.get(name)
    }

    /// Add or replace a palette, keyed by its own name.
    pub fn insert(&mut self, palette: Palette) {
        self.palettes.insert(palette.name.clone(), palette);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }

    /// Validate every palette in the file.
    pub fn validate(&self) -> CiftiResult<()> {
        for (name, palette) in &self.palettes {
            if *name != palette.name {
                return Err(CiftiError::ValidationError(format!(
                    "{}: palette is stored under a different name ({})",
                    name, palette.name
                )));
            }
            palette
                .validate()
                .map_err(|e| CiftiError::ValidationError(format!("{}: {}", name, e)))?;
        }
        Ok(())
    }

    /// The standard palettes shipped with the library.
    pub fn builtin() -> Self {
        let mut file = Self {
            version: default_version(),
            palettes: HashMap::new(),
        };
        for (name, points) in BUILTIN_PALETTES {
            let points = points
                .iter()
                .map(|(scalar, rgb)| PalettePoint::from_rgb8(*scalar, *rgb))
                .collect();
            file.insert(Palette {
                name: (*name).to_string(),
                points,
            });
        }
        file
    }
}

impl Default for PaletteFile {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PaletteSource for PaletteFile {
    fn palette_by_name(&self, name: &str) -> Option<&Palette> {
        self.get(name)
    }
}

type BuiltinPoints = &'static [(f32, [u8; 3])];

const BUILTIN_PALETTES: &[(&str, BuiltinPoints)] = &[
    (
        "ROY-BIG-BL",
        &[
            (-1.0, [0, 255, 0]),
            (-0.875, [0, 200, 0]),
            (-0.75, [0, 100, 0]),
            (-0.625, [125, 0, 160]),
            (-0.5, [75, 0, 125]),
            (-0.375, [0, 0, 255]),
            (-0.25, [0, 0, 160]),
            (-0.125, [0, 0, 80]),
            (0.0, [0, 0, 0]),
            (0.125, [60, 0, 0]),
            (0.25, [100, 0, 0]),
            (0.375, [150, 0, 0]),
            (0.5, [200, 0, 0]),
            (0.625, [255, 0, 0]),
            (0.75, [255, 120, 0]),
            (0.875, [255, 200, 0]),
            (1.0, [255, 255, 0]),
        ],
    ),
    ("Gray_Interp", &[(-1.0, [0, 0, 0]), (1.0, [255, 255, 255])]),
    (
        "videen_style",
        &[
            (-1.0, [0, 255, 255]),
            (-0.7, [0, 0, 255]),
            (-0.4, [102, 0, 51]),
            (-0.1, [51, 51, 76]),
            (0.0, [0, 0, 0]),
            (0.1, [76, 76, 76]),
            (0.4, [255, 0, 0]),
            (0.7, [255, 105, 0]),
            (1.0, [255, 255, 0]),
        ],
    ),
    (
        "power_surf",
        &[
            (-1.0, [0, 0, 0]),
            (-0.75, [0, 0, 255]),
            (-0.5, [0, 255, 255]),
            (-0.25, [0, 255, 0]),
            (0.0, [255, 255, 255]),
            (0.25, [255, 255, 0]),
            (0.5, [255, 165, 0]),
            (0.75, [255, 0, 0]),
            (1.0, [255, 0, 255]),
        ],
    ),
];

/// A named palette: control points on [-1, 1] in ascending scalar order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub points: Vec<PalettePoint>,
}

impl Palette {
    pub fn new(name: impl Into<String>, points: Vec<PalettePoint>) -> CiftiResult<Self> {
        let palette = Self {
            name: name.into(),
            points,
        };
        palette
            .validate()
            .map_err(|e| CiftiError::ValidationError(format!("{}: {}", palette.name, e)))?;
        Ok(palette)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.points.len() < 2 {
            return Err("Palette must have at least 2 points".to_string());
        }

        for point in &self.points {
            if !(-1.0..=1.0).contains(&point.scalar) {
                return Err(format!("Point scalar {} is outside [-1, 1]", point.scalar));
            }
        }

        for i in 1..self.points.len() {
            if self.points[i].scalar <= self.points[i - 1].scalar {
                return Err("Palette points must be in ascending scalar order".to_string());
            }
        }

        Ok(())
    }

    /// Color for a normalized value in [-1, 1]. Values outside the point
    /// range clamp to the end colors.
    ///
    /// Without interpolation the color of the point at or below the value
    /// is used.
    pub fn color_at(&self, normalized: f32, interpolate: bool) -> [f32; 3] {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return [0.0; 3],
        };

        if normalized <= first.scalar {
            return first.rgb;
        }
        if normalized >= last.scalar {
            return last.rgb;
        }

        for pair in self.points.windows(2) {
            let (low, high) = (&pair[0], &pair[1]);
            if normalized < high.scalar {
                if !interpolate {
                    return low.rgb;
                }
                let t = (normalized - low.scalar) / (high.scalar - low.scalar);
                return lerp_rgb(&low.rgb, &high.rgb, t);
            }
        }

        last.rgb
    }
}

fn lerp_rgb(a: &[f32; 3], b: &[f32; 3], t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] * (1.0 - t) + b[0] * t,
        a[1] * (1.0 - t) + b[1] * t,
        a[2] * (1.0 - t) + b[2] * t,
    ]
}

/// A palette control point. Colors are stored as RGB components in [0, 1]
/// and written to JSON as `[r, g, b]` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPalettePoint", into = "RawPalettePoint")]
pub struct PalettePoint {
    pub scalar: f32,
    pub rgb: [f32; 3],
}

impl PalettePoint {
    pub fn new(scalar: f32, rgb: [f32; 3]) -> Self {
        Self { scalar, rgb }
    }

    pub fn from_rgb8(scalar: f32, rgb: [u8; 3]) -> Self {
        Self {
            scalar,
            rgb: [
                rgb[0] as f32 / 255.0,
                rgb[1] as f32 / 255.0,
                rgb[2] as f32 / 255.0,
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawPalettePoint {
    scalar: f32,
    color: PaletteColor,
}

impl TryFrom<RawPalettePoint> for PalettePoint {
    type Error = String;

    fn try_from(raw: RawPalettePoint) -> Result<Self, Self::Error> {
        Ok(PalettePoint::from_rgb8(raw.scalar, raw.color.to_rgb8()?))
    }
}

impl From<PalettePoint> for RawPalettePoint {
    fn from(point: PalettePoint) -> Self {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        RawPalettePoint {
            scalar: point.scalar,
            color: PaletteColor::Array(vec![byte(point.rgb[0]), byte(point.rgb[1]), byte(point.rgb[2])]),
        }
    }
}

/// Color as written in palette JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteColor {
    /// "#RRGGBB" or a color name
    Text(String),

    /// [r, g, b]
    Array(Vec<u8>),
}

impl PaletteColor {
    pub fn to_rgb8(&self) -> Result<[u8; 3], String> {
        match self {
            PaletteColor::Text(s) if s.starts_with('#') => parse_hex_color(s),
            PaletteColor::Text(s) => named_color(s).ok_or_else(|| format!("Unknown color name '{}'", s)),
            PaletteColor::Array(arr) if arr.len() == 3 => Ok([arr[0], arr[1], arr[2]]),
            PaletteColor::Array(arr) => Err(format!("Color array must have 3 components, got {}", arr.len())),
        }
    }
}

fn parse_hex_color(s: &str) -> Result<[u8; 3], String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("Invalid hex color '{}'", s));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| format!("Invalid hex color '{}'", s))
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

fn named_color(name: &str) -> Option<[u8; 3]> {
    let rgb = match name.to_lowercase().as_str() {
        "black" => [0, 0, 0],
        "white" => [255, 255, 255],
        "red" => [255, 0, 0],
        "green" => [0, 255, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "cyan" => [0, 255, 255],
        "magenta" => [255, 0, 255],
        "orange" => [255, 165, 0],
        "purple" => [128, 0, 128],
        "gray" | "grey" => [128, 128, 128],
        _ => return None,
    };
    Some(rgb)
}

/// How data values are scaled onto the palette.
///
/// Percentages are percentiles of the positive (resp. negative) values of the
/// map; user values are raw data values. Negative values are given with their
/// sign (e.g. `negative_maximum: -100.0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PaletteScaleMode {
    /// Full range: zero to the most positive and most negative value
    AutoScale,

    AutoScalePercentage {
        positive_minimum: f32,
        positive_maximum: f32,
        negative_minimum: f32,
        negative_maximum: f32,
    },

    UserScale {
        positive_minimum: f32,
        positive_maximum: f32,
        negative_minimum: f32,
        negative_maximum: f32,
    },
}

impl Default for PaletteScaleMode {
    fn default() -> Self {
        PaletteScaleMode::AutoScalePercentage {
            positive_minimum: 2.0,
            positive_maximum: 98.0,
            negative_minimum: 2.0,
            negative_maximum: 98.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdType {
    #[default]
    Off,
    Normal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdTest {
    /// Show values below `low` or above `high`
    #[default]
    ShowOutside,
    /// Show values within [`low`, `high`]
    ShowInside,
}

/// Threshold applied to the values used for thresholding (usually the data
/// values themselves).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Threshold {
    pub kind: ThresholdType,
    pub test: ThresholdTest,
    pub low: f32,
    pub high: f32,
}

impl Threshold {
    /// Check whether a value passes the threshold.
    pub fn passes(&self, value: f32) -> bool {
        match (self.kind, self.test) {
            (ThresholdType::Off, _) => true,
            (ThresholdType::Normal, ThresholdTest::ShowOutside) => {
                value < self.low || value > self.high
            }
            (ThresholdType::Normal, ThresholdTest::ShowInside) => {
                value >= self.low && value <= self.high
            }
        }
    }
}

/// How a map's values are colored with a palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteColorMapping {
    selected_palette_name: String,
    scale_mode: PaletteScaleMode,
    interpolate: bool,
    display_positive: bool,
    display_negative: bool,
    display_zero: bool,
    threshold: Threshold,

    #[serde(skip)]
    modified: bool,
}

impl Default for PaletteColorMapping {
    fn default() -> Self {
        Self {
            selected_palette_name: DEFAULT_PALETTE_NAME.to_string(),
            scale_mode: PaletteScaleMode::default(),
            interpolate: true,
            display_positive: true,
            display_negative: true,
            display_zero: false,
            threshold: Threshold::default(),
            modified: false,
        }
    }
}

fn update<T: PartialEq>(field: &mut T, value: T, modified: &mut bool) {
    if *field != value {
        *field = value;
        *modified = true;
    }
}

impl PaletteColorMapping {
    pub fn new(palette_name: impl Into<String>) -> Self {
        Self {
            selected_palette_name: palette_name.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> CiftiResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn selected_palette_name(&self) -> &str {
        &self.selected_palette_name
    }

    pub fn set_selected_palette_name(&mut self, name: impl Into<String>) {
        update(&mut self.selected_palette_name, name.into(), &mut self.modified);
    }

    pub fn scale_mode(&self) -> PaletteScaleMode {
        self.scale_mode
    }

    pub fn set_scale_mode(&mut self, mode: PaletteScaleMode) {
        update(&mut self.scale_mode, mode, &mut self.modified);
    }

    pub fn interpolate(&self) -> bool {
        self.interpolate
    }

    pub fn set_interpolate(&mut self, interpolate: bool) {
        update(&mut self.interpolate, interpolate, &mut self.modified);
    }

    pub fn display_positive(&self) -> bool {
        self.display_positive
    }

    pub fn set_display_positive(&mut self, display: bool) {
        update(&mut self.display_positive, display, &mut self.modified);
    }

    pub fn display_negative(&self) -> bool {
        self.display_negative
    }

    pub fn set_display_negative(&mut self, display: bool) {
        update(&mut self.display_negative, display, &mut self.modified);
    }

    pub fn display_zero(&self) -> bool {
        self.display_zero
    }

    pub fn set_display_zero(&mut self, display: bool) {
        update(&mut self.display_zero, display, &mut self.modified);
    }

    pub fn threshold(&self) -> &Threshold {
        &self.threshold
    }

    pub fn set_threshold(&mut self, threshold: Threshold) {
        update(&mut self.threshold, threshold, &mut self.modified);
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn clear_modified(&mut self) {
        self.modified = false;
    }
}
