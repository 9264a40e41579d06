//! Anatomical structures that surface and volume brainordinates belong to.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Structure {
    CortexLeft,
    CortexRight,
    Cerebellum,
    AccumbensLeft,
    AccumbensRight,
    AmygdalaLeft,
    AmygdalaRight,
    BrainStem,
    CaudateLeft,
    CaudateRight,
    CerebellumLeft,
    CerebellumRight,
    DiencephalonVentralLeft,
    DiencephalonVentralRight,
    HippocampusLeft,
    HippocampusRight,
    PallidumLeft,
    PallidumRight,
    PutamenLeft,
    PutamenRight,
    ThalamusLeft,
    ThalamusRight,
    Other,
}

const ALL_STRUCTURES: [Structure; 23] = [
    Structure::CortexLeft,
    Structure::CortexRight,
    Structure::Cerebellum,
    Structure::AccumbensLeft,
    Structure::AccumbensRight,
    Structure::AmygdalaLeft,
    Structure::AmygdalaRight,
    Structure::BrainStem,
    Structure::CaudateLeft,
    Structure::CaudateRight,
    Structure::CerebellumLeft,
    Structure::CerebellumRight,
    Structure::DiencephalonVentralLeft,
    Structure::DiencephalonVentralRight,
    Structure::HippocampusLeft,
    Structure::HippocampusRight,
    Structure::PallidumLeft,
    Structure::PallidumRight,
    Structure::PutamenLeft,
    Structure::PutamenRight,
    Structure::ThalamusLeft,
    Structure::ThalamusRight,
    Structure::Other,
];

impl Structure {
    /// Every known structure, in declaration order.
    pub fn all() -> &'static [Structure] {
        &ALL_STRUCTURES
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Structure::CortexLeft => "CORTEX_LEFT",
            Structure::CortexRight => "CORTEX_RIGHT",
            Structure::Cerebellum => "CEREBELLUM",
            Structure::AccumbensLeft => "ACCUMBENS_LEFT",
            Structure::AccumbensRight => "ACCUMBENS_RIGHT",
            Structure::AmygdalaLeft => "AMYGDALA_LEFT",
            Structure::AmygdalaRight => "AMYGDALA_RIGHT",
            Structure::BrainStem => "BRAIN_STEM",
            Structure::CaudateLeft => "CAUDATE_LEFT",
            Structure::CaudateRight => "CAUDATE_RIGHT",
            Structure::CerebellumLeft => "CEREBELLUM_LEFT",
            Structure::CerebellumRight => "CEREBELLUM_RIGHT",
            Structure::DiencephalonVentralLeft => "DIENCEPHALON_VENTRAL_LEFT",
            Structure::DiencephalonVentralRight => "DIENCEPHALON_VENTRAL_RIGHT",
            Structure::HippocampusLeft => "HIPPOCAMPUS_LEFT",
            Structure::HippocampusRight => "HIPPOCAMPUS_RIGHT",
            Structure::PallidumLeft => "PALLIDUM_LEFT",
            Structure::PallidumRight => "PALLIDUM_RIGHT",
            Structure::PutamenLeft => "PUTAMEN_LEFT",
            Structure::PutamenRight => "PUTAMEN_RIGHT",
            Structure::ThalamusLeft => "THALAMUS_LEFT",
            Structure::ThalamusRight => "THALAMUS_RIGHT",
            Structure::Other => "OTHER",
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
