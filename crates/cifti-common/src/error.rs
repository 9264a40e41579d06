//! Error types for palette, label table and metadata configuration.

use thiserror::Error;

/// Result type alias using CiftiError.
pub type CiftiResult<T> = Result<T, CiftiError>;

/// Errors raised while loading or validating shared configuration
/// (palettes, label tables, palette color mappings).
#[derive(Debug, Error)]
pub enum CiftiError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Palette not found: {0}")]
    PaletteNotFound(String),
}

impl From<std::io::Error> for CiftiError {
    fn from(err: std::io::Error) -> Self {
        CiftiError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for CiftiError {
    fn from(err: serde_json::Error) -> Self {
        CiftiError::ParseError(format!("JSON error: {}", err))
    }
}
