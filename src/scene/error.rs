//! Error types for scene composition.
//!
//! This module defines the error type used throughout the scene module.
//! Errors are categorized by source: palette loading, style parameter
//! resolution, and scene document serialization.

use thiserror::Error;

use crate::model::structure::StructureError;

/// Errors that can occur while composing a scene.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a palette file.
    #[error("failed to read palette file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a palette TOML override file.
    #[error("failed to parse palette TOML: {0}")]
    PaletteToml(#[from] toml::de::Error),

    /// Malformed entry in a palette table.
    #[error("malformed palette entry at line {line}: {detail}")]
    PaletteParse {
        /// 1-based line number in the palette source.
        line: usize,
        /// Description of the problem.
        detail: String,
    },

    /// Palette file extension not recognized.
    #[error("unsupported palette format '{0}' (expected .ini, .csv or .toml)")]
    UnsupportedPalette(String),

    /// A style was given a parameter it does not accept.
    #[error("style '{style}' does not accept parameter '{parameter}'")]
    UnknownParameter {
        /// The style name.
        style: &'static str,
        /// The offending parameter name.
        parameter: &'static str,
    },

    /// A parameter value is out of its valid range.
    #[error("invalid value for parameter '{parameter}': {detail}")]
    InvalidParameter {
        /// The parameter name.
        parameter: &'static str,
        /// Description of the problem.
        detail: String,
    },

    /// The input structure contains no atoms.
    #[error("input structure is empty: at least one atom is required")]
    EmptyStructure,

    /// An animation style needs more than one frame.
    #[error("animation style requires a trajectory with at least 2 frames")]
    NotEnoughFrames,

    /// A style was fed the wrong kind of input.
    #[error("style '{style}' requires {expected}")]
    SourceMismatch {
        /// The style name.
        style: &'static str,
        /// What the style needs, e.g. "a single structure".
        expected: &'static str,
    },

    /// Structure indexing or trajectory validation failed.
    #[error(transparent)]
    Structure(#[from] StructureError),

    /// Scene document serialization failed.
    #[error("failed to serialize scene document: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a [`PaletteParse`](Error::PaletteParse) error.
    pub fn palette_parse(line: usize, detail: impl Into<String>) -> Self {
        Self::PaletteParse { line, detail: detail.into() }
    }

    /// Creates an [`InvalidParameter`](Error::InvalidParameter) error.
    pub fn invalid_parameter(parameter: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidParameter { parameter, detail: detail.into() }
    }
}
