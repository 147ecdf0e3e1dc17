//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette construction and updates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// Preset identifier not recognized
    #[error("unknown palette preset: {0}")]
    UnknownPalette(String),
    /// Embedded preset data could not be parsed
    #[error("preset palette {preset} is malformed: {reason}")]
    MalformedPreset {
        preset: &'static str,
        reason: String,
    },
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_error_messages() {
        assert_eq!(PaletteError::EmptyPalette.to_string(), "palette cannot be empty");
        assert_eq!(
            PaletteError::UnknownPalette("hama".into()).to_string(),
            "unknown palette preset: hama"
        );
        assert_eq!(
            PaletteError::from(ParseColorError::InvalidLength).to_string(),
            "invalid color: invalid hex color length (expected 3 or 6 characters)"
        );
    }

    #[test]
    fn test_parse_error_source_chain() {
        use std::error::Error;

        let err: ParseColorError = "zz".parse::<u8>().map(|_| ()).unwrap_err().into();
        assert!(err.source().is_some());
        assert!(ParseColorError::InvalidLength.source().is_none());
    }
}
