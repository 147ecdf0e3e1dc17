//! Unified error type for the bead-quant public API.
//!
//! [`QuantError`] wraps all error types from the crate into a single enum
//! for convenient `?` propagation in application code.

use thiserror::Error;

use crate::palette::{PaletteError, ParseColorError};

/// Unified error type for the bead-quant public API.
///
/// # Example
///
/// ```
/// use bead_quant::{Palette, QuantError};
///
/// fn load(id: &str) -> Result<Palette, QuantError> {
///     Ok(Palette::from_preset_id(id)?)
/// }
///
/// assert!(load("mard").is_ok());
/// assert!(matches!(load("hama"), Err(QuantError::Palette(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantError {
    /// Palette validation error (empty, unknown preset, malformed preset)
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
    /// Color parsing error (invalid hex string)
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
    /// Pixel buffer with zero size or a length that does not match its dimensions
    #[error("invalid image: {reason}")]
    InvalidImage { reason: String },
}
