//! Palette types and utilities
//!
//! This module provides named bead colors, the [`Palette`] registry built
//! from them, the built-in presets, and the error types for parsing and
//! validation.

mod bead_color;
mod error;
mod palette;
mod presets;

pub use bead_color::{BeadColor, CUSTOM_BRAND};
pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, PaletteKind, PaletteSnapshot, PaletteSource};
pub use presets::PresetPalette;
