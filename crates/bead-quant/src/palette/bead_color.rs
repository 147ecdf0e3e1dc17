//! A single named bead color.

use serde::{Deserialize, Serialize};

use super::error::ParseColorError;
use crate::color::Rgb;

/// Brand recorded for colors created ad hoc from a raw RGB value.
pub const CUSTOM_BRAND: &str = "custom";

/// A named bead color as sold by a bead manufacturer.
///
/// The `name` (the manufacturer's color code) is the identity key inside a
/// [`Palette`](super::Palette). Values are immutable once placed in a
/// palette; updating a color means replacing it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeadColor {
    /// Color code, e.g. `"A1"`
    pub name: String,
    /// `#RRGGBB` representation of `rgb`
    pub hex: String,
    pub rgb: Rgb,
    /// Manufacturer name
    pub brand: String,
}

impl BeadColor {
    /// Create a bead color; `hex` is derived from `rgb`.
    pub fn new(name: impl Into<String>, rgb: Rgb, brand: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: rgb.to_hex(),
            rgb,
            brand: brand.into(),
        }
    }

    /// Create a bead color from a hex string.
    ///
    /// # Example
    /// ```
    /// use bead_quant::{BeadColor, Rgb};
    ///
    /// let red = BeadColor::from_hex("RED", "#ff0000", "test").unwrap();
    /// assert_eq!(red.rgb, Rgb::new(255, 0, 0));
    /// assert_eq!(red.hex, "#FF0000");
    /// ```
    pub fn from_hex(
        name: impl Into<String>,
        hex: &str,
        brand: impl Into<String>,
    ) -> Result<Self, ParseColorError> {
        let rgb: Rgb = hex.parse()?;
        Ok(Self::new(name, rgb, brand))
    }

    /// An unnamed color: the name is the hex code and the brand is
    /// [`CUSTOM_BRAND`]. Used by paint tools when the active color did not
    /// come from a palette.
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self::new(rgb.to_hex(), rgb, CUSTOM_BRAND)
    }
}
