//! 8-bit RGB and RGBA color types
//!
//! Bead palettes and decoded images are both specified in 8-bit sRGB,
//! so these types keep the raw channel values rather than normalized floats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::palette::ParseColorError;

/// Perceptual channel weights for RGB distance (luminance sensitivity).
const WEIGHT_R: f64 = 0.30;
const WEIGHT_G: f64 = 0.59;
const WEIGHT_B: f64 = 0.11;

/// An opaque 8-bit sRGB color.
///
/// Serializes as `{"r": .., "g": .., "b": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an Rgb color from a byte array [R, G, B].
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Format as an uppercase `#RRGGBB` string.
    ///
    /// # Example
    /// ```
    /// use bead_quant::Rgb;
    /// assert_eq!(Rgb::new(255, 128, 0).to_hex(), "#FF8000");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Build a color from float channels, rounding and clamping each to 0..=255.
    #[inline]
    pub(crate) fn from_f64_clamped(r: f64, g: f64, b: f64) -> Self {
        let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Self::new(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`. Parsing is
    /// case-insensitive and leading/trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use bead_quant::Rgb;
    ///
    /// let white: Rgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Rgb::WHITE);
    ///
    /// let red: Rgb = "#f00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

/// An 8-bit sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The color channels without alpha.
    #[inline]
    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Alpha-composite this color over an opaque background.
    ///
    /// Each channel becomes `src * alpha + bg * (1 - alpha)` with
    /// `alpha = a / 255`, rounded to the nearest integer.
    ///
    /// # Example
    /// ```
    /// use bead_quant::{Rgb, Rgba};
    ///
    /// let transparent = Rgba::new(255, 0, 0, 0);
    /// assert_eq!(transparent.composite_over(Rgb::WHITE), Rgb::WHITE);
    /// ```
    pub fn composite_over(self, background: Rgb) -> Rgb {
        let alpha = self.a as f64 / 255.0;
        let blend = |src: u8, bg: u8| src as f64 * alpha + bg as f64 * (1.0 - alpha);
        Rgb::from_f64_clamped(
            blend(self.r, background.r),
            blend(self.g, background.g),
            blend(self.b, background.b),
        )
    }
}

/// Plain Euclidean distance between two colors in RGB space.
#[inline]
pub fn rgb_distance(c1: Rgb, c2: Rgb) -> f64 {
    let dr = c1.r as f64 - c2.r as f64;
    let dg = c1.g as f64 - c2.g as f64;
    let db = c1.b as f64 - c2.b as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Perceptually weighted Euclidean distance in RGB space.
///
/// Channels are weighted 0.30/0.59/0.11 (R/G/B) to approximate the eye's
/// luminance sensitivity: green differences count most, blue least.
#[inline]
pub fn weighted_rgb_distance(c1: Rgb, c2: Rgb) -> f64 {
    let dr = c1.r as f64 - c2.r as f64;
    let dg = c1.g as f64 - c2.g as f64;
    let db = c1.b as f64 - c2.b as f64;
    (WEIGHT_R * dr * dr + WEIGHT_G * dg * dg + WEIGHT_B * db * db).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing_6digit() {
        assert_eq!("#FFFFFF".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!("#000000".parse::<Rgb>().unwrap(), Rgb::BLACK);
        assert_eq!("FF0000".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!("#1a2B3c".parse::<Rgb>().unwrap(), Rgb::new(0x1A, 0x2B, 0x3C));
    }

    #[test]
    fn test_hex_parsing_shorthand() {
        assert_eq!("#ABC".parse::<Rgb>().unwrap(), Rgb::new(0xAA, 0xBB, 0xCC));
        assert_eq!("  #f00  ".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert!(matches!(
            "#GGG".parse::<Rgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert!(matches!(
            "#FFFF".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength)
        ));
        assert!(matches!("".parse::<Rgb>(), Err(ParseColorError::InvalidLength)));
        assert!(matches!("#".parse::<Rgb>(), Err(ParseColorError::InvalidLength)));
        assert!(matches!("#ÄÄ".parse::<Rgb>(), Err(ParseColorError::InvalidLength)));
    }

    #[test]
    fn test_to_hex_round_trip() {
        let color = Rgb::new(18, 52, 86);
        assert_eq!(color.to_hex(), "#123456");
        assert_eq!(color.to_hex().parse::<Rgb>().unwrap(), color);
        assert_eq!(color.to_string(), "#123456");
    }

    #[test]
    fn test_composite_over_background() {
        let opaque = Rgba::new(10, 20, 30, 255);
        assert_eq!(opaque.composite_over(Rgb::WHITE), Rgb::new(10, 20, 30));

        let transparent = Rgba::new(10, 20, 30, 0);
        assert_eq!(transparent.composite_over(Rgb::new(1, 2, 3)), Rgb::new(1, 2, 3));

        // 50% black over white lands on mid grey
        let half = Rgba::new(0, 0, 0, 128);
        let blended = half.composite_over(Rgb::WHITE);
        assert_eq!(blended, Rgb::new(127, 127, 127));
    }

    #[test]
    fn test_weighted_distance_prefers_green_sensitivity() {
        let base = Rgb::new(100, 100, 100);
        let green_shift = Rgb::new(100, 150, 100);
        let blue_shift = Rgb::new(100, 100, 150);
        assert!(weighted_rgb_distance(base, green_shift) > weighted_rgb_distance(base, blue_shift));
        assert_eq!(weighted_rgb_distance(base, base), 0.0);
    }

    #[test]
    fn test_plain_distance() {
        assert_eq!(rgb_distance(Rgb::new(0, 0, 0), Rgb::new(3, 4, 0)), 5.0);
    }
}
