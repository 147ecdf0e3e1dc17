//! Conversion options.

use crate::color::Rgb;

/// Configuration for [`Converter`](super::Converter).
///
/// # Defaults
///
/// - Dither: off
/// - Brightness: 1.0 (no change)
/// - Contrast: 1.0 (no change)
/// - Background: white
/// - Lab matching: on
///
/// Out-of-range brightness and contrast values are not rejected. They are
/// used as given and may produce extreme, but well-defined, output.
///
/// # Example
///
/// ```
/// use bead_quant::{ConvertOptions, Rgb};
///
/// let options = ConvertOptions::new()
///     .dither(true)
///     .brightness(1.2)
///     .background(Rgb::BLACK);
/// assert!(options.dither);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Add a coordinate-derived offset to each pixel before matching.
    pub dither: bool,

    /// Brightness factor.
    ///
    /// - 1.0 = no change
    /// - above 1.0 blends each channel toward 255 by `brightness - 1`
    /// - below 1.0 scales each channel toward 0
    pub brightness: f64,

    /// Contrast factor around the 128 midpoint.
    ///
    /// - 1.0 = no change
    /// - 0.0 = every channel collapses to 128
    pub contrast: f64,

    /// Color that translucent pixels are composited over.
    pub background: Rgb,

    /// Match in Lab space (Delta E) instead of weighted RGB.
    pub use_lab: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            dither: false,
            brightness: 1.0,
            contrast: 1.0,
            background: Rgb::WHITE,
            use_lab: true,
        }
    }
}

impl ConvertOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn dither(mut self, enabled: bool) -> Self {
        self.dither = enabled;
        self
    }

    #[inline]
    pub fn brightness(mut self, factor: f64) -> Self {
        self.brightness = factor;
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f64) -> Self {
        self.contrast = factor;
        self
    }

    #[inline]
    pub fn background(mut self, color: Rgb) -> Self {
        self.background = color;
        self
    }

    #[inline]
    pub fn use_lab(mut self, enabled: bool) -> Self {
        self.use_lab = enabled;
        self
    }
}
