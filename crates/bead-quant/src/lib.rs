// `palette::palette` mirrors the public type name
#![allow(clippy::module_inception)]

//! bead-quant: perceptual color matching for bead patterns
//!
//! This library maps arbitrary RGBA images onto a finite palette of named
//! bead colors, the first half of turning a picture into a bead pattern.
//!
//! # Quick Start
//!
//! ```
//! use bead_quant::{ConvertOptions, Converter, Palette, PixelBuffer, PresetPalette, Rgba};
//!
//! let palette = Palette::preset(PresetPalette::Mard).unwrap();
//! let converter = Converter::new(&palette, ConvertOptions::default()).unwrap();
//!
//! let pixels = PixelBuffer::filled(4, 4, Rgba::new(255, 255, 255, 255)).unwrap();
//! let image = converter.convert(&pixels);
//!
//! assert_eq!(image.width(), 4);
//! assert_eq!(image.color_at(0, 0).unwrap().hex, "#FFFFFF");
//! ```
//!
//! # Modules
//!
//! - [`color`]: 8-bit [`Rgb`]/[`Rgba`], CIE [`Lab`], Delta E and RGB distances
//! - [`palette`]: [`BeadColor`], [`Palette`] and the built-in presets
//! - [`matcher`]: [`ColorMatcher`], nearest and top-k search
//! - [`convert`]: [`Converter`] and its input/output types
//!
//! # Color Matching
//!
//! Matching defaults to CIE76 Delta E in Lab space (D65 white). Euclidean
//! distance in sRGB overweights blue and underweights green differences;
//! Lab distances track perceived difference closely enough for bead
//! palettes, whose colors are far apart. A weighted RGB metric
//! (0.30/0.59/0.11) is available for callers that disable Lab matching.
//!
//! All matching is deterministic: ties go to the color listed first in the
//! palette.

pub mod color;
pub mod convert;
pub mod error;
pub mod matcher;
pub mod palette;

pub use color::{
    delta_e, lab_to_approx_rgb, rgb_distance, to_lab, weighted_rgb_distance, Lab, Rgb, Rgba,
};
pub use convert::{ConvertOptions, Converter, PixelBuffer, PixelSample, QuantizedImage};
pub use error::QuantError;
pub use matcher::ColorMatcher;
pub use palette::{
    BeadColor, Palette, PaletteError, PaletteKind, PaletteSnapshot, PaletteSource,
    ParseColorError, PresetPalette, CUSTOM_BRAND,
};
