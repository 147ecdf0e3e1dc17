//! Image to bead-grid conversion.
//!
//! The [`Converter`] consumes a validated [`PixelBuffer`] (interleaved RGBA8,
//! as produced by any decoder) and yields a [`QuantizedImage`] holding one
//! palette index per pixel. Decoding, resizing and encoding are left to the
//! caller.

mod buffer;
mod converter;
mod image;
mod options;

pub use buffer::{PixelBuffer, PixelSample};
pub use converter::Converter;
pub use image::QuantizedImage;
pub use options::ConvertOptions;
