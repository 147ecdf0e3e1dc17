//! PNG input and preview output around the conversion core

pub mod input;
pub mod preview;

pub use input::{decode_png, fit_dimensions, resize_nearest};
pub use preview::{encode_png, render_preview, RgbaRaster};
