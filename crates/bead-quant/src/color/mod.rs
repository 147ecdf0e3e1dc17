//! Color types and conversion utilities
//!
//! This module provides the 8-bit [`Rgb`]/[`Rgba`] types used for pixels and
//! bead colors, and the CIE [`Lab`] space used for perceptual matching.
//!
//! # Example
//!
//! ```
//! use bead_quant::{delta_e, Lab, Rgb};
//!
//! let red = Rgb::new(255, 0, 0);
//! let lab = Lab::from(red);
//! assert_eq!(delta_e(lab, lab), 0.0);
//! ```

mod lab;
mod rgb;

pub use lab::{delta_e, lab_to_approx_rgb, to_lab, Lab};
pub use rgb::{rgb_distance, weighted_rgb_distance, Rgb, Rgba};
