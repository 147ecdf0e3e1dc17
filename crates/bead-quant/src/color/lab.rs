//! CIE L*a*b* color space (D65 reference white)
//!
//! Lab is the matching space for bead palettes: Euclidean distance here
//! (the simplified CIE76 Delta E) tracks perceived color difference far
//! better than raw RGB distance.
//!
//! # Pipeline
//!
//! ```text
//! sRGB (u8)  --gamma decode-->  linear RGB  --M (sRGB->XYZ)-->  XYZ
//!            --/ D65 white-->   f(t) nonlinearity  -->  L*, a*, b*
//! ```

use super::rgb::Rgb;

/// D65 reference white.
const XN: f64 = 0.95047;
const YN: f64 = 1.0;
const ZN: f64 = 1.08883;

/// CIE epsilon (216/24389 rounded as in common practice).
const EPSILON: f64 = 0.008856;
/// Slope of the linear segment of the Lab nonlinearity.
const KAPPA_SLOPE: f64 = 7.787;
const OFFSET: f64 = 16.0 / 116.0;

/// A color in CIE L*a*b* space.
///
/// - `l`: lightness, 0 (black) to 100 (white)
/// - `a`: green (negative) to red (positive)
/// - `b`: blue (negative) to yellow (positive)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Simplified Delta E (CIE76) to another Lab color.
    #[inline]
    pub fn delta_e(self, other: Lab) -> f64 {
        delta_e(self, other)
    }
}

impl From<Rgb> for Lab {
    /// Convert an 8-bit sRGB color to Lab.
    ///
    /// # Example
    ///
    /// ```
    /// use bead_quant::{Lab, Rgb};
    ///
    /// let white = Lab::from(Rgb::WHITE);
    /// assert!((white.l - 100.0).abs() < 1e-3);
    /// assert!(white.a.abs() < 1e-3 && white.b.abs() < 1e-3);
    /// ```
    fn from(rgb: Rgb) -> Self {
        let r = srgb_to_linear(rgb.r as f64 / 255.0);
        let g = srgb_to_linear(rgb.g as f64 / 255.0);
        let b = srgb_to_linear(rgb.b as f64 / 255.0);

        let x = (r * 0.4124564 + g * 0.3575761 + b * 0.1804375) / XN;
        let y = (r * 0.2126729 + g * 0.7151522 + b * 0.0721750) / YN;
        let z = (r * 0.0193339 + g * 0.1191920 + b * 0.9503041) / ZN;

        let fx = lab_f(x);
        let fy = lab_f(y);
        let fz = lab_f(z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

/// Convert an 8-bit sRGB color to Lab. Equivalent to `Lab::from(rgb)`.
#[inline]
pub fn to_lab(rgb: Rgb) -> Lab {
    Lab::from(rgb)
}

/// Euclidean distance between two Lab colors (CIE76 Delta E).
///
/// This is deliberately the simple metric, not CIE94 or CIEDE2000.
#[inline]
pub fn delta_e(lab1: Lab, lab2: Lab) -> f64 {
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// Approximate inverse of [`to_lab`].
///
/// Lossy: uses the rounded XYZ->sRGB matrix and clamps to the 8-bit gamut,
/// so `lab_to_approx_rgb(to_lab(c))` is close to `c` but not guaranteed
/// equal. Only used as a fallback when Lab matching is disabled.
pub fn lab_to_approx_rgb(lab: Lab) -> Rgb {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = lab.a / 500.0 + fy;
    let fz = fy - lab.b / 200.0;

    let x = lab_f_inv(fx) * XN;
    let y = lab_f_inv(fy) * YN;
    let z = lab_f_inv(fz) * ZN;

    let r = x * 3.2406 + y * -1.5372 + z * -0.4986;
    let g = x * -0.9689 + y * 1.8758 + z * 0.0415;
    let b = x * 0.0557 + y * -0.2040 + z * 1.0570;

    Rgb::from_f64_clamped(
        linear_to_srgb(r) * 255.0,
        linear_to_srgb(g) * 255.0,
        linear_to_srgb(b) * 255.0,
    )
}

/// IEC 61966-2-1 gamma decode.
#[inline]
fn srgb_to_linear(v: f64) -> f64 {
    if v > 0.04045 {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    }
}

/// IEC 61966-2-1 gamma encode.
#[inline]
fn linear_to_srgb(v: f64) -> f64 {
    if v > 0.0031308 {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    } else {
        12.92 * v
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        KAPPA_SLOPE * t + OFFSET
    }
}

#[inline]
fn lab_f_inv(f: f64) -> f64 {
    let cubed = f * f * f;
    if cubed > EPSILON {
        cubed
    } else {
        (f - OFFSET) / KAPPA_SLOPE
    }
}
