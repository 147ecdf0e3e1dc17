//! Per-pixel image to palette conversion.

use crate::color::{Rgb, Rgba};
use crate::error::QuantError;
use crate::matcher::ColorMatcher;
use crate::palette::{BeadColor, Palette};

use super::buffer::{validate, PixelBuffer};
use super::image::QuantizedImage;
use super::options::ConvertOptions;

/// Converts RGBA pixels to the nearest colors of a palette.
///
/// Each pixel goes through:
///
/// 1. Alpha compositing over [`ConvertOptions::background`]
/// 2. Brightness then contrast adjustment, rounded and clamped once
/// 3. Optional coordinate-derived dither offset, clamped
/// 4. Nearest-color matching via [`ColorMatcher`]
///
/// The dither step is a fixed perturbation of `((x*7)%5 - 2, (y*3)%5 - 2, 0)`
/// added to R and G. It breaks up flat regions deterministically; it is not
/// error diffusion.
///
/// # Example
///
/// ```
/// use bead_quant::{BeadColor, ConvertOptions, Converter, Palette, PixelBuffer, Rgb, Rgba};
///
/// let palette = Palette::new(vec![
///     BeadColor::new("WHITE", Rgb::WHITE, "test"),
///     BeadColor::new("RED", Rgb::new(255, 0, 0), "test"),
/// ]).unwrap();
///
/// let converter = Converter::new(&palette, ConvertOptions::default()).unwrap();
/// let pixels = PixelBuffer::filled(2, 2, Rgba::new(255, 0, 0, 255)).unwrap();
/// let image = converter.convert(&pixels);
///
/// assert!(image.cells().all(|(_, _, c)| c.name == "RED"));
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    palette: Palette,
    matcher: ColorMatcher,
    options: ConvertOptions,
}

impl Converter {
    pub fn new(palette: &Palette, options: ConvertOptions) -> Result<Self, QuantError> {
        let matcher = ColorMatcher::new(palette, options.use_lab)?;
        Ok(Self {
            palette: palette.clone(),
            matcher,
            options,
        })
    }

    #[inline]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn matcher(&self) -> &ColorMatcher {
        &self.matcher
    }

    /// Convert a validated pixel buffer.
    pub fn convert(&self, pixels: &PixelBuffer) -> QuantizedImage {
        self.convert_unchecked(pixels.data(), pixels.width(), pixels.height())
    }

    /// Convert raw interleaved RGBA8 bytes.
    ///
    /// Fails with [`QuantError::InvalidImage`] on zero dimensions or a
    /// buffer whose length is not `width * height * 4`.
    pub fn convert_rgba(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<QuantizedImage, QuantError> {
        validate(data.len(), width, height)?;
        Ok(self.convert_unchecked(data, width, height))
    }

    fn convert_unchecked(&self, data: &[u8], width: u32, height: u32) -> QuantizedImage {
        let opts = &self.options;
        tracing::debug!(
            width,
            height,
            colors = self.palette.len(),
            dither = opts.dither,
            use_lab = opts.use_lab,
            "Converting image"
        );

        let indices = data
            .chunks_exact(4)
            .enumerate()
            .map(|(i, px)| {
                let x = i as u32 % width;
                let y = i as u32 / width;
                let blended = Rgba::new(px[0], px[1], px[2], px[3]).composite_over(opts.background);
                let mut target = adjust(blended, opts.brightness, opts.contrast);
                if opts.dither {
                    target = dither_offset(target, x, y);
                }
                self.matcher.closest_index(target)
            })
            .collect();

        QuantizedImage::new(indices, width, height, self.palette.clone())
    }

    /// Match a single color after applying a brightness/contrast adjustment.
    pub fn closest_adjusted(&self, rgb: Rgb, brightness: f64, contrast: f64) -> &BeadColor {
        self.matcher.closest(adjust(rgb, brightness, contrast))
    }
}

/// Brightness then contrast about 128, rounded and clamped once at the end.
fn adjust(rgb: Rgb, brightness: f64, contrast: f64) -> Rgb {
    let apply = |v: u8| {
        let v = v as f64;
        let vb = if brightness >= 1.0 {
            v + (255.0 - v) * (brightness - 1.0)
        } else {
            v * brightness
        };
        128.0 + (vb - 128.0) * contrast
    };
    Rgb::from_f64_clamped(apply(rgb.r), apply(rgb.g), apply(rgb.b))
}

fn dither_offset(rgb: Rgb, x: u32, y: u32) -> Rgb {
    let rx = ((x as i64 * 7) % 5 - 2) as f64;
    let ry = ((y as i64 * 3) % 5 - 2) as f64;
    Rgb::from_f64_clamped(rgb.r as f64 + rx, rgb.g as f64 + ry, rgb.b as f64)
}
