//! Validated RGBA8 input buffers.

use crate::color::Rgba;
use crate::error::QuantError;

/// One input pixel with its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSample {
    pub x: u32,
    pub y: u32,
    pub rgba: Rgba,
}

/// Interleaved RGBA8 pixels in row-major order.
///
/// Construction checks that both dimensions are non-zero and that `data`
/// holds exactly `width * height * 4` bytes, so a `PixelBuffer` is always
/// safe to index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, QuantError> {
        validate(data.len(), width, height)?;
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A buffer filled with one color.
    pub fn filled(width: u32, height: u32, rgba: Rgba) -> Result<Self, QuantError> {
        let len = byte_len(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| QuantError::InvalidImage {
                reason: format!("cannot allocate {width}x{height} RGBA: {e}"),
            })?;
        for _ in 0..len / 4 {
            data.extend_from_slice(&[rgba.r, rgba.g, rgba.b, rgba.a]);
        }
        Self::new(data, width, height)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw interleaved bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// The pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some(rgba_at(&self.data, idx))
    }

    /// All pixels in row-major order.
    pub fn samples(&self) -> impl Iterator<Item = PixelSample> + '_ {
        let width = self.width;
        self.data
            .chunks_exact(4)
            .enumerate()
            .map(move |(i, px)| PixelSample {
                x: i as u32 % width,
                y: i as u32 / width,
                rgba: Rgba::new(px[0], px[1], px[2], px[3]),
            })
    }
}

pub(crate) fn validate(len: usize, width: u32, height: u32) -> Result<(), QuantError> {
    let expected = byte_len(width, height)?;
    if len != expected {
        return Err(QuantError::InvalidImage {
            reason: format!("expected {expected} bytes for {width}x{height} RGBA, got {len}"),
        });
    }
    Ok(())
}

/// Byte length of a `width x height` RGBA8 buffer, bounded by the largest
/// possible allocation.
fn byte_len(width: u32, height: u32) -> Result<usize, QuantError> {
    if width == 0 || height == 0 {
        return Err(QuantError::InvalidImage {
            reason: format!("dimensions must be positive, got {width}x{height}"),
        });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or_else(|| QuantError::InvalidImage {
            reason: format!("{width}x{height} is too large"),
        })
}

#[inline]
fn rgba_at(data: &[u8], idx: usize) -> Rgba {
    Rgba::new(data[idx], data[idx + 1], data[idx + 2], data[idx + 3])
}
