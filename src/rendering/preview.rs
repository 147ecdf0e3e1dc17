use std::io::Cursor;

use crate::error::RenderError;
use crate::models::Grid;

/// Interleaved RGBA8 raster, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaRaster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RgbaRaster {
    /// Fully transparent raster
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    fn fill_block(&mut self, x0: u32, y0: u32, size: u32, rgba: [u8; 4]) {
        let stride = self.width as usize * 4;
        for y in y0..y0 + size {
            let row = y as usize * stride;
            for x in x0..x0 + size {
                let i = row + x as usize * 4;
                self.data[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }
}

/// Draw each bead as a `pixel_size` square; empty cells stay transparent.
pub fn render_preview(grid: &Grid, pixel_size: u32) -> Result<RgbaRaster, RenderError> {
    let invalid = || RenderError::InvalidDimensions {
        width: grid.width().saturating_mul(pixel_size),
        height: grid.height().saturating_mul(pixel_size),
    };
    if pixel_size == 0 || grid.width() == 0 || grid.height() == 0 {
        return Err(invalid());
    }
    let width = grid.width().checked_mul(pixel_size).ok_or_else(invalid)?;
    let height = grid.height().checked_mul(pixel_size).ok_or_else(invalid)?;

    let mut raster = RgbaRaster::transparent(width, height);
    for cell in grid.cells() {
        let rgb = cell.color.rgb;
        raster.fill_block(
            cell.x * pixel_size,
            cell.y * pixel_size,
            pixel_size,
            [rgb.r, rgb.g, rgb.b, 255],
        );
    }

    tracing::debug!(width, height, beads = grid.len(), "Rendered preview");
    Ok(raster)
}

/// Encode a raster as an 8-bit RGBA PNG.
pub fn encode_png(raster: &RgbaRaster) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, raster.width, raster.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&raster.data)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
