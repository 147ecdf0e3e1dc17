//! Output of the conversion pipeline.

use crate::palette::{BeadColor, Palette};

/// A converted image: one palette index per pixel, row-major.
///
/// The palette is owned so the result stays meaningful after the
/// converter that produced it is dropped or re-targeted.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedImage {
    indices: Vec<usize>,
    width: u32,
    height: u32,
    palette: Palette,
}

impl QuantizedImage {
    /// Every index must be in `0..palette.len()`.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(indices: Vec<usize>, width: u32, height: u32, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width as usize * height as usize,
            "indices length must match {width}x{height}"
        );
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The matched color at `(x, y)`, or `None` outside the image.
    pub fn color_at(&self, x: u32, y: u32) -> Option<&BeadColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.indices[y as usize * self.width as usize + x as usize];
        self.palette.get(idx)
    }

    /// Every cell as `(x, y, color)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &BeadColor)> + '_ {
        let width = self.width;
        self.indices.iter().enumerate().filter_map(move |(i, &idx)| {
            let color = self.palette.get(idx)?;
            Some((i as u32 % width, i as u32 / width, color))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn two_colors() -> Palette {
        Palette::new(vec![
            BeadColor::new("BLACK", Rgb::BLACK, "test"),
            BeadColor::new("WHITE", Rgb::WHITE, "test"),
        ])
        .unwrap()
    }

    #[test]
    fn test_checkerboard_lookup() {
        let image = QuantizedImage::new(vec![0, 1, 1, 0], 2, 2, two_colors());
        assert_eq!(image.color_at(0, 0).unwrap().name, "BLACK");
        assert_eq!(image.color_at(1, 0).unwrap().name, "WHITE");
        assert_eq!(image.color_at(0, 1).unwrap().name, "WHITE");
        assert!(image.color_at(2, 0).is_none());
    }

    #[test]
    fn test_cells_in_row_major_order() {
        let image = QuantizedImage::new(vec![0, 1, 1, 0], 2, 2, two_colors());
        let cells: Vec<(u32, u32, &str)> = image
            .cells()
            .map(|(x, y, c)| (x, y, c.name.as_str()))
            .collect();
        assert_eq!(
            cells,
            vec![
                (0, 0, "BLACK"),
                (1, 0, "WHITE"),
                (0, 1, "WHITE"),
                (1, 1, "BLACK"),
            ]
        );
    }
}
