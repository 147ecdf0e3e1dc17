use std::collections::BTreeMap;

use bead_quant::{BeadColor, PaletteSnapshot, QuantizedImage};
use serde::{Deserialize, Serialize};

use super::grid::{BeadCell, Grid, GridError};

/// A converted bead pattern.
///
/// `color_stats` and `colors_used` are derived from the grid and recomputed
/// in full by [`refresh_stats()`](Self::refresh_stats) after every mutation,
/// never patched incrementally. Deserializing reads only the grid and
/// palette; stored stats are recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredResult")]
pub struct ConversionResult {
    grid: Grid,
    /// Palette the image was converted against
    palette: PaletteSnapshot,
    /// Distinct colors present in the grid, first-seen in row-major order
    colors_used: Vec<BeadColor>,
    /// Bead count per color name
    color_stats: BTreeMap<String, usize>,
}

/// Serialized form of a [`ConversionResult`]; derived fields are ignored.
#[derive(Deserialize)]
struct StoredResult {
    grid: Grid,
    palette: PaletteSnapshot,
}

impl From<StoredResult> for ConversionResult {
    fn from(stored: StoredResult) -> Self {
        Self::new(stored.grid, stored.palette)
    }
}

impl ConversionResult {
    pub fn new(grid: Grid, palette: PaletteSnapshot) -> Self {
        let mut result = Self {
            grid,
            palette,
            colors_used: Vec::new(),
            color_stats: BTreeMap::new(),
        };
        result.refresh_stats();
        result
    }

    pub fn from_quantized(image: &QuantizedImage) -> Result<Self, GridError> {
        let cells = image
            .cells()
            .map(|(x, y, color)| BeadCell::new(x, y, color.clone()));
        let grid = Grid::from_cells(image.width(), image.height(), cells)?;
        Ok(Self::new(grid, image.palette().to_snapshot()))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn palette(&self) -> &PaletteSnapshot {
        &self.palette
    }

    pub fn colors_used(&self) -> &[BeadColor] {
        &self.colors_used
    }

    pub fn color_stats(&self) -> &BTreeMap<String, usize> {
        &self.color_stats
    }

    pub fn total_beads(&self) -> usize {
        self.grid.len()
    }

    /// Recompute `color_stats` and `colors_used` from the grid.
    pub fn refresh_stats(&mut self) {
        self.color_stats = self.grid.color_counts();
        self.colors_used.clear();
        for cell in self.grid.cells() {
            if !self.colors_used.iter().any(|c| c.name == cell.color.name) {
                self.colors_used.push(cell.color.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bead_quant::{Palette, Rgb};
    use pretty_assertions::assert_eq;

    fn palette() -> Palette {
        Palette::new(vec![
            BeadColor::new("WHITE", Rgb::WHITE, "test"),
            BeadColor::new("RED", Rgb::new(255, 0, 0), "test"),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_quantized() {
        let image = QuantizedImage::new(vec![1, 0, 1, 1], 2, 2, palette());
        let result = ConversionResult::from_quantized(&image).unwrap();

        assert_eq!(result.width(), 2);
        assert_eq!(result.height(), 2);
        assert_eq!(result.total_beads(), 4);
        assert_eq!(result.color_stats().get("RED"), Some(&3));
        assert_eq!(result.color_stats().get("WHITE"), Some(&1));
        let used: Vec<&str> = result.colors_used().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(used, vec!["RED", "WHITE"]);
        assert_eq!(result.palette().color_count, 2);
    }

    #[test]
    fn test_deserialize_recomputes_stats() {
        let image = QuantizedImage::new(vec![1, 1], 2, 1, palette());
        let result = ConversionResult::from_quantized(&image).unwrap();

        let mut json: serde_json::Value = serde_json::to_value(&result).unwrap();
        json["color_stats"] = serde_json::json!({ "BLUE": 99 });
        json["colors_used"] = serde_json::json!([]);

        let restored: ConversionResult = serde_json::from_value(json).unwrap();
        assert_eq!(restored.color_stats(), &restored.grid().color_counts());
        assert_eq!(restored.color_stats().get("RED"), Some(&2));
        assert_eq!(restored.colors_used().len(), 1);
        assert_eq!(restored, result);
    }

    #[test]
    fn test_refresh_stats_after_mutation() {
        let image = QuantizedImage::new(vec![1, 1], 2, 1, palette());
        let mut result = ConversionResult::from_quantized(&image).unwrap();

        result.grid_mut().remove(0, 0);
        result.refresh_stats();

        assert_eq!(result.color_stats().get("RED"), Some(&1));
        assert_eq!(result.total_beads(), 1);

        result.grid_mut().clear();
        result.refresh_stats();
        assert!(result.color_stats().is_empty());
        assert!(result.colors_used().is_empty());
    }
}
