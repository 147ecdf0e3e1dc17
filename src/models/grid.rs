use std::collections::BTreeMap;

use bead_quant::BeadColor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// One placed bead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeadCell {
    pub x: u32,
    pub y: u32,
    pub color: BeadColor,
}

impl BeadCell {
    pub fn new(x: u32, y: u32, color: BeadColor) -> Self {
        Self { x, y, color }
    }
}

/// Grid coordinate ordered row-major (y first, then x).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct CellPos {
    y: u32,
    x: u32,
}

/// Sparse bead grid bounded by `width x height`.
///
/// Absent coordinates are empty (never placed or erased). Every stored cell
/// lies inside the bounds, and at most one cell exists per coordinate.
/// Iteration is row-major.
///
/// Cloning produces a fully independent snapshot; history keeps clones,
/// never references into a live grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridSnapshot", into = "GridSnapshot")]
pub struct Grid {
    width: u32,
    height: u32,
    cells: BTreeMap<CellPos, BeadCell>,
}

/// Storage form of a [`Grid`]: dimensions plus a flat list of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<BeadCell>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: BTreeMap::new(),
        }
    }

    /// Build a grid from cells; later cells overwrite earlier ones at the
    /// same coordinate.
    pub fn from_cells(
        width: u32,
        height: u32,
        cells: impl IntoIterator<Item = BeadCell>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height);
        for cell in cells {
            grid.insert(cell)?;
        }
        Ok(grid)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Number of present cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&BeadCell> {
        self.cells.get(&CellPos { y, x })
    }

    pub fn color_at(&self, x: u32, y: u32) -> Option<&BeadColor> {
        self.get(x, y).map(|cell| &cell.color)
    }

    /// Place a cell, returning the one it replaced.
    pub fn insert(&mut self, cell: BeadCell) -> Result<Option<BeadCell>, GridError> {
        self.check_bounds(cell.x, cell.y)?;
        let pos = CellPos {
            y: cell.y,
            x: cell.x,
        };
        Ok(self.cells.insert(pos, cell))
    }

    pub fn set(&mut self, x: u32, y: u32, color: BeadColor) -> Result<Option<BeadCell>, GridError> {
        self.insert(BeadCell::new(x, y, color))
    }

    pub fn remove(&mut self, x: u32, y: u32) -> Option<BeadCell> {
        self.cells.remove(&CellPos { y, x })
    }

    /// Keep only the cells for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&BeadCell) -> bool) {
        self.cells.retain(|_, cell| keep(cell));
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Present cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &BeadCell> + '_ {
        self.cells.values()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut BeadCell> + '_ {
        self.cells.values_mut()
    }

    /// Count of present cells per color name.
    pub fn color_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for cell in self.cells() {
            *counts.entry(cell.color.name.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn to_snapshot(&self) -> GridSnapshot {
        self.clone().into()
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<(), GridError> {
        if self.in_bounds(x, y) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl From<Grid> for GridSnapshot {
    fn from(grid: Grid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            cells: grid.cells.into_values().collect(),
        }
    }
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = GridError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        Grid::from_cells(snapshot.width, snapshot.height, snapshot.cells)
    }
}
