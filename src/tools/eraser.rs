use crate::models::{BeadCell, Grid};

use super::{Tool, ToolContext};

/// Removes the cell under the pointer
#[derive(Debug, Clone, Copy, Default)]
pub struct Eraser;

impl Tool for Eraser {
    fn id(&self) -> &'static str {
        "eraser"
    }

    fn name(&self) -> &'static str {
        "Eraser"
    }

    /// Returns the removed cell, or nothing if the coordinate was empty.
    fn apply(&mut self, _ctx: &ToolContext, grid: &mut Grid, x: u32, y: u32) -> Vec<BeadCell> {
        grid.remove(x, y).into_iter().collect()
    }
}
