use crate::models::{BeadCell, Grid};

use super::{Tool, ToolContext};

/// Paints one cell with the active color
#[derive(Debug, Clone, Copy, Default)]
pub struct Brush;

impl Tool for Brush {
    fn id(&self) -> &'static str {
        "brush"
    }

    fn name(&self) -> &'static str {
        "Brush"
    }

    /// Always reports the painted cell; outside the grid nothing happens.
    fn apply(&mut self, ctx: &ToolContext, grid: &mut Grid, x: u32, y: u32) -> Vec<BeadCell> {
        let cell = BeadCell::new(x, y, ctx.color.clone());
        match grid.insert(cell.clone()) {
            Ok(_) => vec![cell],
            Err(e) => {
                tracing::trace!(%e, "Brush outside grid");
                Vec::new()
            }
        }
    }
}
