use crate::models::{BeadCell, Grid};

use super::{Tool, ToolContext};

/// Selects the present cells inside a dragged rectangle
///
/// `on_pointer_down` sets the anchor; `apply` at the release point returns
/// every present cell in the inclusive rectangle between the two. Without
/// an anchor the rectangle is the single release cell. The grid is never
/// modified.
#[derive(Debug, Clone, Default)]
pub struct RectSelect {
    start: Option<(u32, u32)>,
}

impl RectSelect {
    pub fn start(&self) -> Option<(u32, u32)> {
        self.start
    }
}

impl Tool for RectSelect {
    fn id(&self) -> &'static str {
        "rect_select"
    }

    fn name(&self) -> &'static str {
        "Rectangle Select"
    }

    fn on_pointer_down(&mut self, _ctx: &ToolContext, x: u32, y: u32) {
        self.start = Some((x, y));
    }

    fn apply(&mut self, _ctx: &ToolContext, grid: &mut Grid, x: u32, y: u32) -> Vec<BeadCell> {
        let (sx, sy) = self.start.unwrap_or((x, y));
        let (min_x, max_x) = (sx.min(x), sx.max(x));
        let (min_y, max_y) = (sy.min(y), sy.max(y));

        grid.cells()
            .filter(|c| (min_x..=max_x).contains(&c.x) && (min_y..=max_y).contains(&c.y))
            .cloned()
            .collect()
    }
}
