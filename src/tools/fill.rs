use std::collections::{HashSet, VecDeque};

use crate::models::{BeadCell, Grid};

use super::{Tool, ToolContext};

/// 4-connected flood fill
///
/// Recolors the region of present cells sharing the clicked cell's RGB
/// value. Clicking an empty cell, or a cell that already has the active
/// color, changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fill;

impl Tool for Fill {
    fn id(&self) -> &'static str {
        "fill"
    }

    fn name(&self) -> &'static str {
        "Fill"
    }

    fn apply(&mut self, ctx: &ToolContext, grid: &mut Grid, x: u32, y: u32) -> Vec<BeadCell> {
        let Some(target) = grid.color_at(x, y).map(|c| c.rgb) else {
            return Vec::new();
        };
        if target == ctx.color.rgb {
            return Vec::new();
        }

        let mut changed = Vec::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([(x, y)]);

        while let Some((cx, cy)) = queue.pop_front() {
            if !visited.insert((cx, cy)) {
                continue;
            }
            if grid.color_at(cx, cy).map(|c| c.rgb) != Some(target) {
                continue;
            }

            let cell = BeadCell::new(cx, cy, ctx.color.clone());
            if grid.insert(cell.clone()).is_err() {
                continue;
            }
            changed.push(cell);

            if cx > 0 {
                queue.push_back((cx - 1, cy));
            }
            if cx + 1 < grid.width() {
                queue.push_back((cx + 1, cy));
            }
            if cy > 0 {
                queue.push_back((cx, cy - 1));
            }
            if cy + 1 < grid.height() {
                queue.push_back((cx, cy + 1));
            }
        }

        tracing::debug!(x, y, changed = changed.len(), "Flood fill");
        changed
    }
}
