use bead_quant::BeadColor;

use crate::models::{BeadCell, Grid};

use super::{Tool, ToolContext};

/// Samples the color under the pointer without changing the grid
#[derive(Debug, Clone, Default)]
pub struct ColorPicker {
    picked: Option<BeadColor>,
}

impl ColorPicker {
    /// The last sampled color
    pub fn picked(&self) -> Option<&BeadColor> {
        self.picked.as_ref()
    }
}

impl Tool for ColorPicker {
    fn id(&self) -> &'static str {
        "color_picker"
    }

    fn name(&self) -> &'static str {
        "Color Picker"
    }

    /// Empty coordinates keep the previous pick.
    fn apply(&mut self, _ctx: &ToolContext, grid: &mut Grid, x: u32, y: u32) -> Vec<BeadCell> {
        if let Some(color) = grid.color_at(x, y) {
            self.picked = Some(color.clone());
        }
        Vec::new()
    }
}
