//! Grid editing tools
//!
//! Every tool implements the [`Tool`] capability: `apply` at a coordinate
//! returns the set of cells it touched. Paint tools (brush, eraser, fill)
//! mutate the grid; the selection tools (color picker, rectangle select)
//! only read it.
//!
//! The set of tools is closed: [`ToolKind`] enumerates them, and
//! [`ToolManager`] keeps a registry of `ToolKind` values keyed by id.

mod brush;
mod color_picker;
mod eraser;
mod fill;
mod manager;
mod rect_select;

use bead_quant::{BeadColor, Rgb};

use crate::models::{BeadCell, Grid};

pub use brush::Brush;
pub use color_picker::ColorPicker;
pub use eraser::Eraser;
pub use fill::Fill;
pub use manager::ToolManager;
pub use rect_select::RectSelect;

/// Per-call input shared by all tools
#[derive(Debug, Clone, PartialEq)]
pub struct ToolContext {
    /// Active paint color
    pub color: BeadColor,
}

impl ToolContext {
    pub fn new(color: BeadColor) -> Self {
        Self { color }
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new(BeadColor::from_rgb(Rgb::BLACK))
    }
}

/// Capability shared by all tools
///
/// Pointer hooks default to no-ops; tools that track a drag override them.
pub trait Tool {
    /// Registry key, e.g. `"brush"`
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn on_pointer_down(&mut self, _ctx: &ToolContext, _x: u32, _y: u32) {}

    fn on_pointer_move(&mut self, _ctx: &ToolContext, _x: u32, _y: u32) {}

    fn on_pointer_up(&mut self, _ctx: &ToolContext, _x: u32, _y: u32) {}

    /// Use the tool at `(x, y)` and return the affected cells
    fn apply(&mut self, ctx: &ToolContext, grid: &mut Grid, x: u32, y: u32) -> Vec<BeadCell>;
}

/// The closed set of available tools
#[derive(Debug, Clone)]
pub enum ToolKind {
    Brush(Brush),
    Eraser(Eraser),
    Fill(Fill),
    ColorPicker(ColorPicker),
    RectSelect(RectSelect),
}

impl ToolKind {
    /// One fresh instance of every tool
    pub fn all() -> Vec<ToolKind> {
        vec![
            Brush.into(),
            Eraser.into(),
            Fill.into(),
            ColorPicker::default().into(),
            RectSelect::default().into(),
        ]
    }

    fn as_tool(&self) -> &dyn Tool {
        match self {
            ToolKind::Brush(t) => t,
            ToolKind::Eraser(t) => t,
            ToolKind::Fill(t) => t,
            ToolKind::ColorPicker(t) => t,
            ToolKind::RectSelect(t) => t,
        }
    }

    fn as_tool_mut(&mut self) -> &mut dyn Tool {
        match self {
            ToolKind::Brush(t) => t,
            ToolKind::Eraser(t) => t,
            ToolKind::Fill(t) => t,
            ToolKind::ColorPicker(t) => t,
            ToolKind::RectSelect(t) => t,
        }
    }
}

impl Tool for ToolKind {
    fn id(&self) -> &'static str {
        self.as_tool().id()
    }

    fn name(&self) -> &'static str {
        self.as_tool().name()
    }

    fn on_pointer_down(&mut self, ctx: &ToolContext, x: u32, y: u32) {
        self.as_tool_mut().on_pointer_down(ctx, x, y)
    }

    fn on_pointer_move(&mut self, ctx: &ToolContext, x: u32, y: u32) {
        self.as_tool_mut().on_pointer_move(ctx, x, y)
    }

    fn on_pointer_up(&mut self, ctx: &ToolContext, x: u32, y: u32) {
        self.as_tool_mut().on_pointer_up(ctx, x, y)
    }

    fn apply(&mut self, ctx: &ToolContext, grid: &mut Grid, x: u32, y: u32) -> Vec<BeadCell> {
        self.as_tool_mut().apply(ctx, grid, x, y)
    }
}

impl From<Brush> for ToolKind {
    fn from(tool: Brush) -> Self {
        ToolKind::Brush(tool)
    }
}

impl From<Eraser> for ToolKind {
    fn from(tool: Eraser) -> Self {
        ToolKind::Eraser(tool)
    }
}

impl From<Fill> for ToolKind {
    fn from(tool: Fill) -> Self {
        ToolKind::Fill(tool)
    }
}

impl From<ColorPicker> for ToolKind {
    fn from(tool: ColorPicker) -> Self {
        ToolKind::ColorPicker(tool)
    }
}

impl From<RectSelect> for ToolKind {
    fn from(tool: RectSelect) -> Self {
        ToolKind::RectSelect(tool)
    }
}
