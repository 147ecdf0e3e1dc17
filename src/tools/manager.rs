use std::collections::BTreeMap;

use bead_quant::BeadColor;

use crate::error::EditError;
use crate::models::{BeadCell, Grid};
use crate::services::history::{History, DEFAULT_HISTORY_LIMIT};

use super::{Tool, ToolContext, ToolKind};

/// Tool registry, active-tool selection and per-apply grid history
///
/// States: no tool selected, or one tool selected. `apply` without a
/// selected tool does nothing. Undo and redo replay full-grid snapshots and
/// work regardless of which tool is selected.
///
/// This history is independent of the [`GridEditor`](crate::services::GridEditor)
/// history; [`GridEditor::apply_tool`](crate::services::GridEditor::apply_tool)
/// keeps the two in step.
#[derive(Debug)]
pub struct ToolManager {
    tools: BTreeMap<&'static str, ToolKind>,
    active: Option<&'static str>,
    history: History<Grid>,
}

impl ToolManager {
    pub fn new(history_limit: usize) -> Self {
        Self {
            tools: BTreeMap::new(),
            active: None,
            history: History::new(history_limit),
        }
    }

    /// A manager with every built-in tool registered and none selected
    pub fn with_default_tools(history_limit: usize) -> Self {
        let mut manager = Self::new(history_limit);
        for tool in ToolKind::all() {
            manager.register(tool);
        }
        manager
    }

    /// Add a tool, replacing any tool with the same id
    pub fn register(&mut self, tool: impl Into<ToolKind>) {
        let tool = tool.into();
        tracing::debug!(tool = tool.id(), "Registering tool");
        self.tools.insert(tool.id(), tool);
    }

    /// Make `id` the active tool. An unknown id leaves no tool selected.
    pub fn select(&mut self, id: &str) -> Option<&ToolKind> {
        self.active = self.tools.get_key_value(id).map(|(key, _)| *key);
        if self.active.is_none() {
            tracing::debug!(tool = id, "Unknown tool, selection cleared");
        }
        self.active()
    }

    pub fn active(&self) -> Option<&ToolKind> {
        self.active.and_then(|id| self.tools.get(id))
    }

    pub fn tool(&self, id: &str) -> Option<&ToolKind> {
        self.tools.get(id)
    }

    /// Registered tool ids in sorted order
    pub fn tool_ids(&self) -> Vec<&'static str> {
        self.tools.keys().copied().collect()
    }

    fn active_mut(&mut self) -> Option<&mut ToolKind> {
        let id = self.active?;
        self.tools.get_mut(id)
    }

    pub fn pointer_down(&mut self, x: u32, y: u32, color: Option<&BeadColor>) {
        let ctx = context(color);
        if let Some(tool) = self.active_mut() {
            tool.on_pointer_down(&ctx, x, y);
        }
    }

    pub fn pointer_move(&mut self, x: u32, y: u32, color: Option<&BeadColor>) {
        let ctx = context(color);
        if let Some(tool) = self.active_mut() {
            tool.on_pointer_move(&ctx, x, y);
        }
    }

    pub fn pointer_up(&mut self, x: u32, y: u32, color: Option<&BeadColor>) {
        let ctx = context(color);
        if let Some(tool) = self.active_mut() {
            tool.on_pointer_up(&ctx, x, y);
        }
    }

    /// Apply the active tool and record a before/after snapshot.
    ///
    /// `color` defaults to black. Every apply with a selected tool is
    /// recorded, including ones that changed nothing.
    pub fn apply(
        &mut self,
        grid: &mut Grid,
        x: u32,
        y: u32,
        color: Option<&BeadColor>,
    ) -> Vec<BeadCell> {
        let ctx = context(color);
        let Some(tool) = self.active_mut() else {
            return Vec::new();
        };
        let id = tool.id();

        let before = grid.clone();
        let changed = tool.apply(&ctx, grid, x, y);
        tracing::debug!(tool = id, x, y, changed = changed.len(), "Applied tool");

        self.history.record(id, before, grid.clone());
        changed
    }

    /// Restore the grid to before the last apply; returns its cells.
    pub fn undo(&mut self, grid: &mut Grid) -> Result<Vec<BeadCell>, EditError> {
        let entry = self.history.undo().ok_or(EditError::NoHistory)?;
        *grid = entry.before.clone();
        Ok(grid.cells().cloned().collect())
    }

    /// Re-apply the last undone step; returns the restored cells.
    pub fn redo(&mut self, grid: &mut Grid) -> Result<Vec<BeadCell>, EditError> {
        let entry = self.history.redo().ok_or(EditError::NoHistory)?;
        *grid = entry.after.clone();
        Ok(grid.cells().cloned().collect())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History<Grid> {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::with_default_tools(DEFAULT_HISTORY_LIMIT)
    }
}

fn context(color: Option<&BeadColor>) -> ToolContext {
    color
        .map(|c| ToolContext::new(c.clone()))
        .unwrap_or_default()
}
