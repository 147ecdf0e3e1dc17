use bead_quant::{BeadColor, ConvertOptions, Converter, Palette, PixelBuffer};

use crate::error::EditError;
use crate::models::{AppConfig, BeadCell, ConversionResult, Grid};
use crate::services::history::History;
use crate::tools::{Tool, ToolManager};

/// Pre-batch state held while a batch is open
#[derive(Debug, Clone)]
struct BatchTransaction {
    original: ConversionResult,
}

/// Owns one conversion result and edits it with undo/redo
///
/// Every mutation works on a copy of the current result and swaps it in
/// only on success, so a failed mutation leaves the result untouched. Stats
/// are recomputed from the full grid after each mutation.
///
/// Outside a batch each mutation records one history entry and clears the
/// redo stack. Inside a batch nothing is recorded until
/// [`commit_batch()`](Self::commit_batch), which records a single entry
/// spanning the whole batch.
///
/// Callers must serialize access; there is no internal locking.
#[derive(Debug)]
pub struct GridEditor {
    palette: Palette,
    options: ConvertOptions,
    result: Option<ConversionResult>,
    history: History<ConversionResult>,
    batch: Option<BatchTransaction>,
}

impl GridEditor {
    /// Editor over `palette`, with conversion options and history limit
    /// taken from `config`.
    pub fn new(palette: Palette, config: &AppConfig) -> Result<Self, EditError> {
        let options = config
            .conversion
            .convert_options()
            .map_err(bead_quant::QuantError::from)?;
        Ok(Self::with_options(palette, options, config.editor.history_limit))
    }

    /// Editor whose palette also comes from `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, EditError> {
        let palette = Palette::from_source(&config.conversion.palette)
            .map_err(bead_quant::QuantError::from)?;
        Self::new(palette, config)
    }

    pub fn with_options(palette: Palette, options: ConvertOptions, history_limit: usize) -> Self {
        Self {
            palette,
            options,
            result: None,
            history: History::new(history_limit),
            batch: None,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette for subsequent conversions; the loaded result is unaffected.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ConvertOptions) {
        self.options = options;
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        self.result.as_ref()
    }

    pub fn history(&self) -> &History<ConversionResult> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_batch_active(&self) -> bool {
        self.batch.is_some()
    }

    /// Convert pixels with the editor's palette and options and load the
    /// result. History is cleared.
    pub fn convert(&mut self, pixels: &PixelBuffer) -> Result<&ConversionResult, EditError> {
        let converter = Converter::new(&self.palette, self.options.clone())?;
        let image = converter.convert(pixels);
        let result = ConversionResult::from_quantized(&image)?;
        tracing::debug!(
            width = result.width(),
            height = result.height(),
            colors = result.color_stats().len(),
            "Converted image"
        );
        self.load_result(result)
    }

    /// Replace the current result. History is cleared.
    pub fn load_result(&mut self, result: ConversionResult) -> Result<&ConversionResult, EditError> {
        if self.batch.is_some() {
            return Err(EditError::BatchAlreadyActive);
        }
        self.history.clear();
        Ok(self.result.insert(result))
    }

    /// Set one cell, adding it if the coordinate was empty.
    pub fn set_cell(&mut self, x: u32, y: u32, color: BeadColor) -> Result<(), EditError> {
        self.mutate("set_cell", |grid| {
            grid.set(x, y, color)?;
            Ok(())
        })
    }

    pub fn upsert_cell(&mut self, cell: BeadCell) -> Result<(), EditError> {
        self.mutate("upsert_cell", |grid| {
            grid.insert(cell)?;
            Ok(())
        })
    }

    /// Insert or overwrite many cells; later entries win on shared
    /// coordinates. Any out-of-bounds cell aborts the whole call.
    pub fn upsert_cells(
        &mut self,
        cells: impl IntoIterator<Item = BeadCell>,
    ) -> Result<usize, EditError> {
        self.mutate("upsert_cells", |grid| {
            let mut count = 0;
            for cell in cells {
                grid.insert(cell)?;
                count += 1;
            }
            Ok(count)
        })
    }

    pub fn remove_cell(&mut self, x: u32, y: u32) -> Result<Option<BeadCell>, EditError> {
        self.mutate("remove_cell", |grid| Ok(grid.remove(x, y)))
    }

    /// Recolor every cell matching `predicate`; returns how many changed.
    pub fn set_cells_where(
        &mut self,
        predicate: impl Fn(&BeadCell) -> bool,
        updater: impl Fn(&BeadCell) -> BeadColor,
    ) -> Result<usize, EditError> {
        self.mutate("set_cells_where", |grid| {
            let mut count = 0;
            for cell in grid.cells_mut() {
                if predicate(cell) {
                    cell.color = updater(cell);
                    count += 1;
                }
            }
            Ok(count)
        })
    }

    /// Remove every cell matching `predicate`; returns how many were removed.
    pub fn remove_cells_where(
        &mut self,
        predicate: impl Fn(&BeadCell) -> bool,
    ) -> Result<usize, EditError> {
        self.mutate("remove_cells_where", |grid| {
            let before = grid.len();
            grid.retain(|cell| !predicate(cell));
            Ok(before - grid.len())
        })
    }

    /// Recolor every cell whose color is named `target_name`.
    pub fn replace_color_everywhere(
        &mut self,
        target_name: &str,
        new_color: &BeadColor,
    ) -> Result<usize, EditError> {
        self.set_cells_where(
            |cell| cell.color.name == target_name,
            |_| new_color.clone(),
        )
    }

    /// Apply the manager's active tool to the result grid.
    ///
    /// Both the manager's and the editor's histories record the step. Fails
    /// with `BatchAlreadyActive` inside a batch, where the editor records
    /// nothing and the two histories would drift apart.
    pub fn apply_tool(
        &mut self,
        tools: &mut ToolManager,
        x: u32,
        y: u32,
        color: Option<&BeadColor>,
    ) -> Result<Vec<BeadCell>, EditError> {
        if self.batch.is_some() {
            return Err(EditError::BatchAlreadyActive);
        }
        let label = tools.active().map(Tool::id).unwrap_or("tool");
        self.mutate(label, |grid| Ok(tools.apply(grid, x, y, color)))
    }

    pub fn undo(&mut self) -> Result<&ConversionResult, EditError> {
        if self.batch.is_some() {
            return Err(EditError::BatchAlreadyActive);
        }
        let entry = self.history.undo().ok_or(EditError::NoHistory)?;
        tracing::debug!(label = %entry.label, "Undo");
        let state = entry.before.clone();
        Ok(self.result.insert(state))
    }

    pub fn redo(&mut self) -> Result<&ConversionResult, EditError> {
        if self.batch.is_some() {
            return Err(EditError::BatchAlreadyActive);
        }
        let entry = self.history.redo().ok_or(EditError::NoHistory)?;
        tracing::debug!(label = %entry.label, "Redo");
        let state = entry.after.clone();
        Ok(self.result.insert(state))
    }

    pub fn start_batch(&mut self) -> Result<(), EditError> {
        if self.batch.is_some() {
            return Err(EditError::BatchAlreadyActive);
        }
        let original = self.result.clone().ok_or(EditError::NoActiveResult)?;
        self.batch = Some(BatchTransaction { original });
        Ok(())
    }

    /// Close the batch, recording one entry from the pre-batch state to the
    /// current state.
    pub fn commit_batch(&mut self) -> Result<&ConversionResult, EditError> {
        let batch = self.batch.take().ok_or(EditError::NoActiveBatch)?;
        let current = self.result.clone().ok_or(EditError::NoActiveResult)?;
        self.history.record("batch", batch.original, current);
        tracing::debug!("Committed batch");
        self.result.as_ref().ok_or(EditError::NoActiveResult)
    }

    /// Close the batch, restoring the pre-batch state. Records nothing.
    pub fn cancel_batch(&mut self) -> Result<&ConversionResult, EditError> {
        let batch = self.batch.take().ok_or(EditError::NoActiveBatch)?;
        tracing::debug!("Cancelled batch");
        Ok(self.result.insert(batch.original))
    }

    /// Run `edits` as one batch: committed on success, cancelled if `edits`
    /// returns an error.
    pub fn run_batch<T>(
        &mut self,
        edits: impl FnOnce(&mut Self) -> Result<T, EditError>,
    ) -> Result<T, EditError> {
        self.start_batch()?;
        match edits(self) {
            Ok(value) => {
                self.commit_batch()?;
                Ok(value)
            }
            Err(e) => {
                if self.batch.is_some() {
                    self.cancel_batch()?;
                }
                Err(e)
            }
        }
    }

    fn mutate<T>(
        &mut self,
        label: &str,
        edit: impl FnOnce(&mut Grid) -> Result<T, EditError>,
    ) -> Result<T, EditError> {
        let mut next = self.result.clone().ok_or(EditError::NoActiveResult)?;
        let output = edit(next.grid_mut())?;
        next.refresh_stats();
        tracing::debug!(
            label,
            beads = next.total_beads(),
            batch = self.batch.is_some(),
            "Edited grid"
        );

        if self.batch.is_none() {
            if let Some(before) = self.result.take() {
                self.history.record(label, before, next.clone());
            }
        }
        self.result = Some(next);
        Ok(output)
    }
}
