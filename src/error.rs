use bead_quant::QuantError;
use thiserror::Error;

use crate::models::GridError;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("No conversion result loaded")]
    NoActiveResult,

    #[error("Nothing to undo or redo")]
    NoHistory,

    #[error("A batch is already active")]
    BatchAlreadyActive,

    #[error("No batch is active")]
    NoActiveBatch,

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("Conversion failed: {0}")]
    Conversion(#[from] QuantError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Image error: {0}")]
    Image(#[from] QuantError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),
}
