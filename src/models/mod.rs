pub mod config;
pub mod grid;
pub mod result;

pub use config::{AppConfig, ConversionConfig, EditorConfig, PreviewConfig};
pub use grid::{BeadCell, Grid, GridError, GridSnapshot};
pub use result::ConversionResult;
