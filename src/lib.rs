//! Beadsmith - images to bead patterns
//!
//! Converts RGBA images into grids of named bead colors (via the
//! `bead_quant` crate) and edits those grids with tools, batches and
//! undo/redo. This library exposes modules for integration testing.

pub mod error;
pub mod export;
pub mod models;
pub mod rendering;
pub mod services;
pub mod tools;
