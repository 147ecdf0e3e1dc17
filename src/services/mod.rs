pub mod editor;
pub mod history;

pub use editor::GridEditor;
pub use history::{History, HistoryEntry, DEFAULT_HISTORY_LIMIT};
