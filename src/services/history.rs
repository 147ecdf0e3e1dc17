use std::collections::VecDeque;

/// Default number of undo steps kept
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// One recorded edit: full snapshots of the state before and after it
#[derive(Debug, Clone)]
pub struct HistoryEntry<S> {
    /// Short description of the edit, e.g. `"brush"` or `"set_cell"`
    pub label: String,
    pub before: S,
    pub after: S,
    /// When the edit was recorded
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Bounded linear undo/redo history over state snapshots
///
/// Recording a new entry discards the redo branch. Once more than `limit`
/// entries are held, the oldest is evicted.
#[derive(Debug, Clone)]
pub struct History<S> {
    undo_stack: VecDeque<HistoryEntry<S>>,
    redo_stack: Vec<HistoryEntry<S>>,
    limit: usize,
}

impl<S> History<S> {
    /// A limit of 0 is treated as 1.
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record an edit. Clears the redo stack.
    pub fn record(&mut self, label: impl Into<String>, before: S, after: S) {
        let entry = HistoryEntry {
            label: label.into(),
            before,
            after,
            timestamp: chrono::Utc::now(),
        };
        tracing::trace!(label = %entry.label, "Recording history entry");
        self.undo_stack.push_back(entry);
        self.redo_stack.clear();

        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }

    /// Step back; the returned entry's `before` is the state to restore.
    pub fn undo(&mut self) -> Option<&HistoryEntry<S>> {
        let entry = self.undo_stack.pop_back()?;
        self.redo_stack.push(entry);
        self.redo_stack.last()
    }

    /// Step forward; the returned entry's `after` is the state to restore.
    pub fn redo(&mut self) -> Option<&HistoryEntry<S>> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push_back(entry);
        self.undo_stack.back()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of entries available to undo
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of entries available to redo
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// The most recent undoable entry
    pub fn last(&self) -> Option<&HistoryEntry<S>> {
        self.undo_stack.back()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
