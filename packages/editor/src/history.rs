//! # Document History
//!
//! Bounded undo/redo log over whole-document snapshots.
//!
//! ## Design
//!
//! - The log always holds at least one entry (the starting text)
//! - `cursor` points at the snapshot currently shown in the editor
//! - Pushing while the cursor is not at the tail discards the redo branch
//! - Pushing a value equal to the current entry is ignored
//! - When the log is full the oldest entry is evicted and the cursor shifts
//!   down, so the newly pushed entry stays last
//!
//! ## Example
//!
//! ```rust
//! use wiredit_editor::DocumentHistory;
//!
//! let mut history = DocumentHistory::new("a");
//! history.push("b");
//! assert_eq!(history.undo().unwrap(), "a");
//! assert_eq!(history.redo().unwrap(), "b");
//! ```

use crate::errors::{EditorError, EditorResult, HistoryStep};

/// Default number of snapshots kept
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Undo/redo log for a single text document
#[derive(Debug, Clone)]
pub struct DocumentHistory {
    /// Snapshots, oldest first
    entries: Vec<String>,

    /// Index of the snapshot currently shown
    cursor: usize,

    /// Maximum number of snapshots kept (at least 1)
    capacity: usize,
}

impl DocumentHistory {
    /// Create a history with the default capacity
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_capacity(initial, DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a history holding at most `capacity` snapshots
    pub fn with_capacity(initial: impl Into<String>, capacity: usize) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Record a new snapshot.
    ///
    /// Returns `false` when `text` equals the current entry and nothing was
    /// recorded.
    pub fn push(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.entries[self.cursor] == text {
            return false;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(text);
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            self.entries.remove(0);
            self.cursor -= 1;
        }

        true
    }

    /// Step back one snapshot and return it
    pub fn undo(&mut self) -> EditorResult<&str> {
        if !self.can_undo() {
            return Err(EditorError::NoOp(HistoryStep::Undo));
        }
        self.cursor -= 1;
        Ok(&self.entries[self.cursor])
    }

    /// Step forward one snapshot and return it
    pub fn redo(&mut self) -> EditorResult<&str> {
        if !self.can_redo() {
            return Err(EditorError::NoOp(HistoryStep::Redo));
        }
        self.cursor += 1;
        Ok(&self.entries[self.cursor])
    }

    /// Step in either direction
    pub fn step(&mut self, step: HistoryStep) -> EditorResult<&str> {
        match step {
            HistoryStep::Undo => self.undo(),
            HistoryStep::Redo => self.redo(),
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Discard everything and start over from a single snapshot
    pub fn reset(&mut self, text: impl Into<String>) {
        self.entries.clear();
        self.entries.push(text.into());
        self.cursor = 0;
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history holds at least its starting snapshot
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of undo steps available
    pub fn undo_levels(&self) -> usize {
        self.cursor
    }

    /// Number of redo steps available
    pub fn redo_levels(&self) -> usize {
        self.entries.len() - self.cursor - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_creation() {
        let history = DocumentHistory::new("start");
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current(), "start");
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_then_undo_redo() {
        let mut history = DocumentHistory::new("a");
        assert!(history.push("b"));
        assert!(history.can_undo());

        assert_eq!(history.undo().unwrap(), "a");
        assert!(history.can_redo());
        assert_eq!(history.redo().unwrap(), "b");
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_at_bounds_are_noops() {
        let mut history = DocumentHistory::new("a");
        assert!(matches!(
            history.undo(),
            Err(EditorError::NoOp(HistoryStep::Undo))
        ));
        assert!(matches!(
            history.redo(),
            Err(EditorError::NoOp(HistoryStep::Redo))
        ));
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_duplicate_push_is_ignored() {
        let mut history = DocumentHistory::new("a");
        history.push("b");

        assert!(!history.push("b"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_push_after_undo_discards_redo_branch() {
        let mut history = DocumentHistory::new("seed");
        history.reset("A");
        history.push("B");
        history.undo().unwrap();
        history.push("C");

        assert!(matches!(history.redo(), Err(EditorError::NoOp(_))));
        assert_eq!(history.entries(), &["A".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = DocumentHistory::with_capacity("D1", 3);
        history.push("D2");
        history.push("D3");
        history.push("D4");

        assert_eq!(
            history.entries(),
            &["D2".to_string(), "D3".to_string(), "D4".to_string()]
        );
        assert_eq!(history.current(), "D4");
        assert_eq!(history.undo().unwrap(), "D3");
    }

    #[test]
    fn test_full_undo_chain_after_eviction() {
        let capacity = 4;
        let mut history = DocumentHistory::with_capacity("v0", capacity);
        for i in 1..20 {
            history.push(format!("v{i}"));
            assert!(history.len() <= capacity);
        }

        for _ in 0..capacity - 1 {
            history.undo().unwrap();
        }
        assert_eq!(history.current(), "v16");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut history = DocumentHistory::with_capacity("a", 0);
        history.push("b");
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.entries(), &["b".to_string()]);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_reset_collapses_to_single_entry() {
        let mut history = DocumentHistory::new("a");
        history.push("b");
        history.push("c");
        history.undo().unwrap();

        history.reset("loaded");
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current(), "loaded");
    }

    #[test]
    fn test_levels() {
        let mut history = DocumentHistory::new("a");
        history.push("b");
        history.push("c");
        history.undo().unwrap();

        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.redo_levels(), 1);
    }
}
