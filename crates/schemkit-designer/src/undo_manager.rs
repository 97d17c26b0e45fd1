//! Undo/redo history of whole-document snapshots.
//!
//! Every entry is the serialized drawing as it was after an operation. The
//! pointer marks the current entry; undo steps back to the one before it
//! and redo forward to the next. Restoring means re-parsing the text, so no
//! entry ever refers to live primitives.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use schemkit_core::constants::DEFAULT_UNDO_DEPTH;
use schemkit_core::HistoryError;
use tracing::debug;

/// One saved document state.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoSnapshot {
    /// Serialized drawing with extensions.
    pub text: String,
    /// The document's modified flag at that point.
    pub modified: bool,
    pub file_name: Option<PathBuf>,
    /// Set when the operation changed a library; holds the library
    /// directory to restore.
    pub library_dir: Option<PathBuf>,
    pub taken_at: DateTime<Utc>,
}

impl UndoSnapshot {
    pub fn new(text: impl Into<String>, modified: bool, file_name: Option<PathBuf>) -> Self {
        Self {
            text: text.into(),
            modified,
            file_name,
            library_dir: None,
            taken_at: Utc::now(),
        }
    }

    /// Marks the snapshot as the result of a library operation.
    pub fn with_library_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.library_dir = Some(dir.into());
        self
    }

    pub fn is_library_operation(&self) -> bool {
        self.library_dir.is_some()
    }
}

/// Bounded linear history.
#[derive(Debug, Clone)]
pub struct UndoManager {
    history: Vec<UndoSnapshot>,
    /// Number of entries up to and including the current one.
    pointer: usize,
    max_depth: usize,
}

impl UndoManager {
    /// Create a new undo manager with default depth (100)
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_UNDO_DEPTH)
    }

    /// Create with custom maximum undo depth
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            history: Vec::with_capacity(max_depth),
            pointer: 0,
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Records a new current state and drops anything that could have been
    /// redone. The oldest entry is evicted past the depth limit.
    pub fn push(&mut self, snapshot: UndoSnapshot) {
        self.history.truncate(self.pointer);
        self.history.push(snapshot);
        if self.history.len() > self.max_depth {
            self.history.remove(0);
        }
        self.pointer = self.history.len();
        debug!("Undo history at {}/{}", self.pointer, self.history.len());
    }

    /// Steps back and returns the state to restore.
    pub fn undo(&mut self) -> Result<&UndoSnapshot, HistoryError> {
        if self.pointer <= 1 {
            return Err(HistoryError::NothingToUndo);
        }
        self.pointer -= 1;
        Ok(&self.history[self.pointer - 1])
    }

    /// Steps forward and returns the state to restore.
    pub fn redo(&mut self) -> Result<&UndoSnapshot, HistoryError> {
        if self.pointer >= self.history.len() {
            return Err(HistoryError::NothingToRedo);
        }
        self.pointer += 1;
        Ok(&self.history[self.pointer - 1])
    }

    /// True when the operation that [`UndoManager::undo`] would revert
    /// changed a library.
    pub fn is_next_operation_on_library(&self) -> bool {
        self.can_undo() && self.history[self.pointer - 1].is_library_operation()
    }

    /// Library directory of the operation the next undo reverts.
    pub fn next_library_dir(&self) -> Option<&PathBuf> {
        if !self.can_undo() {
            return None;
        }
        self.history[self.pointer - 1].library_dir.as_ref()
    }

    pub fn current(&self) -> Option<&UndoSnapshot> {
        self.pointer.checked_sub(1).and_then(|i| self.history.get(i))
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 1
    }

    pub fn can_redo(&self) -> bool {
        self.pointer < self.history.len()
    }

    pub fn undo_count(&self) -> usize {
        self.pointer.saturating_sub(1)
    }

    pub fn redo_count(&self) -> usize {
        self.history.len() - self.pointer
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.pointer = 0;
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(text: &str) -> UndoSnapshot {
        UndoSnapshot::new(text, true, None)
    }

    #[test]
    fn test_empty_history() {
        let mut m = UndoManager::new();
        assert!(!m.can_undo());
        assert!(!m.can_redo());
        assert_eq!(m.undo().unwrap_err(), HistoryError::NothingToUndo);
        assert_eq!(m.redo().unwrap_err(), HistoryError::NothingToRedo);
    }

    #[test]
    fn test_baseline_cannot_be_undone() {
        let mut m = UndoManager::new();
        m.push(snap("A"));
        assert!(!m.can_undo());
        assert!(m.undo().is_err());
        assert_eq!(m.current().map(|s| s.text.as_str()), Some("A"));
    }

    #[test]
    fn test_depth_evicts_oldest() {
        let mut m = UndoManager::with_depth(3);
        for t in ["A", "B", "C", "D"] {
            m.push(snap(t));
        }
        assert_eq!(m.len(), 3);
        assert_eq!(m.undo().unwrap().text, "C");
        assert_eq!(m.undo().unwrap().text, "B");
        assert!(m.undo().is_err());
    }

    #[test]
    fn test_library_marker() {
        let mut m = UndoManager::new();
        m.push(snap("A"));
        m.push(snap("B").with_library_dir("/tmp/libs"));
        assert!(m.is_next_operation_on_library());
        assert_eq!(m.next_library_dir(), Some(&PathBuf::from("/tmp/libs")));
        m.undo().unwrap();
        assert!(!m.is_next_operation_on_library());
    }
}
