//! Snapshot history for the document.

use std::path::PathBuf;

use schemkit_core::HistoryError;
use tracing::{debug, info};

use super::Document;
use crate::parser::ParseReport;
use crate::undo_manager::UndoSnapshot;

impl Document {
    /// Replaces the whole drawing with `text` and starts a new history
    /// whose only entry is the loaded state.
    pub fn load_text(&mut self, text: &str) -> ParseReport {
        self.drag.cancel(&mut self.drawing);
        let report = self.drawing.parse(text);
        self.modified = false;
        self.history.clear();
        self.save_undo_baseline();
        info!(
            "Loaded drawing: {} primitives, {} diagnostics",
            self.drawing.len(),
            report.diagnostics.len()
        );
        report
    }

    /// Serialized form of the drawing.
    pub fn text(&self, extensions: bool) -> String {
        self.drawing.serialize(extensions)
    }

    /// Records the current drawing as a new undo step and marks the
    /// document modified.
    pub fn save_undo_state(&mut self) {
        self.modified = true;
        let snapshot = UndoSnapshot::new(self.text(true), self.modified, self.file_name.clone());
        self.history.push(snapshot);
    }

    /// Like [`Document::save_undo_state`], for an operation that also
    /// changed the macro library stored in `dir`.
    pub fn save_undo_library(&mut self, dir: impl Into<PathBuf>) {
        self.modified = true;
        let snapshot = UndoSnapshot::new(self.text(true), self.modified, self.file_name.clone())
            .with_library_dir(dir);
        self.history.push(snapshot);
    }

    pub(super) fn save_undo_baseline(&mut self) {
        let snapshot = UndoSnapshot::new(self.text(true), self.modified, self.file_name.clone());
        self.history.push(snapshot);
    }

    /// Steps back one operation.
    ///
    /// At the bottom of the history nothing changes and
    /// [`HistoryError::NothingToUndo`] is returned for callers that care.
    pub fn undo(&mut self) -> Result<(), HistoryError> {
        let library_dir = self.history.next_library_dir().cloned();
        let snapshot = self.history.undo()?.clone();
        self.restore(&snapshot);
        if let Some(dir) = library_dir {
            self.notify_library(&dir);
        }
        debug!("Undo, {} steps left", self.history.undo_count());
        Ok(())
    }

    /// Re-applies the operation last undone.
    pub fn redo(&mut self) -> Result<(), HistoryError> {
        let snapshot = self.history.redo()?.clone();
        self.restore(&snapshot);
        if let Some(dir) = &snapshot.library_dir {
            self.notify_library(dir);
        }
        debug!("Redo, {} steps left", self.history.redo_count());
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Rebuilds the drawing from a snapshot. Layer visibility is view
    /// state and survives the rebuild.
    fn restore(&mut self, snapshot: &UndoSnapshot) {
        self.drag.cancel(&mut self.drawing);
        let visible: Vec<bool> = self.drawing.layers().iter().map(|l| l.visible).collect();
        let report = self.drawing.parse(&snapshot.text);
        for (index, visible) in visible.into_iter().enumerate() {
            if let Some(layer) = self.drawing.layer_mut(index) {
                layer.visible = visible;
            }
        }
        if !report.is_clean() {
            debug!(
                "Restored snapshot with {} diagnostics",
                report.diagnostics.len()
            );
        }
        self.modified = snapshot.modified;
        self.file_name = snapshot.file_name.clone();
    }

    fn notify_library(&self, dir: &std::path::Path) {
        if let Some(listener) = &self.library_listener {
            info!("Restoring library in {}", dir.display());
            listener.restore_library(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::document::LibraryUndoListener;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<PathBuf>>);

    impl LibraryUndoListener for Recorder {
        fn restore_library(&self, dir: &std::path::Path) {
            self.0.lock().unwrap().push(dir.to_path_buf());
        }
    }

    #[test]
    fn test_undo_redo_linear() {
        let mut doc = Document::new();
        doc.load_text("LI 0 0 10 0 0\n");
        doc.drawing_mut().add_text("SA 5 5 0\n", false);
        doc.save_undo_state();
        let after_b = doc.text(true);

        doc.undo().unwrap();
        assert_eq!(doc.text(true), "LI 0 0 10 0 0\n");
        assert!(!doc.is_modified());
        doc.redo().unwrap();
        assert_eq!(doc.text(true), after_b);
        assert!(doc.is_modified());
    }

    #[test]
    fn test_push_after_undo_drops_redo() {
        let mut doc = Document::new();
        doc.load_text("LI 0 0 10 0 0\n");
        doc.drawing_mut().add_text("SA 5 5 0\n", false);
        doc.save_undo_state();
        doc.undo().unwrap();
        doc.drawing_mut().add_text("SA 20 20 0\n", false);
        doc.save_undo_state();
        assert!(!doc.can_redo());
        assert_eq!(doc.redo(), Err(HistoryError::NothingToRedo));
    }

    #[test]
    fn test_undo_at_bottom_is_noop() {
        let mut doc = Document::new();
        doc.load_text("LI 0 0 10 0 0\n");
        assert_eq!(doc.undo(), Err(HistoryError::NothingToUndo));
        assert_eq!(doc.text(true), "LI 0 0 10 0 0\n");
    }

    #[test]
    fn test_library_listener_is_notified() {
        let recorder = Arc::new(Recorder::default());
        let mut doc = Document::new();
        doc.set_library_listener(recorder.clone());
        doc.load_text("");
        doc.drawing_mut().add_text("SA 5 5 0\n", false);
        doc.save_undo_library("/tmp/lib");

        doc.undo().unwrap();
        doc.redo().unwrap();
        let seen = recorder.0.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], PathBuf::from("/tmp/lib"));
    }

    #[test]
    fn test_hidden_layer_stays_hidden_across_undo() {
        let mut doc = Document::new();
        doc.load_text("SA 0 0 0\nSA 50 50 3\n");
        if let Some(layer) = doc.drawing_mut().layer_mut(3) {
            layer.visible = false;
        }
        doc.select_all();
        assert!(doc.move_selected(5, 5));

        doc.undo().unwrap();
        assert_eq!(doc.text(true), "SA 0 0 0\nSA 50 50 3\n");
        assert!(!doc.drawing().is_layer_visible(3));
        assert!(doc.drawing().is_layer_visible(0));

        doc.redo().unwrap();
        assert!(!doc.drawing().is_layer_visible(3));
    }
}
