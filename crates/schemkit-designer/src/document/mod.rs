//! Editing facade over a drawing.
//!
//! A [`Document`] ties together the pieces an editor works with:
//! - the [`Drawing`] itself
//! - the view mapping used to interpret pointer positions
//! - the undo history of serialized snapshots
//! - selection and drag state
//! - the file name and the modified flag
//!
//! This module is split by concern:
//! - `history`: loading text, undo snapshots, undo and redo
//! - `editing`: rotate, mirror, move, delete, layer changes, paste
//! - `interaction`: clicks, drags and marquee selection
//! - `file_io`: reading and writing `.fcd` files

mod editing;
mod file_io;
mod history;
mod interaction;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use schemkit_core::ThreadSafeRw;

use crate::drag_controller::DragController;
use crate::drawing::Drawing;
use crate::library::MacroLibrary;
use crate::map_coordinates::MapCoordinates;
use crate::selection_manager::SelectionManager;
use crate::undo_manager::UndoManager;

/// A document shared between the editing thread and renderers.
pub type SharedDocument = ThreadSafeRw<Document>;

/// Restores macro libraries when an undo or redo crosses a library
/// operation. The history only records the directory; putting the files
/// back is up to the implementor.
pub trait LibraryUndoListener: Send + Sync {
    fn restore_library(&self, dir: &Path);
}

pub struct Document {
    drawing: Drawing,
    map: MapCoordinates,
    history: UndoManager,
    selection: SelectionManager,
    drag: DragController,
    file_name: Option<PathBuf>,
    modified: bool,
    library_listener: Option<Arc<dyn LibraryUndoListener>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("primitives", &self.drawing.len())
            .field("file_name", &self.file_name)
            .field("modified", &self.modified)
            .field("undo_count", &self.history.undo_count())
            .field("redo_count", &self.history.redo_count())
            .field("library_listener", &self.library_listener.is_some())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document without a macro library.
    pub fn new() -> Self {
        Self::with_library(Arc::new(MacroLibrary::new()))
    }

    pub fn with_library(library: Arc<MacroLibrary>) -> Self {
        let selection = SelectionManager::new();
        let mut doc = Self {
            drawing: Drawing::with_library(library),
            map: MapCoordinates::new(),
            history: UndoManager::new(),
            drag: DragController::new(selection.clone()),
            selection,
            file_name: None,
            modified: false,
            library_listener: None,
        };
        doc.save_undo_baseline();
        doc
    }

    /// Replaces the history with an empty one of the given depth.
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history = UndoManager::with_depth(depth);
        self.save_undo_baseline();
        self
    }

    /// Sets the pointer hit tolerance, in device pixels.
    pub fn with_selection_tolerance(mut self, tolerance_px: i32) -> Self {
        self.set_selection_tolerance(tolerance_px);
        self
    }

    pub fn set_selection_tolerance(&mut self, tolerance_px: i32) {
        self.selection.set_tolerance_px(tolerance_px);
        self.drag = DragController::new(self.selection.clone());
    }

    pub fn set_library_listener(&mut self, listener: Arc<dyn LibraryUndoListener>) {
        self.library_listener = Some(listener);
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// Direct access to the drawing. Changes made through it are not
    /// recorded until [`Document::save_undo_state`] is called.
    pub fn drawing_mut(&mut self) -> &mut Drawing {
        &mut self.drawing
    }

    pub fn map(&self) -> &MapCoordinates {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut MapCoordinates {
        &mut self.map
    }

    pub fn history(&self) -> &UndoManager {
        &self.history
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, file_name: Option<PathBuf>) {
        self.file_name = file_name;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// Replaces the library used for macro expansion by later parses.
    pub fn set_library(&mut self, library: Arc<MacroLibrary>) {
        self.drawing.set_library(library);
    }
}
