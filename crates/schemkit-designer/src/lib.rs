//! # SchemKit Designer
//!
//! The drawing-document engine: reads the line-oriented sketch format into
//! layered primitives, lets an editor select, drag and transform them, and
//! writes them back without loss.
//!
//! ## Core Components
//!
//! - **Model**: the closed set of primitive kinds and their text forms
//! - **Parser**: one-line lookahead reader with `FCJ` extensions and
//!   name/value `TY` binding
//! - **Drawing**: the layer-sorted primitive store and its layer table
//! - **MapCoordinates**: logical to device mapping, zoom and snapping
//! - **Grid**: integer-exact grid tiling for any zoom factor
//! - **Undo**: bounded history of serialized snapshots
//! - **Selection / Drag**: pointer gestures turned into edits
//! - **Document**: the editing facade combining all of the above
//!
//! ## Architecture
//!
//! ```text
//! text --> DocumentParser --> Drawing --> serialize --> text
//!                               ^  |
//!            DragController ----+  +----> UndoManager (text snapshots)
//!                               |
//!                        MapCoordinates (device <-> logical)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemkit_designer::Document;
//!
//! let mut doc = Document::new();
//! let report = doc.load_text("LI 0 0 10 10 0\nFCJ 1 0 3 1 0 0\n");
//! assert!(report.is_clean());
//! doc.select_all();
//! doc.rotate_selected(true);
//! doc.undo()?;
//! ```

pub mod document;
pub mod drag_controller;
pub mod drawing;
pub mod grid;
pub mod layers;
pub mod library;
pub mod map_coordinates;
pub mod model;
pub mod parser;
pub mod selection_manager;
pub mod undo_manager;

pub use document::{Document, LibraryUndoListener, SharedDocument};
pub use drag_controller::{DragController, DragKind, DragOutcome, DragPhase, Marquee};
pub use drawing::{Drawing, SharedDrawing};
pub use grid::{GridPattern, GridPlan, GridTile};
pub use layers::{standard_layers, LayerColor, LayerDescriptor};
pub use library::{read_library, LibraryLoadReport, MacroDescriptor, MacroLibrary};
pub use map_coordinates::MapCoordinates;
pub use model::{Primitive, PrimitiveKind, PrimitiveShape, Shape};
pub use parser::{DocumentParser, ParseReport};
pub use selection_manager::SelectionManager;
pub use undo_manager::{UndoManager, UndoSnapshot};
