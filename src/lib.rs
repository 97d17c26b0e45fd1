//! # SchemKit
//!
//! A drawing-document engine for schematic and PCB sketches stored in the
//! line-oriented `.fcd` text format.
//!
//! ## Architecture
//!
//! SchemKit is organized as a workspace with multiple crates:
//!
//! 1. **schemkit-core** - Error taxonomy, format constants, integer geometry, document configuration
//! 2. **schemkit-designer** - Parser, layered primitive store, coordinate mapping, undo, selection and drag
//! 3. **schemkit-settings** - Persistent editor preferences
//! 4. **schemkit** - Command-line front end that integrates all crates
//!
//! ## Features
//!
//! - **Lossless round trip**: parse then serialize reproduces the drawing,
//!   including `FCJ` extension lines and the `FJC` header
//! - **Macros**: `.fcl` libraries expanded on load, layers tracked exactly
//! - **Editing**: snapshot undo/redo, rubber-band selection, handle drags

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

pub use schemkit_core::{
    DocumentConfig, Error, HistoryError, LibraryError, ParseError, Point, PrimitiveError, Rect,
    Result,
};

pub use schemkit_designer::{
    Document, DocumentParser, DragController, Drawing, MacroLibrary, MapCoordinates, ParseReport,
    Primitive, PrimitiveKind, SelectionManager, SharedDocument, UndoManager,
};

pub use schemkit_settings::{EditorConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging on stderr with:
/// - `RUST_LOG` environment variable support, INFO by default
/// - pretty formatting, or one JSON object per event when `json` is set
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .json();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

/// Builds an empty document configured from the editor preferences.
///
/// Macro libraries are read from the preference folders followed by
/// `extra_library_dirs`. A folder that cannot be listed is an error; a
/// broken library file inside it is logged and skipped.
pub fn document_from_settings(
    settings: &EditorConfig,
    extra_library_dirs: &[PathBuf],
) -> anyhow::Result<Document> {
    let mut library = MacroLibrary::new();
    for dir in settings.files.library_dirs.iter().chain(extra_library_dirs) {
        let report = library
            .load_dir(dir)
            .with_context(|| format!("Failed to read library folder {}", dir.display()))?;
        tracing::debug!(
            "{}: {} libraries loaded, {} skipped",
            dir.display(),
            report.loaded.len(),
            report.failed.len()
        );
    }

    let mut doc = Document::with_library(Arc::new(library))
        .with_history_depth(settings.history.undo_depth)
        .with_selection_tolerance(settings.selection.tolerance_px);

    let map = doc.map_mut();
    map.set_x_grid_step(settings.grid.step_x);
    map.set_y_grid_step(settings.grid.step_y);
    map.set_snap(settings.grid.snap);
    map.set_magnitudes(settings.view.magnitude, settings.view.magnitude);

    Ok(doc)
}
