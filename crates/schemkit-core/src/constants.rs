//! Format constants and documented defaults shared across the workspace.

/// Maximum number of tokens kept from a single line of drawing text.
pub const MAX_TOKENS: usize = 10000;

/// Number of layers in a drawing.
pub const MAX_LAYERS: usize = 16;

/// Tolerance used when comparing configuration values against defaults.
pub const CONFIG_EPSILON: f64 = 1e-5;

// Document configuration defaults

/// Default diameter of connection dots, in logical units.
pub const DEFAULT_CONNECTION_DIAMETER: f64 = 2.0;
/// Default stroke width, in logical units.
pub const DEFAULT_LINE_WIDTH: f64 = 0.5;
/// Default stroke width for circles and ovals.
pub const DEFAULT_LINE_WIDTH_CIRCLES: f64 = 0.35;
/// Font used when a text line names `*` or when writing annotations.
pub const DEFAULT_TEXT_FONT: &str = "Courier New";
/// Size of name/value annotation text.
pub const DEFAULT_TEXT_SIZE: i32 = 3;

// Primitive styles

/// Number of dash styles; valid dash values are `0..DASH_STYLES`.
pub const DASH_STYLES: i32 = 5;
/// Default arrow length.
pub const DEFAULT_ARROW_LENGTH: f64 = 3.0;
/// Default arrow half width.
pub const DEFAULT_ARROW_HALF_WIDTH: f64 = 1.0;
/// Text style bit: bold.
pub const TEXT_BOLD: i32 = 1;
/// Text style bit: italic.
pub const TEXT_ITALIC: i32 = 2;
/// Text style bit: mirrored.
pub const TEXT_MIRRORED: i32 = 4;

// Macros

/// Logical coordinate of a macro's origin inside its own definition.
pub const MACRO_ORIGIN: i32 = 100;
/// Deepest allowed nesting of macro expansions.
pub const MAX_MACRO_DEPTH: usize = 16;

// Hit testing

/// Distance reported for points far from a primitive.
pub const MIN_DISTANCE: i32 = 100;
/// Number of straight segments used to approximate a Bezier curve.
pub const MAX_BEZIER_SEGMENTS: usize = 10;
/// Side of a control point handle, in pixels.
pub const HANDLE_WIDTH: i32 = 10;
/// Extra slack around a handle, in pixels.
pub const HANDLE_INCREASE: i32 = 5;
/// Default selection tolerance, in pixels.
pub const DEFAULT_SELECTION_TOLERANCE: i32 = 10;

// Coordinate mapping

/// Smallest zoom factor.
pub const MIN_MAGNITUDE: f64 = 0.25;
/// Largest zoom factor.
pub const MAX_MAGNITUDE: f64 = 100.0;
/// Default grid step, in logical units.
pub const DEFAULT_GRID_STEP: i32 = 5;

// Undo

/// Default number of snapshots kept by the undo history.
pub const DEFAULT_UNDO_DEPTH: usize = 100;

/// File extension of drawings.
pub const DRAWING_EXTENSION: &str = "fcd";
/// File extension of macro libraries.
pub const LIBRARY_EXTENSION: &str = "fcl";
