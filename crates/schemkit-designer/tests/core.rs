#[path = "core/drawing.rs"]
mod drawing;
#[path = "core/library.rs"]
mod library;
#[path = "core/map_coordinates.rs"]
mod map_coordinates;
#[path = "core/parser.rs"]
mod parser;
#[path = "core/selection.rs"]
mod selection;
#[path = "core/undo.rs"]
mod undo;
