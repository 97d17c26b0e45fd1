//! # SchemKit Core
//!
//! Core types and utilities for SchemKit.
//! Provides the error taxonomy, format constants, integer geometry used by
//! hit testing, the per-document drawing configuration, and the shared-state
//! aliases used to guard a drawing against concurrent parse and render.

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod types;

pub use config::DocumentConfig;

pub use error::{Error, HistoryError, LibraryError, ParseError, PrimitiveError, Result};

pub use geometry::{Point, Rect};

// Re-export type aliases for convenience
pub use types::{thread_safe, thread_safe_rw, ThreadSafe, ThreadSafeRw};
