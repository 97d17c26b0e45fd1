//! Type aliases for shared document state.
//!
//! A drawing is mutated from one logical thread, but parsing must exclude
//! concurrent iteration by a renderer or exporter. These aliases name the
//! lock-wrapped forms used for that.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemkit_core::types::*;
//!
//! let doc: ThreadSafeRw<Drawing> = thread_safe_rw(Drawing::new());
//! doc.write().parse("LI 0 0 10 10 0");
//! for p in doc.read().primitives() { /* render */ }
//! ```

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

// =============================================================================
// THREAD-SAFE SHARED TYPES (Arc<Mutex<T>> / Arc<RwLock<T>>)
// =============================================================================

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex` for better performance than `std::sync::Mutex`.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// A thread-safe read-write lock wrapper.
///
/// Writers (parse, edit, undo) get exclusive access; readers (render,
/// export) may share it.
pub type ThreadSafeRw<T> = Arc<RwLock<T>>;

// =============================================================================
// HELPER CONSTRUCTORS
// =============================================================================

/// Creates a new `ThreadSafe<T>` wrapper.
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}

/// Creates a new `ThreadSafeRw<T>` wrapper.
#[inline]
pub fn thread_safe_rw<T>(value: T) -> ThreadSafeRw<T> {
    Arc::new(RwLock::new(value))
}
