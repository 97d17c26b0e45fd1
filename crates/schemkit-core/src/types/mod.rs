//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Type aliases for `Arc<RwLock<T>>` and `Arc<Mutex<T>>` sharing.

pub mod aliases;

pub use aliases::*;
