//! SchemKit Settings Crate
//!
//! Persistent editor preferences: grid, hit tolerance, undo depth, file
//! handling and the initial zoom factor.

pub mod config;
pub mod error;

pub use config::{
    EditorConfig, FileSettings, GridSettings, HistorySettings, SelectionSettings, ViewSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
