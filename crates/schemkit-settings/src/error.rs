//! Error types for the settings crate.

use std::io;
use thiserror::Error;

/// Errors that can occur while loading or saving editor preferences.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// No platform folder for preferences could be found.
    #[error("No settings directory: {0}")]
    ConfigDirectory(String),

    /// Reading or writing the preferences file failed.
    #[error("Settings file access failed: {0}")]
    Io(#[from] io::Error),

    /// A `.json` preferences file is malformed.
    #[error("Malformed JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    /// A `.toml` preferences file is malformed.
    #[error("Malformed TOML settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The preferences could not be written as TOML.
    #[error("Cannot write TOML settings: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// The preferences failed validation.
    #[error("Invalid settings: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to preference validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file extension is neither `json` nor `toml`.
    #[error("Settings files must be .json or .toml, not '{0}'")]
    UnsupportedFormat(String),

    /// A value is outside its valid range.
    #[error("{key} = {value} is out of range")]
    ValueOutOfRange { key: String, value: String },
}

impl ConfigError {
    pub(crate) fn out_of_range(key: &str, value: impl ToString) -> Self {
        Self::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
