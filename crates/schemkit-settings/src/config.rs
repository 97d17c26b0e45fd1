//! Editor preferences for SchemKit
//!
//! Preferences are grouped into sections:
//! - Grid (step and snapping)
//! - Selection (pointer hit tolerance)
//! - History (undo depth)
//! - Files (FCJ extensions on save, macro library folders, recent files)
//! - View (initial zoom factor)
//!
//! Files are JSON or TOML, chosen by extension.

use std::path::{Path, PathBuf};

use schemkit_core::constants::{
    DEFAULT_GRID_STEP, DEFAULT_SELECTION_TOLERANCE, DEFAULT_UNDO_DEPTH, MAX_MAGNITUDE,
    MIN_MAGNITUDE,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, SettingsError, SettingsResult};

const RECENT_FILES_COUNT: usize = 10;
const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Horizontal grid step, in logical units
    pub step_x: i32,
    /// Vertical grid step, in logical units
    pub step_y: i32,
    /// Snap pointer positions to the grid
    pub snap: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            step_x: DEFAULT_GRID_STEP,
            step_y: DEFAULT_GRID_STEP,
            snap: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Hit tolerance in device pixels
    pub tolerance_px: i32,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            tolerance_px: DEFAULT_SELECTION_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub undo_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            undo_depth: DEFAULT_UNDO_DEPTH,
        }
    }
}

/// File handling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Write FCJ extension lines and the FJC header when saving
    pub extensions_on_save: bool,
    /// Folders scanned for `.fcl` macro libraries
    pub library_dirs: Vec<PathBuf>,
    /// Most recent first
    pub recent_files: Vec<PathBuf>,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            extensions_on_save: true,
            library_dirs: Vec::new(),
            recent_files: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Zoom factor applied to a freshly opened drawing
    pub magnitude: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self { magnitude: 1.0 }
    }
}

/// Complete editor configuration
///
/// Aggregates all sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    pub grid: GridSettings,
    pub selection: SelectionSettings,
    pub history: HistorySettings,
    pub files: FileSettings,
    pub view: ViewSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform configuration directory for SchemKit.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("schemkit"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Default location of the settings file.
    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(SETTINGS_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        debug!("Loaded editor settings from {}", path.display());
        Ok(config)
    }

    /// Loads the file at `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent folders.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        info!("Saved editor settings to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.step_x <= 0 {
            return Err(ConfigError::out_of_range("grid.step_x", self.grid.step_x));
        }
        if self.grid.step_y <= 0 {
            return Err(ConfigError::out_of_range("grid.step_y", self.grid.step_y));
        }
        if self.selection.tolerance_px < 0 {
            return Err(ConfigError::out_of_range(
                "selection.tolerance_px",
                self.selection.tolerance_px,
            ));
        }
        if self.history.undo_depth == 0 {
            return Err(ConfigError::out_of_range("history.undo_depth", 0));
        }
        let magnitude = self.view.magnitude;
        if !(MIN_MAGNITUDE..=MAX_MAGNITUDE).contains(&magnitude) {
            return Err(ConfigError::out_of_range("view.magnitude", magnitude));
        }
        Ok(())
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.files.recent_files.retain(|f| f != &path);
        self.files.recent_files.insert(0, path);
        self.files.recent_files.truncate(RECENT_FILES_COUNT);
    }

    /// Adds a library folder unless it is already listed.
    pub fn add_library_dir(&mut self, dir: PathBuf) {
        if !self.files.library_dirs.contains(&dir) {
            self.files.library_dirs.push(dir);
        }
    }
}
