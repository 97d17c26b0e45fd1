//! File I/O operations (open, save) for the document.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use super::Document;
use crate::parser::ParseReport;

impl Document {
    /// Load a drawing from file, replacing the current one.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<ParseReport> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read drawing {}", path.display()))?;
        let report = self.load_text(&text);
        for diagnostic in &report.diagnostics {
            warn!("{}: {}", path.display(), diagnostic);
        }
        self.file_name = Some(path.to_path_buf());
        Ok(report)
    }

    /// Save the drawing to file, with the `[FIDOCAD]` marker line.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>, extensions: bool) -> anyhow::Result<()> {
        let path = path.as_ref();
        let mut text = String::from("[FIDOCAD]\n");
        text.push_str(&self.text(extensions));
        fs::write(path, text)
            .with_context(|| format!("Failed to write drawing {}", path.display()))?;
        self.file_name = Some(path.to_path_buf());
        self.modified = false;
        info!("Saved drawing to {}", path.display());
        Ok(())
    }
}
