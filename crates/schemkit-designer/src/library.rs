//! Macro libraries.
//!
//! A library maps a lower-case key to the text body of a reusable symbol.
//! Libraries are read from `.fcl` files:
//!
//! ```text
//! [FIDOLIB Standard library]
//! {Passive components}
//! [RES Resistor]
//! LI 100 100 110 100 0
//! RV 110 98 125 102 0
//! ```
//!
//! `{...}` opens a category, `[KEY long name]` opens a macro and every other
//! line is appended to the current macro's body. Keys outside the standard
//! library get the file stem as prefix (`ihram.res`).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use schemkit_core::constants::LIBRARY_EXTENSION;
use schemkit_core::LibraryError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// File stem of the standard library, whose keys carry no prefix.
pub const STANDARD_LIBRARY_STEM: &str = "FCDstdlib";

/// One library symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDescriptor {
    /// Lower-case lookup key, including the file prefix.
    pub key: String,
    /// Display name.
    pub name: String,
    pub category: String,
    /// Display name of the owning library (`FIDOLIB`).
    pub library: String,
    /// Prefix derived from the library file name.
    pub file_name: String,
    /// Drawing text of the symbol.
    pub body: String,
}

/// Key to descriptor mapping shared by every drawing that uses it.
#[derive(Debug, Clone, Default)]
pub struct MacroLibrary {
    macros: BTreeMap<String, MacroDescriptor>,
}

/// Outcome of loading a directory of libraries.
#[derive(Debug, Default)]
pub struct LibraryLoadReport {
    pub loaded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, LibraryError)>,
}

impl MacroLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a macro; keys are matched case-insensitively.
    pub fn get(&self, key: &str) -> Option<&MacroDescriptor> {
        self.macros
            .get(key)
            .or_else(|| self.macros.get(&key.to_lowercase()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn insert(&mut self, descriptor: MacroDescriptor) {
        let key = descriptor.key.to_lowercase();
        self.macros.insert(key, descriptor);
    }

    pub fn extend(&mut self, descriptors: impl IntoIterator<Item = MacroDescriptor>) {
        for d in descriptors {
            self.insert(d);
        }
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MacroDescriptor> {
        self.macros.values()
    }

    /// Names of the categories present, in key order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for d in self.macros.values() {
            if !out.contains(&d.category) {
                out.push(d.category.clone());
            }
        }
        out
    }

    /// Reads one library file and adds its macros.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, LibraryError> {
        let file_label = path.display().to_string();
        let file = File::open(path).map_err(|source| LibraryError::Io {
            file: file_label.clone(),
            source,
        })?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let prefix = library_prefix(&stem);
        let descriptors = read_library(BufReader::new(file), &prefix, &file_label)?;
        let count = descriptors.len();
        self.extend(descriptors);
        info!("Loaded {} macros from {}", count, file_label);
        Ok(count)
    }

    /// Reads every `.fcl` file in a directory. A failing file is reported
    /// and skipped.
    pub fn load_dir(&mut self, dir: &Path) -> Result<LibraryLoadReport, LibraryError> {
        let entries = std::fs::read_dir(dir).map_err(|source| LibraryError::Io {
            file: dir.display().to_string(),
            source,
        })?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(LIBRARY_EXTENSION))
            })
            .collect();
        paths.sort();

        let mut report = LibraryLoadReport::default();
        for path in paths {
            match self.load_file(&path) {
                Ok(_) => report.loaded.push(path),
                Err(e) => {
                    warn!("Skipping library {}: {}", path.display(), e);
                    report.failed.push((path, e));
                }
            }
        }
        Ok(report)
    }
}

/// Key prefix for a library file stem.
pub fn library_prefix(stem: &str) -> String {
    if stem == STANDARD_LIBRARY_STEM {
        String::new()
    } else {
        stem.to_string()
    }
}

/// Parses library text.
///
/// # Arguments
///
/// * `reader` - Source of the library text
/// * `prefix` - Key prefix, empty for the standard library
/// * `file_name` - Used in error messages
///
/// # Errors
///
/// Fails on an unterminated `{category` or `[key` line, or on I/O failure.
pub fn read_library<R: BufRead>(
    reader: R,
    prefix: &str,
    file_name: &str,
) -> Result<Vec<MacroDescriptor>, LibraryError> {
    let mut out: Vec<MacroDescriptor> = Vec::new();
    let mut category = String::new();
    let mut library_name = String::new();
    let mut current: Option<MacroDescriptor> = None;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| LibraryError::Io {
            file: file_name.to_string(),
            source,
        })?;
        let line = line.trim();
        if line.chars().count() <= 1 {
            continue;
        }

        if let Some(rest) = line.strip_prefix('{') {
            let Some(end) = rest.find('}') else {
                return Err(LibraryError::UnterminatedCategory {
                    file: file_name.to_string(),
                    line_number,
                });
            };
            category = rest[..end].trim().to_string();
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let Some(end) = rest.find(']') else {
                return Err(LibraryError::UnterminatedMacro {
                    file: file_name.to_string(),
                    line_number,
                });
            };
            let header = &rest[..end];
            let (key, long_name) = match header.find(' ') {
                Some(split) => (&header[..split], header[split..].trim()),
                None => (header, ""),
            };
            if key == "FIDOLIB" {
                library_name = long_name.to_string();
                continue;
            }
            if let Some(done) = current.take() {
                out.push(done);
            }
            let key = if prefix.is_empty() {
                key.to_string()
            } else {
                format!("{}.{}", prefix, key)
            };
            current = Some(MacroDescriptor {
                key: key.to_lowercase(),
                name: long_name.to_string(),
                category: category.clone(),
                library: library_name.clone(),
                file_name: prefix.to_string(),
                body: String::new(),
            });
            continue;
        }

        if let Some(macro_desc) = current.as_mut() {
            if !macro_desc.body.is_empty() {
                macro_desc.body.push('\n');
            }
            macro_desc.body.push_str(line);
        }
    }
    if let Some(done) = current.take() {
        out.push(done);
    }
    Ok(out)
}
