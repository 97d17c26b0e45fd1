//! Error handling for SchemKit
//!
//! Provides error types for every layer of the document engine:
//! - Primitive errors (token-level failures while building one primitive)
//! - Parse errors (per-line diagnostics collected while reading a drawing)
//! - Library errors (structural problems in `.fcl` macro library files)
//! - History errors (undo/redo requested on an exhausted history)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Primitive error type
///
/// Raised while turning a single token list into a primitive. The parser
/// attaches the line number and converts it into a [`ParseError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrimitiveError {
    /// A token that should hold a number could not be read
    #[error("Invalid number '{token}' in {command}")]
    InvalidNumber {
        /// The command being built.
        command: String,
        /// The offending token.
        token: String,
    },

    /// The command has fewer tokens than its kind requires
    #[error("{command} needs at least {expected} tokens, found {found}")]
    MissingArguments {
        /// The command being built.
        command: String,
        /// Minimum number of tokens.
        expected: usize,
        /// Number of tokens present.
        found: usize,
    },

    /// A macro key has no entry in the library
    #[error("Unrecognized macro '{key}'")]
    UnknownMacro {
        /// The lower-cased macro key.
        key: String,
    },

    /// The command is not a primitive kind
    #[error("Unsupported primitive command '{command}'")]
    Unsupported {
        /// The command token.
        command: String,
    },
}

/// Parse error type
///
/// One recoverable diagnostic produced while reading a drawing. Parsing
/// never stops on these; they are collected and handed back to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A numeric field could not be read
    #[error("Invalid number at line {line_number}: {reason}")]
    InvalidNumber {
        /// The 1-based line number.
        line_number: usize,
        /// What could not be read.
        reason: String,
    },

    /// The line is structurally wrong for its command
    #[error("Malformed line {line_number}: {reason}")]
    Malformed {
        /// The 1-based line number.
        line_number: usize,
        /// Why the line was rejected.
        reason: String,
    },

    /// The first token names no known command
    #[error("Unknown command at line {line_number}: {command}")]
    UnknownCommand {
        /// The 1-based line number.
        line_number: usize,
        /// The unrecognized command token.
        command: String,
    },

    /// The line holds more tokens than the parser keeps
    #[error("Too many tokens at line {line_number}: only the first {limit} were kept")]
    TooManyTokens {
        /// The 1-based line number.
        line_number: usize,
        /// The token limit.
        limit: usize,
    },
}

impl ParseError {
    /// Attach a line number to a primitive-level failure.
    pub fn from_primitive(line_number: usize, err: PrimitiveError) -> Self {
        match err {
            PrimitiveError::InvalidNumber { .. } => ParseError::InvalidNumber {
                line_number,
                reason: err.to_string(),
            },
            _ => ParseError::Malformed {
                line_number,
                reason: err.to_string(),
            },
        }
    }

    /// The 1-based line this diagnostic refers to.
    pub fn line_number(&self) -> usize {
        match self {
            ParseError::InvalidNumber { line_number, .. }
            | ParseError::Malformed { line_number, .. }
            | ParseError::UnknownCommand { line_number, .. }
            | ParseError::TooManyTokens { line_number, .. } => *line_number,
        }
    }
}

/// Library error type
///
/// Structural failures while reading a macro library. A failing file is
/// skipped; other files keep loading.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// A `{category` line has no closing brace
    #[error("Category non terminated with }} at line {line_number} of {file}")]
    UnterminatedCategory {
        /// The library file name.
        file: String,
        /// The 1-based line number.
        line_number: usize,
    },

    /// A `[key` line has no closing bracket
    #[error("Macro name non terminated with ] at line {line_number} of {file}")]
    UnterminatedMacro {
        /// The library file name.
        file: String,
        /// The 1-based line number.
        line_number: usize,
    },

    /// The library file could not be read
    #[error("Failed to read library {file}: {source}")]
    Io {
        /// The library file name.
        file: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// History error type
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    /// No earlier state is available
    #[error("Nothing to undo")]
    NothingToUndo,

    /// No later state is available
    #[error("Nothing to redo")]
    NothingToRedo,
}

/// Main error type for SchemKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Primitive error
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),

    /// Parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Library error
    #[error(transparent)]
    Library(#[from] LibraryError),

    /// History error
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_) | Error::Primitive(_))
    }

    /// Check if this is a library error
    pub fn is_library_error(&self) -> bool {
        matches!(self, Error::Library(_))
    }

    /// Check if this is a history error
    pub fn is_history_error(&self) -> bool {
        matches!(self, Error::History(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
