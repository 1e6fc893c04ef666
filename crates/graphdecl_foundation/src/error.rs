//! Error types for graphdecl.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// The main error type for graphdecl operations.
#[derive(Debug, Error)]
#[error("{kind}{}", .context.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Attaches a source file to this error, keeping any existing position.
    #[must_use]
    pub fn in_file(mut self, path: &Path) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_source(path.display().to_string()));
        self
    }

    /// Creates an I/O error for the given path.
    #[must_use]
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    /// Creates a parse error at a position.
    #[must_use]
    pub fn parse(message: impl Into<String>, line: u32, column: u32, context: String) -> Self {
        Self::new(ErrorKind::ParseError {
            message: message.into(),
            line,
            column,
            context,
        })
    }

    /// Creates an unsupported-construct error.
    #[must_use]
    pub fn unsupported(what: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unsupported {
            what: what.into(),
            value: value.into(),
        })
    }

    /// Creates a dependency cycle error.
    #[must_use]
    pub fn cycle(remaining: Vec<String>) -> Self {
        Self::new(ErrorKind::Cycle { remaining })
    }

    /// Creates a usage error.
    #[must_use]
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage(message.into()))
    }

    /// Creates an invalid structured document error.
    #[must_use]
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDocument(message.into()))
    }

    /// Returns true if this is a parse error.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self.kind, ErrorKind::ParseError { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A file or directory could not be read or written.
    #[error("i/o error on {path}: {message}")]
    Io {
        /// The path involved.
        path: String,
        /// The underlying error message.
        message: String,
    },

    /// Malformed declaration source.
    #[error("parse error at {line}:{column}: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// A constraint, index, or format value that cannot be rendered.
    #[error("unsupported {what}: {value}")]
    Unsupported {
        /// The kind of construct (e.g. "constraint type").
        what: String,
        /// The offending value.
        value: String,
    },

    /// The dependency graph contains a cycle.
    #[error("dependency cycle detected among: {}", .remaining.join(", "))]
    Cycle {
        /// Resources that could not be ordered.
        remaining: Vec<String>,
    },

    /// The operation was invoked with incompatible arguments.
    #[error("usage error: {0}")]
    Usage(String),

    /// A structured document could not be decoded.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<u32>,
    /// Column number in source.
    pub column: Option<u32>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source, self.line, self.column) {
            (Some(source), Some(line), Some(col)) => write!(f, "at {source}:{line}:{col}"),
            (Some(source), _, _) => write!(f, "at {source}"),
            (None, Some(line), Some(col)) => write!(f, "at {line}:{col}"),
            _ => Ok(()),
        }
    }
}

/// Result alias used throughout graphdecl.
pub type Result<T> = std::result::Result<T, Error>;
