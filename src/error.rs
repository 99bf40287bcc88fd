//! C9: the top-level error type.
//!
//! Most terminfo-source problems are diagnostics (see [`crate::diagnostics`]),
//! not errors — `CompileError` is reserved for conditions that abort the
//! whole run before a diagnostic stream is even meaningful: bad CLI usage,
//! an unreadable input, or an output root that cannot be created.
//! Hand-rolled `Display`/`Error`, matching the teacher crate's `bits::Error`
//! and `read::Error` rather than reaching for `thiserror`.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CompileError {
    /// Wrong number of CLI arguments.
    Usage,
    /// The input source file could not be opened.
    OpenInput { path: PathBuf, source: io::Error },
    /// The output directory could not be created or is not a directory.
    OutputRoot { path: PathBuf, source: io::Error },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Usage => write!(f, "usage: rtic <source-file|-> <output-dir>"),
            CompileError::OpenInput { path, source } => {
                write!(f, "cannot open input {}: {source}", path.display())
            }
            CompileError::OutputRoot { path, source } => {
                write!(f, "cannot create output directory {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Usage => None,
            CompileError::OpenInput { source, .. } | CompileError::OutputRoot { source, .. } => {
                Some(source)
            }
        }
    }
}
