//! Error handling for the extraction engine

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while extracting a symbol model.
///
/// Lines that do not match a recognized shape are never errors; the scanners
/// simply skip them. Only unreadable inputs and broken preconditions abort a run.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LuagenError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "{path}:{line}: aggregate '{second}' opened after '{first}'; \
         declaration files must define a single top-level aggregate"
    )]
    MultipleAggregates {
        path: PathBuf,
        line: usize,
        first: String,
        second: String,
    },

    #[error("Source not found: {path}")]
    NotFound { path: PathBuf },
}

impl LuagenError {
    /// Create a new I/O error bound to the file that failed
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new not found error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }
}

/// Result type alias for convenience
pub type LuagenResult<T> = Result<T, LuagenError>;
