//! Error types for Curricula.
//!
//! Library crates use [`CurriculaError`] via `thiserror`.
//! The CLI app wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Curricula operations.
#[derive(Debug, thiserror::Error)]
pub enum CurriculaError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Structured-text parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (schema mismatch, invalid manifest, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Tabular (CSV) rendering error.
    #[error("csv error: {0}")]
    Csv(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CurriculaError>;

impl CurriculaError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = CurriculaError::config("missing output directory");
        assert_eq!(err.to_string(), "config error: missing output directory");

        let err = CurriculaError::validation("schema_version 99 not supported");
        assert!(err.to_string().contains("schema_version 99"));
    }
}
