//! Scanner and coverage-mapping errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Errors raised while discovering files or extracting imports.
/// Any of these aborts the whole mapping phase.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error scanning {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Syntax error in {path}: {message}")]
    Unparseable { path: PathBuf, message: String },

    #[error("Grammar failed to load: {message}")]
    Grammar { message: String },

    #[error("Worker pool failed to start: {message}")]
    WorkerPool { message: String },
}

impl ErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unparseable { .. } | Self::Grammar { .. } => error_code::PARSE_ERROR,
            _ => error_code::SCAN_ERROR,
        }
    }
}
