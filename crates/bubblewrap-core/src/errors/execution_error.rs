//! Test execution errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Errors from a single test invocation. These never abort a run: the
/// coordinator records them on the affected test's summary.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Failed to start {program} for {path}: {source}")]
    SpawnFailed {
        program: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed waiting on test process for {path}: {source}")]
    WaitFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ErrorCode for ExecutionError {
    fn error_code(&self) -> &'static str {
        error_code::EXECUTION_ERROR
    }
}
