//! Module aggregation precondition violations.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Raised when a module's test summaries cannot be averaged honestly.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error("Module {module} has no covering tests")]
    NoTests { module: String },

    #[error("Module {module} references {path}, which has no summary")]
    MissingSummary { module: String, path: PathBuf },

    #[error("Module {module} has tests with zero trials")]
    ZeroTrials { module: String },

    #[error("Module {module} mixes trial counts: {path} ran {found} trials, expected {expected}")]
    TrialMismatch {
        module: String,
        path: PathBuf,
        expected: u32,
        found: u32,
    },
}

impl ErrorCode for AggregationError {
    fn error_code(&self) -> &'static str {
        error_code::AGGREGATION_ERROR
    }
}
