//! Pipeline errors.

use super::error_code::ErrorCode;
use super::{AggregationError, ConfigError, ScanError};

/// Phase-level failures that halt a run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Aggregation error: {0}")]
    Aggregation(#[from] AggregationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Aggregation(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
