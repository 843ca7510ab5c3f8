//! Subset optimizer errors.

use super::error_code::{self, ErrorCode};

/// Errors from the count table. `SubsetOptimizer` recovers from these by
/// selecting shortest-first; empty input and a zero cutoff are not errors.
#[derive(Debug, thiserror::Error)]
pub enum OptimizerError {
    #[error("DP table of {cells} cells exceeds the limit of {max_cells}")]
    TableTooLarge { cells: u128, max_cells: u64 },
}

impl ErrorCode for OptimizerError {
    fn error_code(&self) -> &'static str {
        error_code::OPTIMIZER_ERROR
    }
}
