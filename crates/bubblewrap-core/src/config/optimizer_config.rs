//! Subset optimizer configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the budgeted subset optimizer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Integer runtime units per second. Default: 100.
    pub resolution: Option<u32>,
    /// Upper bound on DP table cells. Default: 25_000_000.
    pub max_table_cells: Option<u64>,
}

impl OptimizerConfig {
    pub fn effective_resolution(&self) -> u32 {
        self.resolution.unwrap_or(100)
    }

    pub fn effective_max_table_cells(&self) -> u64 {
        self.max_table_cells.unwrap_or(25_000_000)
    }
}
