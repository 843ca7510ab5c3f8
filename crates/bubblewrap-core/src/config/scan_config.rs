//! Scan configuration.

use serde::{Deserialize, Serialize};

/// Configuration for file discovery and import mapping.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory names skipped at any depth, on top of the built-in list.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Worker threads for import extraction. 0 = rayon default.
    pub threads: Option<usize>,
}

impl ScanConfig {
    /// Returns the effective thread count, defaulting to 0 (auto).
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }
}
