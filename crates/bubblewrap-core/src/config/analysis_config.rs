//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// How module runtimes are bucketed before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Quantization {
    /// Truncate to whole seconds.
    Floor,
    /// Round to `decimals` fractional digits.
    #[default]
    Round,
}

/// Configuration for the module rankers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of slow modules requested (ties may add more). Default: 3.
    pub slowest_count: Option<usize>,
    /// Runtime bucketing strategy. Default: round.
    pub quantization: Option<Quantization>,
    /// Fractional digits kept when rounding. Default: 3.
    pub decimals: Option<u32>,
}

impl AnalysisConfig {
    pub fn effective_slowest_count(&self) -> usize {
        self.slowest_count.unwrap_or(3)
    }

    pub fn effective_quantization(&self) -> Quantization {
        self.quantization.unwrap_or_default()
    }

    pub fn effective_decimals(&self) -> u32 {
        self.decimals.unwrap_or(3)
    }
}
