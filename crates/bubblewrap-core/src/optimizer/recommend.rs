//! Recommended test subset.

use std::path::PathBuf;

use serde::Serialize;

use super::knapsack::{max_count_subset, shortest_first_subset};
use crate::config::OptimizerConfig;
use crate::errors::OptimizerError;

/// Which of the two partitions was recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendedSet {
    Selected,
    Complement,
}

/// How the selected subset was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsetMethod {
    /// Count table with backtracking.
    Table,
    /// Shortest tests first, used when the table would exceed its cell limit.
    ShortestFirst,
}

/// Outcome of the budgeted subset search. Runtimes are in integer units
/// of `1 / resolution` seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub total_units: u64,
    pub cutoff_units: u64,
    /// Largest set of tests fitting within the cutoff.
    pub selected: Vec<PathBuf>,
    /// Every other test.
    pub complement: Vec<PathBuf>,
    pub choice: RecommendedSet,
    pub recommended: Vec<PathBuf>,
    pub method: SubsetMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsetOptimizer {
    resolution: u32,
    max_table_cells: u64,
}

impl Default for SubsetOptimizer {
    fn default() -> Self {
        Self::from_config(&OptimizerConfig::default())
    }
}

impl SubsetOptimizer {
    pub fn new(resolution: u32, max_table_cells: u64) -> Self {
        Self {
            resolution: resolution.max(1),
            max_table_cells,
        }
    }

    pub fn from_config(config: &OptimizerConfig) -> Self {
        Self::new(
            config.effective_resolution(),
            config.effective_max_table_cells(),
        )
    }

    /// Seconds to integer units, rounded. Negative and NaN become 0.
    pub fn to_units(&self, seconds: f64) -> u64 {
        (seconds * f64::from(self.resolution)).round() as u64
    }

    /// Recommend a subset of `tests` given each test's runtime in seconds.
    ///
    /// Suites too large for the count table within `max_table_cells` are
    /// solved shortest-first instead, which selects the same number of tests.
    pub fn recommend(&self, tests: &[(PathBuf, f64)]) -> Recommendation {
        let weights: Vec<u64> = tests.iter().map(|(_, secs)| self.to_units(*secs)).collect();
        let total_units: u64 = weights.iter().sum();
        let cutoff_units = total_units / 2;

        let (chosen, method) =
            match max_count_subset(&weights, cutoff_units, self.max_table_cells) {
                Ok(chosen) => (chosen, SubsetMethod::Table),
                Err(err @ OptimizerError::TableTooLarge { .. }) => {
                    tracing::warn!(error = %err, "selecting shortest tests first");
                    (
                        shortest_first_subset(&weights, cutoff_units),
                        SubsetMethod::ShortestFirst,
                    )
                }
            };
        let mut in_selected = vec![false; tests.len()];
        for &i in &chosen {
            in_selected[i] = true;
        }

        let (selected, complement): (Vec<_>, Vec<_>) = tests
            .iter()
            .zip(&in_selected)
            .partition(|(_, picked)| **picked);
        let selected: Vec<PathBuf> = selected.into_iter().map(|((p, _), _)| p.clone()).collect();
        let complement: Vec<PathBuf> = complement.into_iter().map(|((p, _), _)| p.clone()).collect();

        // An empty selection would recommend nothing; the complement is every test.
        let choice = if !selected.is_empty() && selected.len() < complement.len() {
            RecommendedSet::Selected
        } else {
            RecommendedSet::Complement
        };
        let recommended = match choice {
            RecommendedSet::Selected => selected.clone(),
            RecommendedSet::Complement => complement.clone(),
        };

        tracing::info!(
            tests = tests.len(),
            total_units,
            cutoff_units,
            selected = selected.len(),
            recommended = recommended.len(),
            method = ?method,
            "subset optimization complete"
        );

        Recommendation {
            total_units,
            cutoff_units,
            selected,
            complement,
            choice,
            recommended,
            method,
        }
    }
}
