//! Module aggregation

use std::path::PathBuf;
use std::sync::Arc;

use crate::coverage::CoverageMap;
use crate::errors::AggregationError;
use crate::execution::{SummaryCache, TestSummary};

/// An application module and the summarized tests that cover it.
///
/// `flake_rate` is the module's total flakes divided by the per-test trial
/// count, and `runtime` its total test seconds divided the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSummary {
    pub name: String,
    pub flake_rate: f64,
    pub runtime: f64,
    pub tests: Vec<Arc<TestSummary>>,
}

impl ModuleSummary {
    /// A summary with precomputed statistics and no test references.
    pub fn from_stats(name: impl Into<String>, flake_rate: f64, runtime: f64) -> Self {
        Self {
            name: name.into(),
            flake_rate,
            runtime,
            tests: Vec::new(),
        }
    }

    /// Aggregate `tests` into a module summary.
    ///
    /// Every test must have run the same, non-zero number of trials.
    pub fn aggregate(
        name: impl Into<String>,
        tests: Vec<Arc<TestSummary>>,
    ) -> Result<Self, AggregationError> {
        let name = name.into();
        let Some(first) = tests.first() else {
            return Err(AggregationError::NoTests { module: name });
        };

        let trials = first.trials;
        if trials == 0 {
            return Err(AggregationError::ZeroTrials { module: name });
        }
        if let Some(odd) = tests.iter().find(|t| t.trials != trials) {
            return Err(AggregationError::TrialMismatch {
                module: name,
                path: odd.path.clone(),
                expected: trials,
                found: odd.trials,
            });
        }

        let flakes: u64 = tests.iter().map(|t| u64::from(t.flake_count)).sum();
        let runtime: f64 = tests.iter().map(|t| t.runtime_sum).sum();
        let trials = f64::from(trials);

        Ok(Self {
            name,
            flake_rate: flakes as f64 / trials,
            runtime: runtime / trials,
            tests,
        })
    }

    pub fn test_paths(&self) -> Vec<PathBuf> {
        self.tests.iter().map(|t| t.path.clone()).collect()
    }
}

/// Build one `ModuleSummary` per module in `coverage`, sharing the cached
/// test summaries rather than copying them.
pub fn summarize_modules(
    coverage: &CoverageMap,
    cache: &SummaryCache,
) -> Result<Vec<ModuleSummary>, AggregationError> {
    coverage
        .iter()
        .map(|(module, paths)| -> Result<ModuleSummary, AggregationError> {
            let tests = paths
                .iter()
                .map(|path| {
                    cache.get(path).ok_or_else(|| AggregationError::MissingSummary {
                        module: module.to_string(),
                        path: path.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let summary = ModuleSummary::aggregate(module, tests)?;
            tracing::debug!(
                module = %summary.name,
                flake_rate = summary.flake_rate,
                runtime = summary.runtime,
                "module summarized"
            );
            Ok(summary)
        })
        .collect()
}
