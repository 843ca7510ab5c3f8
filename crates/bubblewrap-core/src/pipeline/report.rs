//! Analysis report

use std::path::PathBuf;

use serde::Serialize;

use crate::analysis::{ModuleSummary, SlowModule};
use crate::execution::TestSummary;
use crate::optimizer::Recommendation;

/// Per-module line of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleReport {
    pub name: String,
    pub flake_rate: f64,
    pub runtime: f64,
    pub tests: Vec<PathBuf>,
}

impl From<&ModuleSummary> for ModuleReport {
    fn from(module: &ModuleSummary) -> Self {
        Self {
            name: module.name.clone(),
            flake_rate: module.flake_rate,
            runtime: module.runtime,
            tests: module.test_paths(),
        }
    }
}

/// Everything one analysis run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub root: PathBuf,
    pub trials: u32,
    pub max_flake_rate: Option<f64>,
    pub flakiest_modules: Vec<String>,
    pub slowest_modules: Vec<SlowModule>,
    pub recommendation: Recommendation,
    pub modules: Vec<ModuleReport>,
    pub tests: Vec<TestSummary>,
    pub uncovered_modules: Vec<String>,
    /// Tests executed during this run (cached tests are not re-counted).
    pub executed_tests: usize,
    pub duration_ms: u64,
}

impl Report {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Whether the flakiest module is flakier than `threshold`.
    pub fn exceeds_flake_rate(&self, threshold: f64) -> bool {
        self.max_flake_rate.is_some_and(|max| max > threshold)
    }

    /// Tests that could not be executed at all.
    pub fn failed_to_run(&self) -> impl Iterator<Item = &TestSummary> {
        self.tests.iter().filter(|t| t.is_execution_error())
    }
}
