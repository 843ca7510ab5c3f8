//! Execution types

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Minimum pass rate for a test's majority verdict to be "passed".
pub const PASS_THRESHOLD: f64 = 0.75;

/// A test file to execute, relative to the project it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestCase {
    pub path: PathBuf,
    pub project_root: PathBuf,
}

impl TestCase {
    pub fn new(path: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            project_root: project_root.into(),
        }
    }
}

/// Result of one invocation of a test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    pub passed: bool,
    pub elapsed: Duration,
    /// The trial was killed for exceeding its timeout.
    pub timed_out: bool,
}

impl TrialOutcome {
    pub fn passed(elapsed: Duration) -> Self {
        Self {
            passed: true,
            elapsed,
            timed_out: false,
        }
    }

    pub fn failed(elapsed: Duration) -> Self {
        Self {
            passed: false,
            elapsed,
            timed_out: false,
        }
    }

    pub fn timed_out(elapsed: Duration) -> Self {
        Self {
            passed: false,
            elapsed,
            timed_out: true,
        }
    }
}

/// Aggregate of every trial of one test.
///
/// A flake is a trial whose outcome disagrees with the majority verdict:
/// failures of a passing test, passes of a failing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSummary {
    pub path: PathBuf,
    pub trials: u32,
    pub pass_count: u32,
    pub fail_count: u32,
    pub flake_count: u32,
    pub timeout_count: u32,
    pub pass_rate: f64,
    pub fail_rate: f64,
    pub flake_rate: f64,
    /// Seconds spent across all trials.
    pub runtime_sum: f64,
    /// Mean seconds per trial.
    pub avg_runtime: f64,
    pub passed: bool,
    /// Why the test could not be executed, if it could not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestSummary {
    /// Summarize the outcomes of every trial of `path`.
    pub fn from_trials(path: impl Into<PathBuf>, outcomes: &[TrialOutcome]) -> Self {
        let trials = outcomes.len() as u32;
        let pass_count = outcomes.iter().filter(|o| o.passed).count() as u32;
        let timeout_count = outcomes.iter().filter(|o| o.timed_out).count() as u32;
        let runtime_sum: f64 = outcomes.iter().map(|o| o.elapsed.as_secs_f64()).sum();
        Self::from_counts(path.into(), trials, pass_count, timeout_count, runtime_sum, None)
    }

    /// A test that could not be started: every trial counts as failed.
    pub fn failed_to_run(path: impl Into<PathBuf>, trials: u32, error: impl Into<String>) -> Self {
        Self::from_counts(path.into(), trials, 0, 0, 0.0, Some(error.into()))
    }

    fn from_counts(
        path: PathBuf,
        trials: u32,
        pass_count: u32,
        timeout_count: u32,
        runtime_sum: f64,
        error: Option<String>,
    ) -> Self {
        let fail_count = trials - pass_count;
        let ratio = |count: u32| {
            if trials == 0 {
                0.0
            } else {
                f64::from(count) / f64::from(trials)
            }
        };

        let pass_rate = ratio(pass_count);
        let passed = trials > 0 && pass_rate >= PASS_THRESHOLD;
        let flake_count = if passed { fail_count } else { pass_count };

        Self {
            path,
            trials,
            pass_count,
            fail_count,
            flake_count,
            timeout_count,
            pass_rate,
            fail_rate: ratio(fail_count),
            flake_rate: ratio(flake_count),
            runtime_sum,
            avg_runtime: if trials == 0 {
                0.0
            } else {
                runtime_sum / f64::from(trials)
            },
            passed,
            error,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the test failed to start rather than ran and failed.
    pub fn is_execution_error(&self) -> bool {
        self.error.is_some()
    }
}
