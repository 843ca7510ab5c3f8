//! Execution coordinator - repeated execution with at-most-once caching
//!
//! Pending tests fan out over a worker pool when `jobs > 1`; summaries are
//! inserted into the cache by a single reducer afterwards. Every trial is
//! its own process, so concurrent tests never share a working directory or
//! output stream.

use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;

use super::cache::SummaryCache;
use super::executor::TestExecutor;
use super::types::{TestCase, TestSummary, TrialOutcome};
use crate::coverage::CoverageMap;
use crate::errors::ErrorCode;
use crate::events::types::{ErrorEvent, TestCachedEvent, TestFinishedEvent, TestStartedEvent};
use crate::events::EventDispatcher;

pub struct ExecutionCoordinator<'a, E: TestExecutor + ?Sized> {
    executor: &'a E,
    project_root: PathBuf,
    trials: u32,
    jobs: usize,
    dispatcher: EventDispatcher,
}

impl<'a, E: TestExecutor + ?Sized> ExecutionCoordinator<'a, E> {
    pub fn new(executor: &'a E, project_root: impl Into<PathBuf>, trials: u32) -> Self {
        Self {
            executor,
            project_root: project_root.into(),
            trials,
            jobs: 1,
            dispatcher: EventDispatcher::new(),
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: EventDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    /// Execute every test referenced by `coverage` that is not cached yet.
    /// Returns the number of tests actually executed.
    pub fn run(&self, coverage: &CoverageMap, cache: &mut SummaryCache) -> usize {
        let start = Instant::now();
        let mut pending = Vec::new();
        for path in coverage.unique_tests() {
            if cache.contains(&path) {
                tracing::debug!(path = %path.display(), "already ran test");
                self.dispatcher.emit_test_cached(&TestCachedEvent { path });
            } else {
                pending.push(TestCase::new(path, self.project_root.clone()));
            }
        }

        tracing::info!(
            tests = pending.len(),
            trials = self.trials,
            jobs = self.jobs,
            "executing tests"
        );

        let summaries = self.execute_all(&pending);
        let executed = summaries.len();
        for summary in summaries {
            cache.insert(summary);
        }

        tracing::info!(
            executed,
            duration_ms = start.elapsed().as_millis() as u64,
            "test execution complete"
        );
        executed
    }

    fn execute_all(&self, pending: &[TestCase]) -> Vec<TestSummary> {
        if self.jobs > 1 && pending.len() > 1 {
            match rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build() {
                Ok(pool) => {
                    return pool.install(|| pending.par_iter().map(|t| self.run_test(t)).collect())
                }
                Err(e) => {
                    tracing::warn!(error = %e, "worker pool unavailable; running tests sequentially");
                }
            }
        }
        pending.iter().map(|t| self.run_test(t)).collect()
    }

    /// Run all trials of one test. A test that cannot be started is
    /// recorded as fully failed; its siblings are unaffected.
    pub fn run_test(&self, case: &TestCase) -> TestSummary {
        self.dispatcher.emit_test_started(&TestStartedEvent {
            path: case.path.clone(),
            trials: self.trials,
        });
        tracing::info!(path = %case.path.display(), "running test");

        let mut outcomes: Vec<TrialOutcome> = Vec::with_capacity(self.trials as usize);
        let mut failure = None;
        for _ in 0..self.trials {
            match self.executor.execute(&case.path, &case.project_root) {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        let summary = match failure {
            None => TestSummary::from_trials(case.path.clone(), &outcomes),
            Some(err) => {
                tracing::warn!(path = %case.path.display(), error = %err, "test could not be executed");
                self.dispatcher.emit_error(&ErrorEvent {
                    message: err.to_string(),
                    error_code: err.error_code().to_string(),
                });
                TestSummary::failed_to_run(case.path.clone(), self.trials, err.to_string())
            }
        };

        if summary.passed {
            tracing::info!(
                path = %summary.path.display(),
                pass_rate = summary.pass_rate,
                flake_rate = summary.flake_rate,
                "test PASSED"
            );
        } else {
            tracing::warn!(
                path = %summary.path.display(),
                pass_rate = summary.pass_rate,
                flake_rate = summary.flake_rate,
                "test FAILED"
            );
        }

        self.dispatcher.emit_test_finished(&TestFinishedEvent {
            path: summary.path.clone(),
            passed: summary.passed,
            pass_rate: summary.pass_rate,
            flake_rate: summary.flake_rate,
            runtime_sum: summary.runtime_sum,
            error: summary.error.clone(),
        });
        summary
    }
}
