//! Pipeline runner
//!
//! Phase failures (scan, aggregation) halt the run and are
//! reported once through the dispatcher. A test that cannot be executed
//! only degrades its own summary.

use std::path::Path;
use std::time::Instant;

use crate::analysis::{find_flakiest, find_slowest, summarize_modules, RuntimeQuantizer};
use crate::config::BubblewrapConfig;
use crate::coverage::CoverageMapper;
use crate::errors::{ErrorCode, PipelineError, ScanError};
use crate::events::types::{
    AnalysisCompleteEvent, ErrorEvent, ModuleSummarizedEvent, ScanCompleteEvent,
    ScanStartedEvent,
};
use crate::events::EventDispatcher;
use crate::execution::{ExecutionCoordinator, PytestExecutor, SummaryCache, TestExecutor};
use crate::optimizer::SubsetOptimizer;
use crate::scanner::Scanner;

use super::report::{ModuleReport, Report};

#[derive(Debug, Clone)]
pub struct Pipeline {
    config: BubblewrapConfig,
    dispatcher: EventDispatcher,
}

impl Pipeline {
    pub fn new(config: BubblewrapConfig) -> Self {
        Self {
            config,
            dispatcher: EventDispatcher::new(),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: EventDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn config(&self) -> &BubblewrapConfig {
        &self.config
    }

    /// The pytest executor described by the `[run]` config section.
    pub fn default_executor(&self) -> PytestExecutor {
        PytestExecutor::from_config(&self.config.run)
    }

    /// Analyze the project at `root`, running tests through `executor`.
    pub fn run<E: TestExecutor + ?Sized>(
        &self,
        root: &Path,
        executor: &E,
    ) -> Result<Report, PipelineError> {
        let result = self.run_phases(root, executor);
        if let Err(err) = &result {
            tracing::error!(code = err.error_code(), error = %err, "analysis aborted");
            self.dispatcher.emit_error(&ErrorEvent {
                message: err.to_string(),
                error_code: err.error_code().to_string(),
            });
        }
        result
    }

    fn run_phases<E: TestExecutor + ?Sized>(
        &self,
        root: &Path,
        executor: &E,
    ) -> Result<Report, PipelineError> {
        let start = Instant::now();
        let root = std::fs::canonicalize(root).map_err(|source| ScanError::IoError {
            path: root.to_path_buf(),
            source,
        })?;

        // Discover and map
        let files = Scanner::new(&root, &self.config.scan.exclude).scan()?;
        self.dispatcher.emit_scan_started(&ScanStartedEvent {
            root: root.clone(),
            file_count: files.len(),
        });
        let mapping = CoverageMapper::new(self.config.scan.effective_threads()).map(&files)?;
        self.dispatcher.emit_scan_complete(&ScanCompleteEvent {
            test_files: mapping.test_files.len(),
            app_modules: mapping.app_modules.len(),
            covered_modules: mapping.coverage.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        });

        // Execute
        let trials = self.config.run.effective_trials();
        let mut cache = SummaryCache::new();
        let executed = ExecutionCoordinator::new(executor, &root, trials)
            .with_jobs(self.config.run.effective_jobs())
            .with_dispatcher(self.dispatcher.clone())
            .run(&mapping.coverage, &mut cache);

        // Aggregate
        let modules = summarize_modules(&mapping.coverage, &cache)?;
        for module in &modules {
            self.dispatcher.emit_module_summarized(&ModuleSummarizedEvent {
                name: module.name.clone(),
                flake_rate: module.flake_rate,
                runtime: module.runtime,
                test_count: module.tests.len(),
            });
        }

        // Rank
        let flakiest = find_flakiest(&modules);
        let slowest = find_slowest(
            &modules,
            self.config.analysis.effective_slowest_count(),
            RuntimeQuantizer::from_config(&self.config.analysis),
        );

        // Optimize
        let recommendation =
            SubsetOptimizer::from_config(&self.config.optimizer).recommend(&cache.runtimes());

        let duration_ms = start.elapsed().as_millis() as u64;
        let flakiest_modules: Vec<String> =
            flakiest.names().into_iter().map(str::to_string).collect();
        self.dispatcher.emit_analysis_complete(&AnalysisCompleteEvent {
            max_flake_rate: flakiest.max_flake_rate,
            flakiest: flakiest_modules.clone(),
            slowest: slowest.iter().map(|m| m.name.clone()).collect(),
            recommended_tests: recommendation.recommended.len(),
            duration_ms,
        });
        tracing::info!(
            modules = modules.len(),
            executed,
            max_flake_rate = ?flakiest.max_flake_rate,
            duration_ms,
            "analysis complete"
        );

        Ok(Report {
            trials,
            max_flake_rate: flakiest.max_flake_rate,
            flakiest_modules,
            slowest_modules: slowest,
            recommendation,
            modules: modules.iter().map(ModuleReport::from).collect(),
            tests: cache.summaries().iter().map(|s| (**s).clone()).collect(),
            uncovered_modules: mapping
                .uncovered_modules()
                .into_iter()
                .map(str::to_string)
                .collect(),
            executed_tests: executed,
            duration_ms,
            root,
        })
    }
}
