//! bubblewrap-core: Test flakiness and latency analysis engine
//!
//! This crate provides the components behind the `bubblewrap` CLI:
//! - Scanner: Deterministic discovery of Python source files
//! - Parsers: tree-sitter import extraction
//! - Coverage: Module-to-test dependency mapping
//! - Execution: Repeated test execution with a per-scan summary cache
//! - Analysis: Module aggregation, flakiest and slowest rankings
//! - Optimizer: Budgeted maximum-count test subset
//! - Pipeline: End-to-end run producing a serializable report

pub mod analysis;
pub mod config;
pub mod coverage;
pub mod errors;
pub mod events;
pub mod execution;
pub mod logging;
pub mod optimizer;
pub mod parsers;
pub mod pipeline;
pub mod scanner;

// Re-exports for convenience
pub use analysis::{
    find_flakiest, find_slowest, summarize_modules, Flakiest, ModuleSummary, RuntimeQuantizer,
    SlowModule,
};
pub use config::{BubblewrapConfig, CliOverrides};
pub use coverage::{CoverageMap, CoverageMapper, CoverageMapping};
pub use errors::{ErrorCode, PipelineError};
pub use events::{EventDispatcher, RunEventHandler};
pub use execution::{
    ExecutionCoordinator, PytestExecutor, SummaryCache, TestExecutor, TestSummary, TrialOutcome,
};
pub use logging::init_tracing;
pub use optimizer::{Recommendation, RecommendedSet, SubsetMethod, SubsetOptimizer};
pub use parsers::extract_imports;
pub use pipeline::{Pipeline, Report};
pub use scanner::{list_source_files, Scanner};
