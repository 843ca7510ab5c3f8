//! Execution module
//!
//! Runs each unique test a fixed number of times through a `TestExecutor`
//! and memoizes one shared `TestSummary` per test path.

mod cache;
mod coordinator;
mod executor;
mod types;

pub use cache::SummaryCache;
pub use coordinator::ExecutionCoordinator;
pub use executor::{PytestExecutor, TestExecutor};
pub use types::{TestCase, TestSummary, TrialOutcome, PASS_THRESHOLD};
