//! RunEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Observer for pipeline progress.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. Handlers must be `Send + Sync`
/// because tests may be executed from a worker pool.
pub trait RunEventHandler: Send + Sync {
    // ---- Scan ----
    fn on_scan_started(&self, _event: &ScanStartedEvent) {}
    fn on_scan_complete(&self, _event: &ScanCompleteEvent) {}

    // ---- Execution ----
    fn on_test_started(&self, _event: &TestStartedEvent) {}
    fn on_test_finished(&self, _event: &TestFinishedEvent) {}
    fn on_test_cached(&self, _event: &TestCachedEvent) {}

    // ---- Analysis ----
    fn on_module_summarized(&self, _event: &ModuleSummarizedEvent) {}
    fn on_analysis_complete(&self, _event: &AnalysisCompleteEvent) {}

    // ---- Errors ----
    fn on_error(&self, _event: &ErrorEvent) {}
}
