//! EventDispatcher: synchronous fan-out to registered handlers.

use std::sync::Arc;

use super::handler::RunEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn RunEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn RunEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not starve the others.
    fn emit<F: Fn(&dyn RunEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    // ---- Scan ----
    pub fn emit_scan_started(&self, event: &ScanStartedEvent) {
        self.emit(|h| h.on_scan_started(event));
    }

    pub fn emit_scan_complete(&self, event: &ScanCompleteEvent) {
        self.emit(|h| h.on_scan_complete(event));
    }

    // ---- Execution ----
    pub fn emit_test_started(&self, event: &TestStartedEvent) {
        self.emit(|h| h.on_test_started(event));
    }

    pub fn emit_test_finished(&self, event: &TestFinishedEvent) {
        self.emit(|h| h.on_test_finished(event));
    }

    pub fn emit_test_cached(&self, event: &TestCachedEvent) {
        self.emit(|h| h.on_test_cached(event));
    }

    // ---- Analysis ----
    pub fn emit_module_summarized(&self, event: &ModuleSummarizedEvent) {
        self.emit(|h| h.on_module_summarized(event));
    }

    pub fn emit_analysis_complete(&self, event: &AnalysisCompleteEvent) {
        self.emit(|h| h.on_analysis_complete(event));
    }

    // ---- Errors ----
    pub fn emit_error(&self, event: &ErrorEvent) {
        self.emit(|h| h.on_error(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
