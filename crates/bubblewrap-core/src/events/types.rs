//! Event payload types.

use std::path::PathBuf;

/// Payload for `on_scan_started`.
#[derive(Debug, Clone)]
pub struct ScanStartedEvent {
    pub root: PathBuf,
    pub file_count: usize,
}

/// Payload for `on_scan_complete`.
#[derive(Debug, Clone)]
pub struct ScanCompleteEvent {
    pub test_files: usize,
    pub app_modules: usize,
    pub covered_modules: usize,
    pub duration_ms: u64,
}

/// Payload for `on_test_started`.
#[derive(Debug, Clone)]
pub struct TestStartedEvent {
    pub path: PathBuf,
    pub trials: u32,
}

/// Payload for `on_test_finished`.
#[derive(Debug, Clone)]
pub struct TestFinishedEvent {
    pub path: PathBuf,
    pub passed: bool,
    pub pass_rate: f64,
    pub flake_rate: f64,
    /// Seconds spent across all trials.
    pub runtime_sum: f64,
    /// Set when the test could not be executed at all.
    pub error: Option<String>,
}

/// Payload for `on_test_cached`.
#[derive(Debug, Clone)]
pub struct TestCachedEvent {
    pub path: PathBuf,
}

/// Payload for `on_module_summarized`.
#[derive(Debug, Clone)]
pub struct ModuleSummarizedEvent {
    pub name: String,
    pub flake_rate: f64,
    pub runtime: f64,
    pub test_count: usize,
}

/// Payload for `on_analysis_complete`.
#[derive(Debug, Clone)]
pub struct AnalysisCompleteEvent {
    pub max_flake_rate: Option<f64>,
    pub flakiest: Vec<String>,
    pub slowest: Vec<String>,
    pub recommended_tests: usize,
    pub duration_ms: u64,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
