//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bubblewrap_core::errors::ExecutionError;
use bubblewrap_core::events::types::*;
use bubblewrap_core::{RunEventHandler, TestExecutor, TrialOutcome};

/// What a scripted test does on each trial.
#[derive(Debug, Clone)]
pub enum Script {
    /// Outcomes cycled per trial, each taking `secs`.
    Trials { outcomes: Vec<bool>, secs: f64 },
    /// The test cannot be started.
    SpawnFailure,
}

impl Script {
    pub fn trials(outcomes: &[bool], secs: f64) -> Self {
        Self::Trials {
            outcomes: outcomes.to_vec(),
            secs,
        }
    }
}

/// A `TestExecutor` driven by per-file scripts, keyed by file name.
/// Unscripted tests always pass in 10ms.
#[derive(Default)]
pub struct ScriptedExecutor {
    scripts: HashMap<String, Script>,
    calls: Mutex<HashMap<PathBuf, usize>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, file_name: &str, script: Script) -> Self {
        self.scripts.insert(file_name.to_string(), script);
        self
    }

    /// Number of `execute` calls made for the test with this file name.
    pub fn calls_for(&self, file_name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(path, _)| path.file_name().is_some_and(|n| n == file_name))
            .map(|(_, count)| *count)
            .sum()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

impl TestExecutor for ScriptedExecutor {
    fn execute(&self, test_path: &Path, _project_root: &Path) -> Result<TrialOutcome, ExecutionError> {
        let trial = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(test_path.to_path_buf()).or_default();
            *count += 1;
            *count - 1
        };

        let name = test_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match self.scripts.get(&name) {
            None => Ok(TrialOutcome::passed(Duration::from_millis(10))),
            Some(Script::Trials { outcomes, secs }) => {
                let elapsed = Duration::from_secs_f64(*secs);
                if outcomes[trial % outcomes.len()] {
                    Ok(TrialOutcome::passed(elapsed))
                } else {
                    Ok(TrialOutcome::failed(elapsed))
                }
            }
            Some(Script::SpawnFailure) => Err(ExecutionError::SpawnFailed {
                program: "scripted".to_string(),
                path: test_path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no interpreter"),
            }),
        }
    }
}

/// Records the name of every event it receives, in order.
#[derive(Default)]
pub struct RecordingHandler {
    pub events: Mutex<Vec<String>>,
}

impl RecordingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn record(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl RunEventHandler for RecordingHandler {
    fn on_scan_started(&self, _event: &ScanStartedEvent) {
        self.record("scan_started");
    }
    fn on_scan_complete(&self, _event: &ScanCompleteEvent) {
        self.record("scan_complete");
    }
    fn on_test_started(&self, _event: &TestStartedEvent) {
        self.record("test_started");
    }
    fn on_test_finished(&self, event: &TestFinishedEvent) {
        self.record(format!("test_finished:{}", event.passed));
    }
    fn on_test_cached(&self, _event: &TestCachedEvent) {
        self.record("test_cached");
    }
    fn on_module_summarized(&self, event: &ModuleSummarizedEvent) {
        self.record(format!("module_summarized:{}", event.name));
    }
    fn on_analysis_complete(&self, _event: &AnalysisCompleteEvent) {
        self.record("analysis_complete");
    }
    fn on_error(&self, event: &ErrorEvent) {
        self.record(format!("error:{}", event.error_code));
    }
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

/// A small project: three application modules, three tests, one uncovered module.
///
/// - `test_alpha.py` imports `alpha`
/// - `test_beta.py` imports `beta`
/// - `test_shared.py` imports both
pub fn sample_project() -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "app/alpha.py", "def run():\n    return 1\n");
    write_file(root, "app/beta.py", "def run():\n    return 2\n");
    write_file(root, "app/gamma.py", "VALUE = 3\n");
    write_file(root, "tests/test_alpha.py", "import app.alpha\n\ndef test_run():\n    assert app.alpha.run() == 1\n");
    write_file(root, "tests/test_beta.py", "from app.beta import run\n\ndef test_run():\n    assert run() == 2\n");
    write_file(root, "tests/test_shared.py", "from app import alpha, beta\n\ndef test_both():\n    assert alpha.run() < beta.run()\n");
    write_file(root, ".venv/lib/test_vendored.py", "import alpha\n");
    dir
}
