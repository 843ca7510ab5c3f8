//! Test execution configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for repeated test execution.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RunConfig {
    /// Trials per unique test. Default: 5.
    pub trials: Option<u32>,
    /// Per-trial timeout in seconds. Default: 300.
    pub timeout_secs: Option<u64>,
    /// Python interpreter used to launch pytest. Default: `python3`.
    pub python: Option<String>,
    /// Extra arguments appended to every pytest invocation.
    #[serde(default)]
    pub pytest_args: Vec<String>,
    /// Tests executed concurrently. Default: 1.
    pub jobs: Option<usize>,
}

impl RunConfig {
    pub fn effective_trials(&self) -> u32 {
        self.trials.unwrap_or(5)
    }

    pub fn effective_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(300))
    }

    pub fn effective_python(&self) -> &str {
        self.python.as_deref().unwrap_or("python3")
    }

    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or(1)
    }
}
