//! Test executors
//!
//! `TestExecutor` is the seam between the analysis engine and whatever
//! actually runs a test. `PytestExecutor` launches one pytest process per
//! trial; the working directory and output streams belong to the child, so
//! the analyzing process itself is never redirected.

use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use super::types::TrialOutcome;
use crate::config::RunConfig;
use crate::errors::ExecutionError;

/// Runs a single trial of a single test.
///
/// Implementations must be usable from several worker threads at once.
pub trait TestExecutor: Send + Sync {
    /// Execute `test_path` once. `Err` means the test could not be run at
    /// all; a test that ran and failed is `Ok` with `passed == false`.
    fn execute(&self, test_path: &Path, project_root: &Path)
        -> Result<TrialOutcome, ExecutionError>;
}

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs `<python> -m pytest <test> --rootdir <root>` per trial.
#[derive(Debug, Clone)]
pub struct PytestExecutor {
    python: String,
    extra_args: Vec<String>,
    timeout: Option<Duration>,
}

impl PytestExecutor {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
            extra_args: Vec::new(),
            timeout: None,
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.effective_python())
            .with_args(config.pytest_args.clone())
            .with_timeout(config.effective_timeout())
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn command(&self, test_path: &Path, project_root: &Path) -> Command {
        let relative = test_path.strip_prefix(project_root).unwrap_or(test_path);
        let mut command = Command::new(&self.python);
        command
            .arg("-m")
            .arg("pytest")
            .arg(relative)
            .arg("--rootdir")
            .arg(project_root)
            .args(&self.extra_args)
            .current_dir(project_root)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

impl TestExecutor for PytestExecutor {
    fn execute(
        &self,
        test_path: &Path,
        project_root: &Path,
    ) -> Result<TrialOutcome, ExecutionError> {
        let start = Instant::now();
        let child = self
            .command(test_path, project_root)
            .spawn()
            .map_err(|source| ExecutionError::SpawnFailed {
                program: self.python.clone(),
                path: test_path.to_path_buf(),
                source,
            })?;

        let mut guard = ChildGuard::new(child);
        let status = guard
            .wait(self.timeout)
            .map_err(|source| ExecutionError::WaitFailed {
                path: test_path.to_path_buf(),
                source,
            })?;
        let elapsed = start.elapsed();

        Ok(match status {
            Some(status) if status.success() => TrialOutcome::passed(elapsed),
            Some(_) => TrialOutcome::failed(elapsed),
            None => {
                tracing::warn!(
                    path = %test_path.display(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "trial timed out and was killed"
                );
                TrialOutcome::timed_out(elapsed)
            }
        })
    }
}

/// Owns a spawned test process and reaps it on every exit path.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    /// Wait for exit. `Ok(None)` means the timeout elapsed and the child
    /// was killed.
    fn wait(&mut self, timeout: Option<Duration>) -> std::io::Result<Option<ExitStatus>> {
        let Some(timeout) = timeout else {
            let status = self.child.wait()?;
            self.reaped = true;
            return Ok(Some(status));
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = self.child.try_wait()? {
                self.reaped = true;
                return Ok(Some(status));
            }
            let now = Instant::now();
            if now >= deadline {
                self.kill();
                return Ok(None);
            }
            std::thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }

    fn kill(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        self.reaped = true;
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            self.kill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_relative_to_root() {
        let executor = PytestExecutor::new("python3").with_args(vec!["-q".into()]);
        let command = executor.command(
            Path::new("/repo/tests/test_alpha.py"),
            Path::new("/repo"),
        );
        let args: Vec<_> = command
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            args,
            vec!["-m", "pytest", "tests/test_alpha.py", "--rootdir", "/repo", "-q"]
        );
        assert_eq!(command.get_current_dir(), Some(Path::new("/repo")));
    }

    #[test]
    fn test_missing_interpreter_is_execution_error() {
        let executor = PytestExecutor::new("bubblewrap-no-such-python-interpreter");
        let dir = tempfile::TempDir::new().unwrap();
        let err = executor
            .execute(&dir.path().join("test_x.py"), dir.path())
            .unwrap_err();
        assert!(matches!(err, ExecutionError::SpawnFailed { .. }));
    }

    /// `sh -m pytest <path>` runs a script named `pytest` from the project
    /// root, which lets a plain shell stand in for the interpreter.
    #[cfg(unix)]
    fn shell_project(body: &str) -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("pytest"), body).unwrap();
        dir
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_decides_pass_and_fail() {
        let executor = PytestExecutor::new("sh").with_timeout(Duration::from_secs(10));

        let dir = shell_project("exit 0\n");
        let outcome = executor
            .execute(&dir.path().join("test_x.py"), dir.path())
            .unwrap();
        assert!(outcome.passed);
        assert!(!outcome.timed_out);

        let dir = shell_project("exit 1\n");
        let outcome = executor
            .execute(&dir.path().join("test_x.py"), dir.path())
            .unwrap();
        assert!(!outcome.passed);
        assert!(!outcome.timed_out);
    }

    #[cfg(unix)]
    #[test]
    fn test_slow_trial_is_killed_at_timeout() {
        let dir = shell_project("exec sleep 5\n");
        let executor = PytestExecutor::new("sh").with_timeout(Duration::from_millis(100));

        let outcome = executor
            .execute(&dir.path().join("test_x.py"), dir.path())
            .unwrap();
        assert!(outcome.timed_out);
        assert!(!outcome.passed);
        assert!(outcome.elapsed >= Duration::from_millis(100));
        assert!(outcome.elapsed < Duration::from_secs(3));
    }
}
