//! Command-line arguments.

use std::path::PathBuf;

use bubblewrap_core::CliOverrides;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bubblewrap")]
#[command(version)]
#[command(about = "Find flaky and slow Python test coverage and recommend a faster test subset", long_about = None)]
pub struct Cli {
    /// Project root to analyze
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Trials per test
    #[arg(short = 'n', long, value_name = "N")]
    pub trials: Option<u32>,

    /// Directory name to skip at any depth (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "DIR")]
    pub exclude: Vec<String>,

    /// Number of slowest modules to report (ties may add more)
    #[arg(long = "top", value_name = "K")]
    pub top: Option<usize>,

    /// Per-trial timeout in seconds
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Tests executed concurrently
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Python interpreter used to launch pytest
    #[arg(long, value_name = "PATH")]
    pub python: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with status 2 when the flakiest module's rate exceeds RATE
    #[arg(long = "fail-on-flaky", value_name = "RATE")]
    pub fail_on_flaky: Option<f64>,

    /// Debug-level logging (BUBBLEWRAP_LOG still takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            exclude: self.exclude.clone(),
            trials: self.trials,
            timeout_secs: self.timeout,
            jobs: self.jobs,
            python: self.python.clone(),
            slowest_count: self.top,
        }
    }
}
