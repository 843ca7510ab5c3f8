//! Top-level bubblewrap configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, OptimizerConfig, Quantization, RunConfig, ScanConfig};
use crate::errors::ConfigError;

/// Name of the project-level config file looked up in the scanned root.
pub const PROJECT_CONFIG_FILE: &str = "bubblewrap.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`BUBBLEWRAP_*`)
/// 3. Project config (`bubblewrap.toml` in project root)
/// 4. User config (`~/.bubblewrap/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BubblewrapConfig {
    pub scan: ScanConfig,
    pub run: RunConfig,
    pub analysis: AnalysisConfig,
    pub optimizer: OptimizerConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub exclude: Vec<String>,
    pub trials: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub jobs: Option<usize>,
    pub python: Option<String>,
    pub slowest_count: Option<usize>,
}

impl BubblewrapConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Only a parse error is fatal here.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(err) => {
                        tracing::warn!(error = %err, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &BubblewrapConfig) -> Result<(), ConfigError> {
        if config.run.trials == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "run.trials".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if config.run.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "run.timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.run.jobs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "run.jobs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if let Some(decimals) = config.analysis.decimals {
            if decimals > 9 {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.decimals".to_string(),
                    message: "must be between 0 and 9".to_string(),
                });
            }
        }
        if config.optimizer.resolution == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "optimizer.resolution".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.bubblewrap/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".bubblewrap").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut BubblewrapConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: BubblewrapConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut BubblewrapConfig, other: &BubblewrapConfig) {
        // Scan
        if !other.scan.exclude.is_empty() {
            base.scan.exclude = other.scan.exclude.clone();
        }
        if other.scan.threads.is_some() {
            base.scan.threads = other.scan.threads;
        }

        // Run
        if other.run.trials.is_some() {
            base.run.trials = other.run.trials;
        }
        if other.run.timeout_secs.is_some() {
            base.run.timeout_secs = other.run.timeout_secs;
        }
        if other.run.python.is_some() {
            base.run.python = other.run.python.clone();
        }
        if !other.run.pytest_args.is_empty() {
            base.run.pytest_args = other.run.pytest_args.clone();
        }
        if other.run.jobs.is_some() {
            base.run.jobs = other.run.jobs;
        }

        // Analysis
        if other.analysis.slowest_count.is_some() {
            base.analysis.slowest_count = other.analysis.slowest_count;
        }
        if other.analysis.quantization.is_some() {
            base.analysis.quantization = other.analysis.quantization;
        }
        if other.analysis.decimals.is_some() {
            base.analysis.decimals = other.analysis.decimals;
        }

        // Optimizer
        if other.optimizer.resolution.is_some() {
            base.optimizer.resolution = other.optimizer.resolution;
        }
        if other.optimizer.max_table_cells.is_some() {
            base.optimizer.max_table_cells = other.optimizer.max_table_cells;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `BUBBLEWRAP_RUN_TRIALS`, `BUBBLEWRAP_SCAN_THREADS`, etc.
    fn apply_env_overrides(config: &mut BubblewrapConfig) {
        if let Ok(val) = std::env::var("BUBBLEWRAP_SCAN_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.scan.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BUBBLEWRAP_RUN_TRIALS") {
            if let Ok(v) = val.parse::<u32>() {
                config.run.trials = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BUBBLEWRAP_RUN_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.run.timeout_secs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BUBBLEWRAP_RUN_JOBS") {
            if let Ok(v) = val.parse::<usize>() {
                config.run.jobs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BUBBLEWRAP_RUN_PYTHON") {
            config.run.python = Some(val);
        }
        if let Ok(val) = std::env::var("BUBBLEWRAP_ANALYSIS_QUANTIZATION") {
            match val.to_ascii_lowercase().as_str() {
                "floor" => config.analysis.quantization = Some(Quantization::Floor),
                "round" => config.analysis.quantization = Some(Quantization::Round),
                _ => {}
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut BubblewrapConfig, cli: &CliOverrides) {
        if !cli.exclude.is_empty() {
            config.scan.exclude = cli.exclude.clone();
        }
        if let Some(v) = cli.trials {
            config.run.trials = Some(v);
        }
        if let Some(v) = cli.timeout_secs {
            config.run.timeout_secs = Some(v);
        }
        if let Some(v) = cli.jobs {
            config.run.jobs = Some(v);
        }
        if let Some(ref v) = cli.python {
            config.run.python = Some(v.clone());
        }
        if let Some(v) = cli.slowest_count {
            config.analysis.slowest_count = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
