//! Configuration system for bubblewrap.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod bubblewrap_config;
pub mod optimizer_config;
pub mod run_config;
pub mod scan_config;

pub use analysis_config::{AnalysisConfig, Quantization};
pub use bubblewrap_config::{BubblewrapConfig, CliOverrides};
pub use optimizer_config::OptimizerConfig;
pub use run_config::RunConfig;
pub use scan_config::ScanConfig;
