//! Error handling for bubblewrap.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod aggregation_error;
pub mod config_error;
pub mod error_code;
pub mod execution_error;
pub mod optimizer_error;
pub mod pipeline_error;
pub mod scan_error;

pub use aggregation_error::AggregationError;
pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use execution_error::ExecutionError;
pub use optimizer_error::OptimizerError;
pub use pipeline_error::PipelineError;
pub use scan_error::ScanError;
