//! ErrorCode trait for stable, machine-readable error identifiers.

/// Every error enum implements this to expose a structured code string
/// that front ends can match on without parsing messages.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "SCAN_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted display string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const EXECUTION_ERROR: &str = "EXECUTION_ERROR";
pub const AGGREGATION_ERROR: &str = "AGGREGATION_ERROR";
pub const OPTIMIZER_ERROR: &str = "OPTIMIZER_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
