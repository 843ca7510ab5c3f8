//! Coverage module
//!
//! Maps application modules to the test files that import them.

mod mapper;
mod types;

pub use mapper::{is_test_file, module_name, CoverageMapper};
pub use types::{CoverageMap, CoverageMapping, SourceModule};
