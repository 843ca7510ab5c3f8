//! Scanner module - source file discovery for the analyzed project
//!
//! Walks the project tree in a deterministic order, pruning excluded
//! directories by name, and yields the absolute paths of Python files.

mod ignores;
mod walker;

pub use ignores::{ExcludedDirs, DEFAULT_EXCLUDED_DIRS};
pub use walker::{list_source_files, Scanner, SOURCE_EXTENSION};
