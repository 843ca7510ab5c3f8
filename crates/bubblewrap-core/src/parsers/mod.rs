//! Parsers - tree-sitter based import extraction
//!
//! Only the analyzed language's grammar is loaded; a scan never mixes
//! languages.

mod python;

pub use python::{extract_imports, ImportParser};
