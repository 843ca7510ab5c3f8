//! Deterministic file walker
//!
//! Entries are visited sorted by file name so identical trees always yield
//! identical file lists, which keeps coverage maps reproducible.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::ignores::ExcludedDirs;
use crate::errors::ScanError;

/// Extension of the analyzed language's source files.
pub const SOURCE_EXTENSION: &str = "py";

/// Source file scanner rooted at a project directory
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    excluded: ExcludedDirs,
}

impl Scanner {
    /// Create a scanner for `root`, skipping the default exclusions plus `extra_excludes`.
    pub fn new<S: AsRef<str>>(root: impl Into<PathBuf>, extra_excludes: &[S]) -> Self {
        Self {
            root: root.into(),
            excluded: ExcludedDirs::new(extra_excludes),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and return absolute paths of every source file.
    pub fn scan(&self) -> Result<Vec<PathBuf>, ScanError> {
        let root = std::fs::canonicalize(&self.root).map_err(|source| ScanError::IoError {
            path: self.root.clone(),
            source,
        })?;

        let mut files = Vec::new();
        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        for entry in walker {
            let entry = entry.map_err(|e| ScanError::Walk {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone()),
                message: e.to_string(),
            })?;
            if entry.file_type().is_file() && is_source_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        tracing::debug!(root = %root.display(), files = files.len(), "scan complete");
        Ok(files)
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.excluded.is_excluded(name))
    }
}

/// List every source file under `root`, skipping `excluded_dir_names` at any depth.
pub fn list_source_files<S: AsRef<str>>(
    root: &Path,
    excluded_dir_names: &[S],
) -> Result<Vec<PathBuf>, ScanError> {
    Scanner::new(root, excluded_dir_names).scan()
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == SOURCE_EXTENSION)
}
