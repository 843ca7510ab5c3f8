//! Scan-scoped cache of test summaries
//!
//! Append-only: the first summary stored for a path wins and is shared by
//! every module that references the path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::types::TestSummary;

#[derive(Debug, Default)]
pub struct SummaryCache {
    results: FxHashMap<PathBuf, Arc<TestSummary>>,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<Arc<TestSummary>> {
        self.results.get(path).cloned()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.results.contains_key(path)
    }

    /// Store `summary` unless its path is already cached, and return the
    /// shared entry for that path.
    pub fn insert(&mut self, summary: TestSummary) -> Arc<TestSummary> {
        self.results
            .entry(summary.path.clone())
            .or_insert_with(|| Arc::new(summary))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// All summaries, ordered by path.
    pub fn summaries(&self) -> Vec<Arc<TestSummary>> {
        let mut summaries: Vec<_> = self.results.values().cloned().collect();
        summaries.sort_by(|a, b| a.path.cmp(&b.path));
        summaries
    }

    /// `(path, mean seconds per trial)` for every cached test, ordered by path.
    pub fn runtimes(&self) -> Vec<(PathBuf, f64)> {
        self.summaries()
            .into_iter()
            .map(|s| (s.path.clone(), s.avg_runtime))
            .collect()
    }
}
