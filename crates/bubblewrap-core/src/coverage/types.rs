//! Coverage types

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// An application source file, identified by its file stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceModule {
    pub name: String,
    pub path: PathBuf,
}

/// Module name → test files that import it, in discovery order.
///
/// Built once per scan and read-only afterwards; the only way to create one
/// is through the mapper or `FromIterator`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverageMap {
    modules: BTreeMap<String, Vec<PathBuf>>,
}

impl CoverageMap {
    /// Tests covering `module`, if any test imports it.
    pub fn get(&self, module: &str) -> Option<&[PathBuf]> {
        self.modules.get(module).map(Vec::as_slice)
    }

    pub fn contains(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// Entries ordered by module name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.modules.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Every covering test exactly once, in first-seen order.
    pub fn unique_tests(&self) -> Vec<PathBuf> {
        let mut seen: FxHashSet<&Path> = FxHashSet::default();
        let mut tests = Vec::new();
        for paths in self.modules.values() {
            for path in paths {
                if seen.insert(path.as_path()) {
                    tests.push(path.clone());
                }
            }
        }
        tests
    }
}

impl FromIterator<(String, Vec<PathBuf>)> for CoverageMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<PathBuf>)>>(iter: I) -> Self {
        let mut modules: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for (module, tests) in iter {
            modules.entry(module).or_default().extend(tests);
        }
        Self { modules }
    }
}

/// Output of the mapping phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverageMapping {
    /// Module → covering tests.
    pub coverage: CoverageMap,
    /// Test files in discovery order.
    pub test_files: Vec<PathBuf>,
    /// Every application module found, covered or not.
    pub app_modules: Vec<SourceModule>,
}

impl CoverageMapping {
    /// Application modules no test imports.
    pub fn uncovered_modules(&self) -> BTreeSet<&str> {
        self.app_modules
            .iter()
            .map(|m| m.name.as_str())
            .filter(|name| !self.coverage.contains(name))
            .collect()
    }
}
