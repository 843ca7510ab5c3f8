//! Directory exclusion rules
//!
//! Directories are matched by name at any depth. A leading `*` turns the
//! entry into a suffix match (`*.egg-info`).

use rustc_hash::FxHashSet;

/// Directories that never contain first-party sources or tests.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    // Virtual environments and installs
    ".venv",
    "venv",
    "env",
    ".env",
    "virtualenv",
    ".virtualenv",
    "site-packages",
    ".eggs",
    "*.egg-info",
    // Tool caches
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".ruff_cache",
    ".tox",
    ".nox",
    ".hypothesis",
    // Version control
    ".git",
    ".svn",
    ".hg",
    // IDE/Editor
    ".idea",
    ".vscode",
    // Foreign dependency trees
    "node_modules",
];

/// Compiled set of excluded directory names.
#[derive(Debug, Clone, Default)]
pub struct ExcludedDirs {
    names: FxHashSet<String>,
    suffixes: Vec<String>,
}

impl ExcludedDirs {
    /// Build the exclusion set from the defaults plus `extra` names.
    /// Duplicates are harmless.
    pub fn new<S: AsRef<str>>(extra: &[S]) -> Self {
        let mut excluded = Self::default();
        for name in DEFAULT_EXCLUDED_DIRS {
            excluded.add(name);
        }
        for name in extra {
            excluded.add(name.as_ref());
        }
        excluded
    }

    fn add(&mut self, pattern: &str) {
        let pattern = pattern.trim().trim_end_matches('/');
        if pattern.is_empty() {
            return;
        }
        match pattern.strip_prefix('*') {
            Some(suffix) if !suffix.is_empty() => self.suffixes.push(suffix.to_string()),
            Some(_) => {}
            None => {
                self.names.insert(pattern.to_string());
            }
        }
    }

    /// Whether a directory with this name should be pruned.
    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.names.contains(dir_name) || self.suffixes.iter().any(|s| dir_name.ends_with(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_exclusions() {
        let excluded = ExcludedDirs::new::<&str>(&[]);
        assert!(excluded.is_excluded("__pycache__"));
        assert!(excluded.is_excluded(".venv"));
        assert!(excluded.is_excluded("bubblewrap.egg-info"));
        assert!(!excluded.is_excluded("src"));
        assert!(!excluded.is_excluded("tests"));
    }

    #[test]
    fn test_extra_exclusions() {
        let excluded = ExcludedDirs::new(&["fixtures", "legacy/", "*_generated"]);
        assert!(excluded.is_excluded("fixtures"));
        assert!(excluded.is_excluded("legacy"));
        assert!(excluded.is_excluded("api_generated"));
        assert!(!excluded.is_excluded("generated_api"));
    }
}
