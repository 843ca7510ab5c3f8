//! Coverage mapper - Maps application modules to the tests that import them
//!
//! Files are split into tests and application modules by naming convention.
//! Each test file is parsed in parallel on a thread-local parser, and the
//! per-worker partial maps are merged by module name. Merging is a plain
//! union, so worker completion order never changes the result.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use super::types::{CoverageMap, CoverageMapping, SourceModule};
use crate::errors::ScanError;
use crate::parsers::ImportParser;

thread_local! {
    static PARSER: RefCell<Option<ImportParser>> = const { RefCell::new(None) };
}

/// Builds a `CoverageMap` from a candidate file list.
#[derive(Debug, Clone, Default)]
pub struct CoverageMapper {
    /// Worker threads for import extraction (0 = rayon default).
    threads: usize,
}

/// Module name → (discovery index, test path) pairs from one worker.
#[derive(Default)]
struct PartialCoverage {
    modules: FxHashMap<String, Vec<(usize, PathBuf)>>,
}

impl PartialCoverage {
    fn merge(mut self, other: PartialCoverage) -> PartialCoverage {
        for (module, tests) in other.modules {
            self.modules.entry(module).or_default().extend(tests);
        }
        self
    }

    fn into_coverage_map(self) -> CoverageMap {
        self.modules
            .into_iter()
            .map(|(module, mut tests)| {
                tests.sort_by_key(|(index, _)| *index);
                (module, tests.into_iter().map(|(_, path)| path).collect())
            })
            .collect()
    }
}

impl CoverageMapper {
    pub fn new(threads: usize) -> Self {
        Self { threads }
    }

    /// Map every application module in `files` to the tests importing it.
    ///
    /// Any unreadable or unparseable test file fails the whole phase.
    pub fn map(&self, files: &[PathBuf]) -> Result<CoverageMapping, ScanError> {
        let start = Instant::now();

        let (test_files, app_files): (Vec<&PathBuf>, Vec<&PathBuf>) =
            files.iter().partition(|path| is_test_file(path));

        let app_modules: Vec<SourceModule> = app_files
            .iter()
            .filter_map(|path| {
                module_name(path).map(|name| SourceModule {
                    name,
                    path: (*path).clone(),
                })
            })
            .collect();
        let known: FxHashSet<&str> = app_modules.iter().map(|m| m.name.as_str()).collect();

        tracing::info!(
            tests = test_files.len(),
            modules = app_modules.len(),
            "mapping tests to the application modules they import"
        );

        let partial = if self.threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.threads)
                .build()
                .map_err(|e| ScanError::WorkerPool {
                    message: e.to_string(),
                })?;
            pool.install(|| collect_partial(&test_files, &known))?
        } else {
            collect_partial(&test_files, &known)?
        };

        let coverage = partial.into_coverage_map();
        tracing::info!(
            covered = coverage.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "coverage map built"
        );

        Ok(CoverageMapping {
            coverage,
            test_files: test_files.into_iter().cloned().collect(),
            app_modules,
        })
    }
}

fn collect_partial(
    test_files: &[&PathBuf],
    known: &FxHashSet<&str>,
) -> Result<PartialCoverage, ScanError> {
    test_files
        .par_iter()
        .enumerate()
        .try_fold(
            PartialCoverage::default,
            |mut acc, (index, path)| -> Result<PartialCoverage, ScanError> {
                for module in covered_modules(path, known)? {
                    acc.modules
                        .entry(module)
                        .or_default()
                        .push((index, (*path).clone()));
                }
                Ok(acc)
            },
        )
        .try_reduce(PartialCoverage::default, |a, b| Ok(a.merge(b)))
}

/// Application modules imported by one test file, each reported once.
fn covered_modules(path: &Path, known: &FxHashSet<&str>) -> Result<Vec<String>, ScanError> {
    let source = std::fs::read_to_string(path).map_err(|source| ScanError::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    let imports = PARSER.with(|cell| -> Result<Vec<String>, ScanError> {
        let mut slot = cell.borrow_mut();
        let mut parser = match slot.take() {
            Some(parser) => parser,
            None => ImportParser::new()?,
        };
        let result = parser.parse(path, &source);
        *slot = Some(parser);
        result
    })?;

    let mut modules: Vec<String> = imports
        .iter()
        .filter_map(|name| name.rsplit('.').next())
        .filter(|segment| known.contains(segment))
        .map(str::to_string)
        .collect();
    modules.sort();
    modules.dedup();

    tracing::debug!(path = %path.display(), covers = ?modules, "extracted imports");
    Ok(modules)
}

/// Module identifier of a source file: its file name minus the extension.
pub fn module_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

/// Test files follow the pytest convention: `test_*.py` or `*_test.py`.
pub fn is_test_file(path: &Path) -> bool {
    module_name(path).is_some_and(|name| name.starts_with("test_") || name.ends_with("_test"))
}
