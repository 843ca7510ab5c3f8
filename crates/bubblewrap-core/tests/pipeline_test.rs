//! End-to-end pipeline runs over a fixture project with a scripted executor.

mod common;

use std::path::PathBuf;

use bubblewrap_core::config::{BubblewrapConfig, Quantization};
use bubblewrap_core::errors::ErrorCode;
use bubblewrap_core::{EventDispatcher, Pipeline, PipelineError, RecommendedSet, SubsetMethod};
use common::{sample_project, write_file, RecordingHandler, Script, ScriptedExecutor};

fn config(trials: u32) -> BubblewrapConfig {
    let mut config = BubblewrapConfig::default();
    config.run.trials = Some(trials);
    config.analysis.slowest_count = Some(1);
    config
}

/// alpha: test_alpha (1 flake) + test_shared; beta: test_beta (2 flakes) + test_shared.
fn scripted() -> ScriptedExecutor {
    ScriptedExecutor::new()
        .script("test_alpha.py", Script::trials(&[true, true, true, false], 1.0))
        .script("test_beta.py", Script::trials(&[false, false, true, true], 0.5))
        .script("test_shared.py", Script::trials(&[true], 2.0))
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect()
}

#[test]
fn test_full_run_report() {
    let dir = sample_project();
    let executor = scripted();

    let report = Pipeline::new(config(4)).run(dir.path(), &executor).unwrap();

    // Shared test ran once per trial, not once per module
    assert_eq!(executor.calls_for("test_shared.py"), 4);
    assert_eq!(report.executed_tests, 3);
    assert_eq!(report.trials, 4);

    assert_eq!(report.max_flake_rate, Some(0.5));
    assert_eq!(report.flakiest_modules, vec!["beta"]);

    let alpha = report.modules.iter().find(|m| m.name == "alpha").unwrap();
    assert_eq!(alpha.flake_rate, 0.25);
    assert_eq!(alpha.runtime, 3.0);
    let beta = report.modules.iter().find(|m| m.name == "beta").unwrap();
    assert_eq!(beta.runtime, 2.5);

    assert_eq!(report.slowest_modules.len(), 1);
    assert_eq!(report.slowest_modules[0].name, "alpha");

    // 100 + 50 units fit under the 175-unit cutoff; the lone 200-unit test is smaller
    assert_eq!(report.recommendation.total_units, 350);
    assert_eq!(report.recommendation.cutoff_units, 175);
    assert_eq!(report.recommendation.selected.len(), 2);
    assert_eq!(report.recommendation.choice, RecommendedSet::Complement);
    assert_eq!(report.recommendation.method, SubsetMethod::Table);
    assert_eq!(names(&report.recommendation.recommended), vec!["test_shared.py"]);

    assert_eq!(report.uncovered_modules, vec!["gamma"]);
    assert_eq!(report.tests.len(), 3);
    assert!(report.exceeds_flake_rate(0.4));
    assert!(!report.exceeds_flake_rate(0.5));
}

#[test]
fn test_floor_quantization_ties_widen_slowest() {
    let dir = sample_project();
    let mut config = config(4);
    config.analysis.quantization = Some(Quantization::Floor);
    // alpha = 3.25s, beta = 3.5s: both floor to 3
    let executor = ScriptedExecutor::new()
        .script("test_alpha.py", Script::trials(&[true], 1.25))
        .script("test_beta.py", Script::trials(&[true], 1.5))
        .script("test_shared.py", Script::trials(&[true], 2.0));

    let report = Pipeline::new(config).run(dir.path(), &executor).unwrap();

    let slowest: Vec<&str> = report.slowest_modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(slowest, vec!["alpha", "beta"]);
    assert!(report.slowest_modules.iter().all(|m| m.quantized == 3.0));
}

#[test]
fn test_unrunnable_test_degrades_only_itself() {
    let dir = sample_project();
    let executor = ScriptedExecutor::new().script("test_beta.py", Script::SpawnFailure);

    let report = Pipeline::new(config(3)).run(dir.path(), &executor).unwrap();

    let failed: Vec<_> = report.failed_to_run().collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].path.ends_with("tests/test_beta.py"));
    assert_eq!(report.modules.len(), 2);
    assert_eq!(report.max_flake_rate, Some(0.0));
}

#[test]
fn test_events_follow_pipeline_phases() {
    let dir = sample_project();
    let handler = RecordingHandler::new();
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(handler.clone());

    Pipeline::new(config(2))
        .with_dispatcher(dispatcher)
        .run(dir.path(), &ScriptedExecutor::new())
        .unwrap();

    let events = handler.snapshot();
    assert_eq!(events.first().map(String::as_str), Some("scan_started"));
    assert_eq!(events[1], "scan_complete");
    assert_eq!(events.last().map(String::as_str), Some("analysis_complete"));
    assert_eq!(handler.count("test_started"), 3);
    assert_eq!(handler.count("module_summarized"), 2);
    assert_eq!(handler.count("error"), 0);
}

#[test]
fn test_phase_error_halts_and_is_reported() {
    let dir = sample_project();
    write_file(dir.path(), "tests/test_broken.py", "import (\n");
    let handler = RecordingHandler::new();
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(handler.clone());
    let executor = ScriptedExecutor::new();

    let err = Pipeline::new(config(2))
        .with_dispatcher(dispatcher)
        .run(dir.path(), &executor)
        .unwrap_err();

    assert!(matches!(err, PipelineError::Scan(_)));
    assert!(err.coded_string().starts_with("[PARSE_ERROR]"));
    assert_eq!(handler.count("error:PARSE_ERROR"), 1);
    assert_eq!(executor.total_calls(), 0);
}

#[test]
fn test_oversized_optimizer_table_still_recommends() {
    let dir = sample_project();
    let mut config = config(4);
    config.optimizer.max_table_cells = Some(4);

    let report = Pipeline::new(config).run(dir.path(), &scripted()).unwrap();
    let rec = &report.recommendation;

    // Same answer as the table: 100 + 50 units fit under the 175-unit cutoff
    assert_eq!(rec.method, SubsetMethod::ShortestFirst);
    assert_eq!(rec.cutoff_units, 175);
    assert_eq!(names(&rec.selected), vec!["test_alpha.py", "test_beta.py"]);
    assert_eq!(names(&rec.recommended), vec!["test_shared.py"]);
    // Rankings survive the degraded optimizer
    assert_eq!(report.flakiest_modules, vec!["beta"]);
    assert_eq!(report.slowest_modules[0].name, "alpha");
}

#[test]
fn test_report_serializes_to_json() {
    let dir = sample_project();
    let report = Pipeline::new(config(4)).run(dir.path(), &scripted()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["flakiest_modules"][0], "beta");
    assert_eq!(json["recommendation"]["choice"], "complement");
    assert_eq!(json["uncovered_modules"][0], "gamma");
}
