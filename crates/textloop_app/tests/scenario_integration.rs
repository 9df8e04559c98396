//! Integration tests for headless scenario runs
//!
//! These run whole scenarios against real widgets and check the report a
//! CI job would consume.

use textloop_app::{run_scenario_json, HeadlessReport, HeadlessRunConfig, ReportStatus};
use textloop_widgets::{MonospaceMeasurer, TextLoop, TextLoopConfig};

fn abc() -> TextLoop {
    let config = TextLoopConfig::new().interval_ms(100);
    TextLoop::new(["Alpha", "Beta", "Gamma"], config).unwrap()
}

fn frames_of(frame_ms: u64) -> HeadlessRunConfig {
    HeadlessRunConfig {
        frame_ms,
        ..HeadlessRunConfig::default()
    }
}

#[test]
fn test_alpha_beta_gamma_scenario() {
    let mut widget = abc();
    let outcome = run_scenario_json(
        &mut widget,
        &MonospaceMeasurer::new(10.0, 20.0),
        r#"{ "steps": [
            { "type": "assert_text", "value": "Alpha" },
            { "type": "assert_size", "width": 50, "height": 20 },
            { "type": "wait", "ms": 100 },
            { "type": "assert_text", "value": "Beta" },
            { "type": "assert_size", "width": 40, "height": 20 },
            { "type": "wait", "ms": 150 },
            { "type": "assert_text", "value": "Gamma" },
            { "type": "assert_index", "index": 2 }
        ] }"#,
        frames_of(10),
    )
    .unwrap();

    assert!(!outcome.is_failed(), "{:?}", outcome.report());
    let report = outcome.report();
    assert_eq!(report.elapsed_ms, 250);
    assert_eq!(report.elapsed_frames, 25);
    assert_eq!(report.ticks, 2);
}

#[test]
fn test_unmount_freezes_widget() {
    let mut widget = abc();
    let outcome = run_scenario_json(
        &mut widget,
        &MonospaceMeasurer::default(),
        r#"{ "steps": [
            { "type": "wait", "ms": 90 },
            { "type": "unmount" },
            { "type": "wait", "ms": 1000 },
            { "type": "assert_text", "value": "Alpha" },
            { "type": "assert_index", "index": 0 }
        ] }"#,
        frames_of(16),
    )
    .unwrap();

    assert!(!outcome.is_failed(), "{:?}", outcome.report());
    assert_eq!(outcome.report().ticks, 0);
}

#[test]
fn test_single_item_never_advances() {
    let mut widget = TextLoop::new(["Solo"], TextLoopConfig::new().interval_ms(50)).unwrap();
    let outcome = run_scenario_json(
        &mut widget,
        &MonospaceMeasurer::default(),
        r#"{ "steps": [
            { "type": "frames", "count": 100 },
            { "type": "assert_text", "value": "Solo" }
        ] }"#,
        frames_of(16),
    )
    .unwrap();

    assert!(!outcome.is_failed());
    assert_eq!(outcome.report().ticks, 0);
    assert_eq!(widget.generation(), 0);
}

#[test]
fn test_failed_report_round_trips_as_json() {
    let mut widget = abc();
    let outcome = run_scenario_json(
        &mut widget,
        &MonospaceMeasurer::default(),
        r#"{ "steps": [
            { "type": "wait", "ms": 100 },
            { "type": "assert_index", "index": 0 }
        ] }"#,
        frames_of(25),
    )
    .unwrap();

    assert!(outcome.is_failed());
    let mut out = Vec::new();
    outcome.report().write_to_writer(&mut out).unwrap();

    let report: HeadlessReport = serde_json::from_slice(&out).unwrap();
    assert_eq!(report.status, ReportStatus::Failed);
    assert_eq!(report.failed_step_index, Some(1));
    assert_eq!(report.assertion.as_deref(), Some("assert_index"));
    assert_eq!(report.elapsed_frames, 4);
    assert_eq!(report.ticks, 1);
}

#[test]
fn test_malformed_scenario_is_an_error() {
    let mut widget = abc();
    let result = run_scenario_json(
        &mut widget,
        &MonospaceMeasurer::default(),
        r#"{ "steps": [{ "type": "wait" }] }"#,
        frames_of(16),
    );
    assert!(result.is_err());
}
