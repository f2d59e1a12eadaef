#![allow(clippy::float_cmp)]

use super::*;

const TARGET: &str = "6f1c2a3e-8a4b-4c5d-9e6f-0a1b2c3d4e5f";

fn script(steps: &str) -> Script {
    let json = format!(
        r#"{{
            "targets": [
                {{ "id": "{TARGET}", "rect": {{ "left": 0, "top": 0, "width": 100, "height": 100 }},
                   "options": {{ "aspect_ratio": false }} }}
            ],
            "steps": {steps}
        }}"#
    );
    Script::from_json(&json).unwrap()
}

#[test]
fn parses_minimal_script() {
    let s = script("[]");
    assert_eq!(s.config, EngineConfig::default());
    assert_eq!(s.targets.len(), 1);
    assert_eq!(s.targets[0].angle, 0.0);
    assert_eq!(s.targets[0].scale, None);
    assert!(s.steps.is_empty());
}

#[test]
fn parses_begin_without_handle_as_move() {
    let s = script(&format!(r#"[{{ "op": "begin", "target": "{TARGET}", "at": {{ "x": 1, "y": 2 }} }}]"#));
    assert!(matches!(&s.steps[0], Step::Begin { handle: None, .. }));
}

#[test]
fn rejects_unknown_op() {
    let json = r#"{ "targets": [], "steps": [{ "op": "teleport" }] }"#;
    assert!(matches!(Script::from_json(json), Err(ReplayError::Json(_))));
}

#[test]
fn resize_replay_reports_final_geometry_and_events() {
    let s = script(&format!(
        r#"[
            {{ "op": "begin", "target": "{TARGET}", "handle": "se", "at": {{ "x": 100, "y": 100 }} }},
            {{ "op": "move", "at": {{ "x": 110, "y": 120 }} }},
            {{ "op": "end", "at": {{ "x": 110, "y": 120 }} }}
        ]"#
    ));
    let report = run(&s).unwrap();
    assert_eq!(report.targets[0].rect, Rect::new(0.0, 0.0, 110.0, 120.0));
    assert_eq!(report.steps.len(), 3);
    assert_eq!(report.steps[1].rect, Some(Rect::new(0.0, 0.0, 110.0, 120.0)));
    let names: Vec<&str> = report.events.iter().filter_map(EngineEvent::as_lifecycle).map(|e| e.name()).collect();
    assert_eq!(names, vec!["onResizeStart", "onResizing", "onResizeEnd"]);
}

#[test]
fn rejected_step_is_recorded_not_fatal() {
    let s = script(&format!(
        r#"[
            {{ "op": "set_locked", "target": "{TARGET}", "locked": true }},
            {{ "op": "begin", "target": "{TARGET}", "handle": "rotate", "at": {{ "x": 50, "y": -20 }} }},
            {{ "op": "move", "at": {{ "x": 100, "y": 50 }} }}
        ]"#
    ));
    let report = run(&s).unwrap();
    assert_eq!(report.steps[1].error, Some("E_INVALID_STATE"));
    assert_eq!(report.steps[2].rect, None);
    assert_eq!(report.targets[0].angle, 0.0);
}

#[test]
fn invalid_target_aborts_replay() {
    let json = format!(
        r#"{{ "targets": [{{ "id": "{TARGET}", "rect": {{ "left": 0, "top": 0, "width": 50, "height": 50 }},
              "options": {{ "min_width": 0 }} }}] }}"#
    );
    let s = Script::from_json(&json).unwrap();
    assert!(matches!(run(&s), Err(ReplayError::Engine(EngineError::InvalidOptions(_)))));
}

#[test]
fn cancel_step_reverts() {
    let s = script(&format!(
        r#"[
            {{ "op": "begin", "target": "{TARGET}", "at": {{ "x": 0, "y": 0 }} }},
            {{ "op": "move", "at": {{ "x": 30, "y": 40 }} }},
            {{ "op": "cancel" }}
        ]"#
    ));
    let report = run(&s).unwrap();
    assert_eq!(report.targets[0].rect, Rect::new(0.0, 0.0, 100.0, 100.0));
    assert!(matches!(report.steps[2].state, EngineState::Selected { .. }));
}

#[test]
fn load_missing_file_is_io_error() {
    let result = Script::load(Path::new("/nonexistent/replay.json"));
    assert!(matches!(result, Err(ReplayError::Io { .. })));
}
