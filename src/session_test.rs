#![allow(clippy::float_cmp)]

use std::io::Cursor;

use super::*;

fn script(text: &str) -> Vec<ScriptEvent> {
    parse_script(Cursor::new(text), "test").unwrap()
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parses_events_and_skips_comments() {
    let events = script(
        "# mount\n{\"event\":\"resize\",\"width\":800,\"height\":600}\n\n{\"event\":\"pointer_down\",\"x\":1,\"y\":2}\n{\"event\":\"pointer_cancel\"}\n",
    );
    assert_eq!(
        events,
        vec![
            ScriptEvent::Resize { width: 800.0, height: 600.0 },
            ScriptEvent::PointerDown { x: 1.0, y: 2.0, button: ScriptButton::Primary },
            ScriptEvent::PointerCancel,
        ]
    );
}

#[test]
fn parses_secondary_button_and_kind() {
    let events = script(
        "{\"event\":\"pointer_down\",\"x\":1,\"y\":2,\"button\":\"secondary\"}\n{\"event\":\"create\",\"kind\":\"middleware\",\"x\":0,\"y\":0}",
    );
    assert_eq!(events[0], ScriptEvent::PointerDown { x: 1.0, y: 2.0, button: ScriptButton::Secondary });
    assert_eq!(events[1], ScriptEvent::Create { kind: ObjectKind::Middleware, x: 0.0, y: 0.0 });
}

#[test]
fn malformed_line_reports_line_number() {
    let err = parse_script(Cursor::new("{\"event\":\"pointer_cancel\"}\n\n{\"event\":\"warp\"}\n"), "test").unwrap_err();
    assert!(matches!(err, CliError::Script { line: 3, .. }));
}

// =============================================================
// Replay
// =============================================================

#[test]
fn replay_pans_camera() {
    let events = script(
        r#"{"event":"resize","width":800,"height":600}
{"event":"pointer_down","x":10,"y":10}
{"event":"pointer_move","x":60,"y":30}
{"event":"pointer_up","x":110,"y":10}"#,
    );
    let report = replay(CanvasConfig::default(), None, &events).unwrap();
    assert_eq!(report.camera.offset, Point::new(500.0, 300.0));
    assert!(report.actions > 0);
}

#[test]
fn replay_creates_and_drags_objects() {
    let events = script(
        r#"{"event":"resize","width":800,"height":600}
{"event":"create","kind":"request","x":400,"y":300}
{"event":"pointer_down","x":576,"y":174}
{"event":"pointer_move","x":586,"y":174}
{"event":"pointer_up","x":596,"y":174}"#,
    );
    let report = replay(CanvasConfig::default(), None, &events).unwrap();
    assert_eq!(report.objects.len(), 1);
    assert_eq!(report.objects[0].position, Point::new(20.0, 0.0));
    assert_eq!(report.moves, 2);
}

#[test]
fn replay_seeds_from_store() {
    let blob = r#"[{"id":"a","type":"schema","position":{"x":5,"y":6}}]"#;
    let events = script(r#"{"event":"delete","id":"a"}"#);

    let report = replay(CanvasConfig::default(), Some(blob), &[]).unwrap();
    assert_eq!(report.objects.len(), 1);

    let report = replay(CanvasConfig::default(), Some(blob), &events).unwrap();
    assert!(report.objects.is_empty());
}

#[test]
fn replay_rejects_invalid_store() {
    let err = replay(CanvasConfig::default(), Some("{}"), &[]).unwrap_err();
    assert!(matches!(err, CliError::Load(_)));
}

#[test]
fn replay_before_mount_changes_nothing() {
    let events = script(
        r#"{"event":"pointer_down","x":10,"y":10}
{"event":"wheel","x":0,"y":0,"delta_y":-1}"#,
    );
    let report = replay(CanvasConfig::default(), None, &events).unwrap();
    assert_eq!(report.actions, 0);
    assert_eq!(report.camera, Camera::default());
}
