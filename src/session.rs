//! Scripted canvas sessions: parse a line-oriented input script and replay it
//! through an [`EngineCore`].
//!
//! Each non-empty line is one JSON event, for example:
//!
//! ```text
//! {"event":"resize","width":800,"height":600}
//! {"event":"pointer_down","x":10,"y":10}
//! {"event":"pointer_move","x":60,"y":30}
//! {"event":"pointer_up","x":60,"y":30}
//! {"event":"create","kind":"schema","x":400,"y":300}
//! ```
//!
//! Lines starting with `#` are comments.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::io::BufRead;

use canvas::camera::{Camera, Point};
use canvas::config::CanvasConfig;
use canvas::doc::{ObjectKind, WorldObject};
use canvas::engine::{Action, EngineCore};
use canvas::input::{Button, WheelDelta};
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Pointer button as written in scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl From<ScriptButton> for Button {
    fn from(b: ScriptButton) -> Self {
        match b {
            ScriptButton::Primary => Self::Primary,
            ScriptButton::Middle => Self::Middle,
            ScriptButton::Secondary => Self::Secondary,
        }
    }
}

/// One scripted input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Resize {
        width: f64,
        height: f64,
    },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: ScriptButton,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    PointerCancel,
    Wheel {
        x: f64,
        y: f64,
        delta_y: f64,
    },
    Create {
        kind: ObjectKind,
        x: f64,
        y: f64,
    },
    Delete {
        id: String,
    },
}

/// Outcome of a replayed session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub camera: Camera,
    pub objects: Vec<WorldObject>,
    /// Number of actions the engine emitted across all events.
    pub actions: usize,
    /// Number of object moves the engine emitted.
    pub moves: usize,
}

/// Parse a script, one JSON event per line.
///
/// # Errors
///
/// Returns [`CliError::Script`] with the 1-based line number of the first
/// malformed line, or [`CliError::Io`] if reading fails.
pub fn parse_script<R: BufRead>(reader: R, source: &str) -> Result<Vec<ScriptEvent>, CliError> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CliError::Io { path: source.to_owned(), source: e })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(trimmed).map_err(|e| CliError::Script { line: index + 1, source: e })?;
        events.push(event);
    }
    Ok(events)
}

/// Replay `events` against a fresh engine, optionally seeded from a store blob.
///
/// # Errors
///
/// Returns [`CliError::Load`] if the store blob is rejected.
pub fn replay(config: CanvasConfig, store: Option<&str>, events: &[ScriptEvent]) -> Result<ReplayReport, CliError> {
    let mut core = EngineCore::new(config);
    if let Some(blob) = store {
        core.load(blob)?;
    }

    let mut actions = 0;
    let mut moves = 0;
    for event in events {
        let emitted = apply(&mut core, event);
        tracing::trace!(?event, emitted = emitted.len(), "replayed event");
        actions += emitted.len();
        moves += emitted.iter().filter(|a| matches!(a, Action::ObjectMoved { .. })).count();
    }

    tracing::info!(events = events.len(), actions, objects = core.store.len(), "replay finished");
    Ok(ReplayReport { camera: core.camera(), objects: core.store.list().to_vec(), actions, moves })
}

fn apply(core: &mut EngineCore, event: &ScriptEvent) -> Vec<Action> {
    match event {
        ScriptEvent::Resize { width, height } => core.on_resize(*width, *height),
        ScriptEvent::PointerDown { x, y, button } => core.on_pointer_down(Point::new(*x, *y), (*button).into()),
        ScriptEvent::PointerMove { x, y } => core.on_pointer_move(Point::new(*x, *y)),
        ScriptEvent::PointerUp { x, y } => core.on_pointer_up(Point::new(*x, *y)),
        ScriptEvent::PointerCancel => core.on_pointer_cancel(),
        ScriptEvent::Wheel { x, y, delta_y } => {
            core.on_wheel(Point::new(*x, *y), WheelDelta { dx: 0.0, dy: *delta_y })
        }
        ScriptEvent::Create { kind, x, y } => core.create_object(*kind, Point::new(*x, *y)),
        ScriptEvent::Delete { id } => core.delete_object(id),
    }
}
