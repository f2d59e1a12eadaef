//! Recorded gesture scripts replayed against a fresh engine.
//!
//! A script is a JSON document naming the targets to register and a list of
//! pointer steps. Replaying it is deterministic, so scripts double as
//! regression fixtures and as a way to inspect the engine from the command
//! line.
//!
//! ```json
//! {
//!   "config": { "rotate_handle": "top" },
//!   "targets": [
//!     { "id": "6f1c…", "rect": { "left": 0, "top": 0, "width": 100, "height": 100 } }
//!   ],
//!   "steps": [
//!     { "op": "begin", "target": "6f1c…", "handle": "se", "at": { "x": 100, "y": 100 } },
//!     { "op": "move", "at": { "x": 110, "y": 120 } },
//!     { "op": "end", "at": { "x": 110, "y": 120 } }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::engine::{Engine, EngineState, TargetHandle};
use crate::error::EngineError;
use crate::event::EngineEvent;
use crate::geometry::{Point, Rect};
use crate::handle::{Handle, HandleKind};
use crate::session::SessionId;
use crate::target::{TargetId, TargetOptions};

/// Errors that stop a replay before it produces a report.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed script: {0}")]
    Json(#[from] serde_json::Error),

    #[error("script setup rejected: {0}")]
    Engine(#[from] EngineError),
}

/// A complete replay script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: EngineConfig,
    pub targets: Vec<ScriptTarget>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One target to register before the steps run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptTarget {
    pub id: TargetId,
    pub rect: Rect,
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub options: TargetOptions,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub containment: Option<Rect>,
}

/// One host input. Pointer positions are screen-space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Pointer-down. Without `handle` the pointer landed on the body.
    Begin {
        target: TargetId,
        #[serde(default)]
        handle: Option<Handle>,
        at: Point,
    },
    Move {
        at: Point,
    },
    End {
        at: Point,
    },
    Cancel,
    Select {
        target: TargetId,
    },
    Deselect,
    Camera {
        camera: Camera,
    },
    SetLocked {
        target: TargetId,
        locked: bool,
    },
    SetDisabled {
        target: TargetId,
        disabled: bool,
    },
}

impl Step {
    fn op(&self) -> &'static str {
        match self {
            Self::Begin { .. } => "begin",
            Self::Move { .. } => "move",
            Self::End { .. } => "end",
            Self::Cancel => "cancel",
            Self::Select { .. } => "select",
            Self::Deselect => "deselect",
            Self::Camera { .. } => "camera",
            Self::SetLocked { .. } => "set_locked",
            Self::SetDisabled { .. } => "set_disabled",
        }
    }
}

/// Result of one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub index: usize,
    pub op: &'static str,
    /// Rectangle returned by move/end; absent for other ops and stale sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    /// Error code of a rejected step. Rejections do not stop the replay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    pub state: EngineState,
}

/// Final geometry of one target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetReport {
    pub id: TargetId,
    pub rect: Rect,
    pub angle: f64,
}

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub targets: Vec<TargetReport>,
    pub steps: Vec<StepOutcome>,
    pub events: Vec<EngineEvent>,
}

impl Script {
    /// # Errors
    ///
    /// Returns `Json` if `json` is not a valid script.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `Json` if it is not a valid script.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path)
            .map_err(|source| ReplayError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&json)
    }
}

/// Replay `script` against a fresh engine.
///
/// # Errors
///
/// Returns `Engine` if the config or a target fails validation. Steps the
/// engine rejects are recorded in the report instead.
pub fn run(script: &Script) -> Result<Report, ReplayError> {
    let mut engine = Engine::new(script.config)?;
    for spec in &script.targets {
        let handle = engine.register_target(spec.id, spec.rect, spec.angle, spec.options)?;
        if let Some(scale) = spec.scale {
            engine.set_scale(handle, scale)?;
        }
        engine.set_locked(handle, spec.locked)?;
        engine.set_containment(handle, spec.containment)?;
    }

    let mut current: Option<SessionId> = None;
    let mut steps = Vec::with_capacity(script.steps.len());
    for (index, step) in script.steps.iter().enumerate() {
        let (rect, error) = match apply(&mut engine, &mut current, step) {
            Ok(rect) => (rect, None),
            Err(e) => (None, Some(e.error_code())),
        };
        debug!(index, op = step.op(), ?rect, ?error, "replay step");
        steps.push(StepOutcome { index, op: step.op(), rect, error, state: engine.state() });
    }

    let targets = engine
        .target_ids()
        .into_iter()
        .filter_map(|id| engine.handle(id).and_then(|h| engine.geometry(h)).map(|g| (id, g)))
        .map(|(id, g)| TargetReport { id, rect: g.rect, angle: g.angle })
        .collect();
    Ok(Report { targets, steps, events: engine.drain_events() })
}

fn apply(engine: &mut Engine, current: &mut Option<SessionId>, step: &Step) -> Result<Option<Rect>, EngineError> {
    match step {
        Step::Begin { target, handle, at } => {
            let kind = handle.map_or(HandleKind::Move, HandleKind::from_handle);
            *current = Some(engine.begin_session(lookup(engine, *target)?, kind, *at)?);
            Ok(None)
        }
        Step::Move { at } => Ok(current.and_then(|sid| engine.update_session(sid, *at))),
        Step::End { at } => Ok(current.take().and_then(|sid| engine.end_session(sid, *at))),
        Step::Cancel => {
            if let Some(sid) = current.take() {
                engine.cancel_session(sid);
            }
            Ok(None)
        }
        Step::Select { target } => {
            engine.select(lookup(engine, *target)?)?;
            Ok(None)
        }
        Step::Deselect => {
            engine.deselect();
            Ok(None)
        }
        Step::Camera { camera } => {
            engine.set_camera(*camera)?;
            Ok(None)
        }
        Step::SetLocked { target, locked } => {
            engine.set_locked(lookup(engine, *target)?, *locked)?;
            Ok(None)
        }
        Step::SetDisabled { target, disabled } => {
            engine.set_disabled(lookup(engine, *target)?, *disabled)?;
            Ok(None)
        }
    }
}

fn lookup(engine: &Engine, id: TargetId) -> Result<TargetHandle, EngineError> {
    engine.handle(id).ok_or(EngineError::MissingTargetOptions(id))
}
