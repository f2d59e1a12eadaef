//! Interaction engine: the single owner of targets, selection and the active session.
//!
//! Hosts feed screen-space pointer positions in and drain `EngineEvent`s out.
//! At most one session is active per engine; separate engines are fully
//! independent.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::event::{EngineEvent, Gesture, LifecycleEvent, Stage};
use crate::geometry::{Geometry, Point, Rect};
use crate::handle::{Handle, HandleKind};
use crate::session::{Session, SessionId};
use crate::target::{Target, TargetId, TargetOptions, TargetStore};

/// Reference to a registered target, returned by [`Engine::register_target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetHandle(TargetId);

impl TargetHandle {
    #[must_use]
    pub fn id(self) -> TargetId {
        self.0
    }
}

/// Where the engine is in the idle → selected → gesture cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EngineState {
    Idle,
    Selected { target_id: TargetId },
    Dragging { target_id: TargetId },
    Resizing { target_id: TargetId, handle: Handle },
    Rotating { target_id: TargetId },
}

/// The interaction engine.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    camera: Camera,
    targets: TargetStore,
    selected: Option<TargetId>,
    session: Option<Session>,
    next_session: u64,
    events: Vec<EngineEvent>,
}

impl Default for Engine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            config,
            camera: config.camera,
            targets: TargetStore::new(),
            selected: None,
            session: None,
            next_session: 1,
            events: Vec::new(),
        }
    }
}

impl Engine {
    /// # Errors
    ///
    /// Returns `InvalidOptions` if `config` fails validation.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config, camera: config.camera, ..Self::default() })
    }

    // --- Registration ---

    /// Register a rectangle under a caller-chosen id.
    ///
    /// # Errors
    ///
    /// `InvalidOptions` if the options, rectangle or angle fail validation;
    /// `InvalidState` if `id` is already registered.
    pub fn register_target(
        &mut self,
        id: TargetId,
        rect: Rect,
        angle: f64,
        options: TargetOptions,
    ) -> Result<TargetHandle, EngineError> {
        if self.targets.contains(&id) {
            return Err(EngineError::invalid_state(format!("target {id} is already registered")));
        }
        let target = Target::new(id, rect, angle, options)?;
        debug!(target_id = %id, rect = ?target.rect(), angle = target.angle(), "target registered");
        self.targets.insert(target);
        Ok(TargetHandle(id))
    }

    /// Drop a target. Its session, if any, is discarded and its selection cleared.
    ///
    /// # Errors
    ///
    /// `MissingTargetOptions` if the target is not registered.
    pub fn deregister_target(&mut self, handle: TargetHandle) -> Result<(), EngineError> {
        let id = handle.id();
        if self.targets.remove(&id).is_none() {
            return Err(EngineError::MissingTargetOptions(id));
        }
        if self.session.as_ref().is_some_and(|s| s.target_id == id) {
            self.session = None;
        }
        if self.selected == Some(id) {
            self.set_selection(None);
        }
        debug!(target_id = %id, "target deregistered");
        Ok(())
    }

    /// Handle for an already-registered id.
    #[must_use]
    pub fn handle(&self, id: TargetId) -> Option<TargetHandle> {
        self.targets.contains(&id).then_some(TargetHandle(id))
    }

    // --- Sessions ---

    /// Open a session on pointer-down at screen position `screen`.
    ///
    /// # Errors
    ///
    /// `MissingTargetOptions` for an unknown target; `InvalidState` when a
    /// session is already active, the target is disabled, a resize or rotate
    /// is attempted on a locked target or a disabled handle, or the pointer
    /// is not finite.
    pub fn begin_session(
        &mut self,
        handle: TargetHandle,
        kind: HandleKind,
        screen: Point,
    ) -> Result<SessionId, EngineError> {
        let id = handle.id();
        let target = self.targets.get(&id).ok_or(EngineError::MissingTargetOptions(id))?;
        if let Some(active) = &self.session {
            return Err(EngineError::invalid_state(format!(
                "{} is still active on target {}",
                active.id, active.target_id
            )));
        }
        let kind = kind.normalized();
        if target.is_disabled() {
            return Err(EngineError::invalid_state(format!("target {id} is disabled")));
        }
        if target.is_locked() && kind != HandleKind::Move {
            return Err(EngineError::invalid_state(format!("target {id} is locked")));
        }
        if let Some(h) = kind.handle() {
            if !target.options().handles.contains(h) {
                return Err(EngineError::invalid_state(format!("handle {h:?} is disabled on target {id}")));
            }
        }
        let layout = self.camera.screen_to_layout(screen);
        if !is_finite_point(layout) {
            return Err(EngineError::invalid_state(format!("pointer must be finite, got {screen:?}")));
        }

        let session_id = SessionId(self.next_session);
        self.next_session = self.next_session.wrapping_add(1);
        let session = Session::begin(session_id, target, kind, layout);
        debug!(session_id = %session_id, target_id = %id, ?kind, inert = session.inert, "session started");
        self.session = Some(session);
        self.set_selection(Some(id));
        Ok(session_id)
    }

    /// Process a pointer-move. Returns the committed rectangle, or `None` if
    /// `id` is not the active session.
    pub fn update_session(&mut self, id: SessionId, screen: Point) -> Option<Rect> {
        let placement = self.config.rotate_handle;
        let layout = self.camera.screen_to_layout(screen);
        let session = match self.session.as_mut() {
            Some(session) if session.id == id => session,
            _ => {
                warn!(session_id = %id, "update for inactive session ignored");
                return None;
            }
        };
        let target = self.targets.get_mut(&session.target_id)?;
        if session.inert || !is_finite_point(layout) {
            trace!(session_id = %id, inert = session.inert, "pointer-move skipped");
            return Some(target.rect());
        }

        let geometry = session.compute(target, layout, placement);
        if !session.has_moved() {
            self.events.push(lifecycle(session, Stage::Start, session.initial));
        }
        session.move_count = session.move_count.saturating_add(1);
        session.last = geometry;
        target.apply_geometry(geometry.rect, geometry.angle);
        self.events.push(lifecycle(session, Stage::Ongoing, geometry));
        trace!(session_id = %id, move_count = session.move_count, rect = ?geometry.rect, angle = geometry.angle, "pointer-move");
        Some(geometry.rect)
    }

    /// Process pointer-up and close the session.
    ///
    /// A session with no processed moves is a click: it is discarded without
    /// touching the target or emitting a lifecycle event. Returns `None` if
    /// `id` is not the active session.
    pub fn end_session(&mut self, id: SessionId, screen: Point) -> Option<Rect> {
        if self.session.as_ref().map(|s| s.id) != Some(id) {
            warn!(session_id = %id, "end for inactive session ignored");
            return None;
        }
        let session = self.session.take()?;
        let placement = self.config.rotate_handle;
        let layout = self.camera.screen_to_layout(screen);
        let target = self.targets.get_mut(&session.target_id)?;
        if !session.has_moved() {
            debug!(session_id = %id, target_id = %session.target_id, "click; session discarded");
            return Some(target.rect());
        }

        let geometry =
            if is_finite_point(layout) { session.finalize(target, layout, placement) } else { session.last };
        target.apply_geometry(geometry.rect, geometry.angle);
        self.events.push(lifecycle(&session, Stage::End, geometry));
        debug!(
            session_id = %id,
            target_id = %session.target_id,
            moves = session.move_count,
            rect = ?geometry.rect,
            angle = geometry.angle,
            "session ended"
        );
        Some(geometry.rect)
    }

    /// Abort the session, restoring the target's initial geometry. No event
    /// is emitted. Returns false if `id` is not the active session.
    pub fn cancel_session(&mut self, id: SessionId) -> bool {
        if self.session.as_ref().map(|s| s.id) != Some(id) {
            warn!(session_id = %id, "cancel for inactive session ignored");
            return false;
        }
        self.abort_session();
        true
    }

    // --- Selection ---

    /// Show the overlay around a target.
    ///
    /// # Errors
    ///
    /// `MissingTargetOptions` for an unknown target; `InvalidState` if the
    /// target is disabled or a session is active on another target.
    pub fn select(&mut self, handle: TargetHandle) -> Result<(), EngineError> {
        let id = handle.id();
        let target = self.targets.get(&id).ok_or(EngineError::MissingTargetOptions(id))?;
        if target.is_disabled() {
            return Err(EngineError::invalid_state(format!("target {id} is disabled")));
        }
        if let Some(active) = self.session.as_ref().filter(|s| s.target_id != id) {
            return Err(EngineError::invalid_state(format!(
                "{} is still active on target {}",
                active.id, active.target_id
            )));
        }
        self.set_selection(Some(id));
        Ok(())
    }

    /// Hide the overlay. An active session is cancelled first.
    pub fn deselect(&mut self) {
        self.abort_session();
        self.set_selection(None);
    }

    // --- Setters ---

    /// # Errors
    ///
    /// `MissingTargetOptions`, `InvalidState` during a session on this target,
    /// or `InvalidOptions` for a non-finite rectangle or angle.
    pub fn set_geometry(&mut self, handle: TargetHandle, rect: Rect, angle: f64) -> Result<(), EngineError> {
        if !rect.is_finite() || !angle.is_finite() {
            return Err(EngineError::invalid_options(format!("geometry must be finite, got {rect:?} @ {angle}")));
        }
        self.idle_target_mut(handle, "set_geometry")?.apply_geometry(rect, angle);
        Ok(())
    }

    /// # Errors
    ///
    /// `MissingTargetOptions`, `InvalidState` during a session on this target,
    /// or `InvalidOptions` for a non-finite angle.
    pub fn set_angle(&mut self, handle: TargetHandle, angle: f64) -> Result<(), EngineError> {
        if !angle.is_finite() {
            return Err(EngineError::invalid_options(format!("angle must be finite, got {angle}")));
        }
        self.idle_target_mut(handle, "set_angle")?.set_angle(angle);
        Ok(())
    }

    /// # Errors
    ///
    /// `MissingTargetOptions`, `InvalidState` during a session on this target,
    /// or `InvalidOptions` unless `scale` is finite and positive.
    pub fn set_scale(&mut self, handle: TargetHandle, scale: f64) -> Result<(), EngineError> {
        self.idle_target_mut(handle, "set_scale")?.set_scale(scale)
    }

    /// Replace a target's options; its rectangle is re-clamped to the new limits.
    ///
    /// # Errors
    ///
    /// `MissingTargetOptions`, `InvalidState` during a session on this target,
    /// or `InvalidOptions` if the options fail validation.
    pub fn set_options(&mut self, handle: TargetHandle, options: TargetOptions) -> Result<(), EngineError> {
        self.idle_target_mut(handle, "set_options")?.set_options(options)
    }

    /// Locking only gates new sessions; an active one runs to completion.
    ///
    /// # Errors
    ///
    /// `MissingTargetOptions` for an unknown target.
    pub fn set_locked(&mut self, handle: TargetHandle, locked: bool) -> Result<(), EngineError> {
        self.target_mut(handle)?.set_locked(locked);
        Ok(())
    }

    /// Disabling aborts the target's session and hides its overlay.
    ///
    /// # Errors
    ///
    /// `MissingTargetOptions` for an unknown target.
    pub fn set_disabled(&mut self, handle: TargetHandle, disabled: bool) -> Result<(), EngineError> {
        let id = handle.id();
        self.target_mut(handle)?.set_disabled(disabled);
        if !disabled {
            return Ok(());
        }
        if self.session.as_ref().is_some_and(|s| s.target_id == id) {
            self.abort_session();
        }
        if self.selected == Some(id) {
            self.set_selection(None);
        }
        Ok(())
    }

    /// Containment is captured when a drag starts, so changes apply to the next drag.
    ///
    /// # Errors
    ///
    /// `MissingTargetOptions` for an unknown target; `InvalidOptions` for
    /// non-finite bounds.
    pub fn set_containment(&mut self, handle: TargetHandle, bounds: Option<Rect>) -> Result<(), EngineError> {
        if bounds.is_some_and(|b| !b.is_finite()) {
            return Err(EngineError::invalid_options(format!("containment must be finite, got {bounds:?}")));
        }
        self.target_mut(handle)?.set_containment(bounds);
        Ok(())
    }

    /// # Errors
    ///
    /// `InvalidOptions` if the camera cannot map screen points.
    pub fn set_camera(&mut self, camera: Camera) -> Result<(), EngineError> {
        if !camera.is_valid() {
            return Err(EngineError::invalid_options(format!("camera is not usable: {camera:?}")));
        }
        self.camera = camera;
        Ok(())
    }

    // --- Queries ---

    #[must_use]
    pub fn target(&self, handle: TargetHandle) -> Option<&Target> {
        self.targets.get(&handle.id())
    }

    #[must_use]
    pub fn geometry(&self, handle: TargetHandle) -> Option<Geometry> {
        self.target(handle).map(Target::snapshot_geometry)
    }

    #[must_use]
    pub fn active_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn selection(&self) -> Option<TargetId> {
        self.selected
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        match (&self.session, self.selected) {
            (Some(session), _) => {
                let target_id = session.target_id;
                match session.kind {
                    HandleKind::Move => EngineState::Dragging { target_id },
                    HandleKind::Resize(handle) => EngineState::Resizing { target_id, handle },
                    HandleKind::Rotate => EngineState::Rotating { target_id },
                }
            }
            (None, Some(target_id)) => EngineState::Selected { target_id },
            (None, None) => EngineState::Idle,
        }
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registered target ids in a stable order.
    #[must_use]
    pub fn target_ids(&self) -> Vec<TargetId> {
        self.targets.ids()
    }

    /// Events queued since the last drain, oldest first.
    #[must_use]
    pub fn pending_events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Internals ---

    fn target_mut(&mut self, handle: TargetHandle) -> Result<&mut Target, EngineError> {
        let id = handle.id();
        self.targets.get_mut(&id).ok_or(EngineError::MissingTargetOptions(id))
    }

    /// Mutable target, refused while a session is manipulating it.
    fn idle_target_mut(&mut self, handle: TargetHandle, op: &str) -> Result<&mut Target, EngineError> {
        let id = handle.id();
        if let Some(active) = self.session.as_ref().filter(|s| s.target_id == id) {
            return Err(EngineError::invalid_state(format!("{op} refused: {} is active on target {id}", active.id)));
        }
        self.target_mut(handle)
    }

    /// Drop the active session, if any, and revert its target.
    fn abort_session(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        if session.has_moved() {
            if let Some(target) = self.targets.get_mut(&session.target_id) {
                target.apply_geometry(session.initial.rect, session.initial.angle);
            }
        }
        debug!(session_id = %session.id, target_id = %session.target_id, moves = session.move_count, "session cancelled");
    }

    fn set_selection(&mut self, next: Option<TargetId>) {
        if self.selected == next {
            return;
        }
        if let Some(target_id) = self.selected.take() {
            self.events.push(EngineEvent::Deselected { target_id });
        }
        if let Some(target_id) = next {
            self.events.push(EngineEvent::Selected { target_id });
        }
        self.selected = next;
        debug!(selected = ?next, "selection changed");
    }
}

fn lifecycle(session: &Session, stage: Stage, geometry: Geometry) -> EngineEvent {
    EngineEvent::Lifecycle(LifecycleEvent {
        gesture: Gesture::of(session.kind),
        stage,
        rect: geometry.rect,
        angle: geometry.angle,
        target_id: session.target_id,
        handle_kind: session.kind,
    })
}

fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
