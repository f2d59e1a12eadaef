//! Events emitted by the engine for the host to process.
//!
//! Lifecycle events cover the nine start/ongoing/end notifications for drag,
//! resize and rotate gestures. Selection events report when the overlay
//! should be shown or hidden. The engine queues them; the host drains the
//! queue after each input call.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::handle::HandleKind;
use crate::target::TargetId;

/// Which gesture family a lifecycle event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    Drag,
    Resize,
    Rotate,
}

impl Gesture {
    #[must_use]
    pub fn of(kind: HandleKind) -> Self {
        match kind.normalized() {
            HandleKind::Move => Self::Drag,
            HandleKind::Resize(_) => Self::Resize,
            HandleKind::Rotate => Self::Rotate,
        }
    }
}

/// Position of an event within a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// First processed pointer-move; carries the initial geometry.
    Start,
    /// Every processed pointer-move; carries the new geometry.
    Ongoing,
    /// Pointer-up after at least one move; carries the final geometry.
    End,
}

/// Payload shared by all nine lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub gesture: Gesture,
    pub stage: Stage,
    pub rect: Rect,
    pub angle: f64,
    pub target_id: TargetId,
    pub handle_kind: HandleKind,
}

impl LifecycleEvent {
    /// Callback-style name, e.g. `onResizeStart` or `onDragging`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match (self.gesture, self.stage) {
            (Gesture::Drag, Stage::Start) => "onDragStart",
            (Gesture::Drag, Stage::Ongoing) => "onDragging",
            (Gesture::Drag, Stage::End) => "onDragEnd",
            (Gesture::Resize, Stage::Start) => "onResizeStart",
            (Gesture::Resize, Stage::Ongoing) => "onResizing",
            (Gesture::Resize, Stage::End) => "onResizeEnd",
            (Gesture::Rotate, Stage::Start) => "onRotateStart",
            (Gesture::Rotate, Stage::Ongoing) => "onRotating",
            (Gesture::Rotate, Stage::End) => "onRotateEnd",
        }
    }
}

/// Everything the engine reports to the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    Lifecycle(LifecycleEvent),
    /// The overlay should be shown around this target.
    Selected { target_id: TargetId },
    /// The overlay should be hidden.
    Deselected { target_id: TargetId },
}

impl EngineEvent {
    #[must_use]
    pub fn as_lifecycle(&self) -> Option<&LifecycleEvent> {
        match self {
            Self::Lifecycle(event) => Some(event),
            _ => None,
        }
    }
}
