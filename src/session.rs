//! Session record and the per-frame computation for an active gesture.
//!
//! A session is opened on pointer-down and carries everything needed to
//! recompute the target's geometry from scratch on every pointer-move: the
//! initial geometry, the pointer reference, and the pivot. Nothing is
//! accumulated frame to frame, so replaying the same pointer position always
//! gives the same geometry.
//!
//! All points handled here are in layout space; the engine converts screen
//! positions through its camera before calling in.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::RotateHandlePlacement;
use crate::constraints::resolve;
use crate::geometry::{Geometry, Point, Rect, anchor_fix, normalize_degrees, rotate_point};
use crate::handle::{Handle, HandleKind};
use crate::target::{ContainmentFrame, Target, TargetId};

/// Identifier handed to the host for the active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// State of one pointer gesture between pointer-down and pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub target_id: TargetId,
    pub kind: HandleKind,
    /// Pointer at pointer-down. For resizes on a rotated target this is
    /// already mapped into the target's local frame.
    pub pointer_start: Point,
    /// Center of the initial rectangle in pointer space (center times the
    /// target's scale). Rotation pivot for the whole session.
    pub pivot: Point,
    pub initial: Geometry,
    /// Processed pointer-moves. Zero means nothing has been committed.
    pub move_count: u32,
    pub last: Geometry,
    /// Containment captured at pointer-down for drags.
    pub containment: Option<ContainmentFrame>,
    /// A drag that cannot move its target (locked or moves disabled).
    pub inert: bool,
}

impl Session {
    /// Open a session on `target` at layout-space `pointer`.
    #[must_use]
    pub fn begin(id: SessionId, target: &Target, kind: HandleKind, pointer: Point) -> Self {
        let kind = kind.normalized();
        let initial = target.snapshot_geometry();
        let center = initial.rect.center();
        let pivot = Point::new(center.x * target.scale(), center.y * target.scale());
        let pointer_start = match kind {
            HandleKind::Resize(_) if initial.angle != 0.0 => rotate_point(pivot, pointer, initial.angle),
            _ => pointer,
        };
        let (containment, inert) = match kind {
            HandleKind::Move => (target.containment_frame(), !target.can_move()),
            _ => (None, false),
        };
        Self {
            id,
            target_id: target.id(),
            kind,
            pointer_start,
            pivot,
            initial,
            move_count: 0,
            last: initial,
            containment,
            inert,
        }
    }

    /// Resize handle driving this session, if it is a resize.
    #[must_use]
    pub fn resize_handle(&self) -> Option<Handle> {
        match self.kind {
            HandleKind::Resize(handle) => Some(handle),
            _ => None,
        }
    }

    /// True once a pointer-move has been processed (the gesture is a drag, not a click).
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.move_count > 0
    }

    /// Geometry for the pointer at layout-space `pointer`, from initial state.
    #[must_use]
    pub fn compute(&self, target: &Target, pointer: Point, placement: RotateHandlePlacement) -> Geometry {
        match self.kind {
            HandleKind::Move => self.compute_drag(target, pointer),
            HandleKind::Resize(handle) => self.compute_resize(target, handle, pointer),
            HandleKind::Rotate => self.compute_rotate(pointer, placement),
        }
    }

    /// Final pass on pointer-up.
    ///
    /// For a rotated, corner-anchored resize the anchor is re-derived from
    /// the final size against the original rectangle, never from the
    /// previous frame.
    #[must_use]
    pub fn finalize(&self, target: &Target, pointer: Point, placement: RotateHandlePlacement) -> Geometry {
        let geometry = self.compute(target, pointer, placement);
        let Some(handle) = self.resize_handle() else {
            return geometry;
        };
        let Some(anchor) = handle.anchor() else {
            return geometry;
        };
        if self.initial.angle == 0.0 || target.constraints().resize_from_center {
            return geometry;
        }
        let original = self.initial.rect;
        let resized = Rect { width: geometry.rect.width, height: geometry.rect.height, ..original };
        let origin = anchor_fix(&resized, &original, self.initial.angle, anchor);
        Geometry::new(resized.with_origin(origin), self.initial.angle)
    }

    /// Map a layout point into the target's unrotated frame.
    #[must_use]
    pub fn to_local(&self, pointer: Point) -> Point {
        if self.initial.angle == 0.0 {
            pointer
        } else {
            rotate_point(self.pivot, pointer, self.initial.angle)
        }
    }

    fn compute_drag(&self, target: &Target, pointer: Point) -> Geometry {
        if self.inert {
            return self.initial;
        }
        let options = target.options();
        let scale = target.scale();
        let dx = if options.enable_move_x { pointer.x - self.pointer_start.x } else { 0.0 };
        let dy = if options.enable_move_y { pointer.y - self.pointer_start.y } else { 0.0 };
        let rect = self.initial.rect;
        let mut origin = Point::new(rect.left + dx / scale, rect.top + dy / scale);
        if let Some(frame) = &self.containment {
            origin = frame.clamp(origin);
        }
        Geometry::new(rect.with_origin(origin), self.initial.angle)
    }

    fn compute_resize(&self, target: &Target, handle: Handle, pointer: Point) -> Geometry {
        let local = self.to_local(pointer);
        let scale = target.scale();
        let delta = Point::new((local.x - self.pointer_start.x) / scale, (local.y - self.pointer_start.y) / scale);
        let constraints = target.constraints();
        let mut rect = resolve(handle, &self.initial.rect, delta, constraints);
        if self.initial.angle != 0.0 && !constraints.resize_from_center {
            if let Some(anchor) = handle.anchor() {
                rect = rect.with_origin(anchor_fix(&rect, &self.initial.rect, self.initial.angle, anchor));
            }
        }
        Geometry::new(rect, self.initial.angle)
    }

    fn compute_rotate(&self, pointer: Point, placement: RotateHandlePlacement) -> Geometry {
        let dx = pointer.x - self.pivot.x;
        let dy = pointer.y - self.pivot.y;
        // The bearing of the pivot itself is undefined; hold the last angle.
        if dx == 0.0 && dy == 0.0 {
            return self.last;
        }
        let bearing = dx.atan2(-dy).to_degrees();
        Geometry::new(self.initial.rect, normalize_degrees(bearing - placement.offset_deg()))
    }
}
