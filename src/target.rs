//! Target model: the manipulable rectangles and the store that owns them.
//!
//! A `Target` is created when the host registers an element, mutated only by
//! the engine (sessions or explicit setters), and dropped on deregistration.
//! `TargetOptions` is the serde-facing configuration for one target; it is
//! validated once at registration and turned into solver `Constraints`.

#[cfg(test)]
#[path = "target_test.rs"]
mod target_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constraints::Constraints;
use crate::consts::{DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};
use crate::error::EngineError;
use crate::geometry::{Geometry, Point, Rect, bounding_box, normalize_degrees};
use crate::handle::HandleSet;

/// Unique identifier for a registered target, supplied by the host.
pub type TargetId = Uuid;

/// Per-target configuration. Every field has the widget's default.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetOptions {
    pub min_width: f64,
    pub min_height: f64,
    /// `None` means unbounded.
    pub max_width: Option<f64>,
    /// `None` means unbounded.
    pub max_height: Option<f64>,
    pub aspect_ratio: bool,
    pub resize_from_center: bool,
    /// Master switch for body drags.
    pub enable_move: bool,
    pub enable_move_x: bool,
    pub enable_move_y: bool,
    /// Handles the overlay offers.
    pub handles: HandleSet,
}

impl Default for TargetOptions {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            max_width: None,
            max_height: None,
            aspect_ratio: true,
            resize_from_center: false,
            enable_move: true,
            enable_move_x: true,
            enable_move_y: true,
            handles: HandleSet::default(),
        }
    }
}

impl TargetOptions {
    /// Solver view of these options.
    #[must_use]
    pub fn constraints(&self) -> Constraints {
        Constraints {
            min_width: self.min_width,
            min_height: self.min_height,
            max_width: self.max_width.unwrap_or(f64::INFINITY),
            max_height: self.max_height.unwrap_or(f64::INFINITY),
            aspect_ratio: self.aspect_ratio,
            resize_from_center: self.resize_from_center,
        }
    }

    /// # Errors
    ///
    /// Returns `InvalidOptions` when the size limits are unusable.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.constraints().validate()
    }
}

/// Containment data captured once when a drag starts.
///
/// `offset` is the displacement from the target's layout origin to the
/// origin of its rendered (rotated) bounding box; `width`/`height` are that
/// box's size. Angle is fixed during a drag, so none of this changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainmentFrame {
    pub bounds: Rect,
    pub offset: Point,
    pub width: f64,
    pub height: f64,
}

impl ContainmentFrame {
    /// Pull a candidate layout origin back so the rendered box stays inside
    /// `bounds`. When the box is larger than the bounds the far edge wins.
    #[must_use]
    pub fn clamp(&self, origin: Point) -> Point {
        let mut x = origin.x;
        let mut y = origin.y;
        let min_x = self.bounds.left - self.offset.x;
        let max_x = self.bounds.right() - self.offset.x - self.width;
        let min_y = self.bounds.top - self.offset.y;
        let max_y = self.bounds.bottom() - self.offset.y - self.height;
        if x < min_x {
            x = min_x;
        }
        if x > max_x {
            x = max_x;
        }
        if y < min_y {
            y = min_y;
        }
        if y > max_y {
            y = max_y;
        }
        Point::new(x, y)
    }
}

/// One manipulable rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    id: TargetId,
    geometry: Geometry,
    scale: f64,
    options: TargetOptions,
    constraints: Constraints,
    locked: bool,
    disabled: bool,
    containment: Option<Rect>,
}

impl Target {
    /// Build a validated target. The initial rectangle is clamped into the
    /// option limits and the angle normalized.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOptions` if the options fail validation or the
    /// rectangle or angle is not finite.
    pub fn new(id: TargetId, rect: Rect, angle: f64, options: TargetOptions) -> Result<Self, EngineError> {
        options.validate()?;
        if !rect.is_finite() {
            return Err(EngineError::invalid_options(format!("rectangle must be finite, got {rect:?}")));
        }
        if !angle.is_finite() {
            return Err(EngineError::invalid_options(format!("angle must be finite, got {angle}")));
        }
        let constraints = options.constraints();
        Ok(Self {
            id,
            geometry: Geometry::new(constraints.clamp_rect(rect), normalize_degrees(angle)),
            scale: 1.0,
            options,
            constraints,
            locked: false,
            disabled: false,
            containment: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> TargetId {
        self.id
    }

    /// Current rectangle and angle.
    #[must_use]
    pub fn snapshot_geometry(&self) -> Geometry {
        self.geometry
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        self.geometry.rect
    }

    #[must_use]
    pub fn angle(&self) -> f64 {
        self.geometry.angle
    }

    /// Screen units per layout unit contributed by ancestor transforms.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn options(&self) -> &TargetOptions {
        &self.options
    }

    #[must_use]
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn containment(&self) -> Option<Rect> {
        self.containment
    }

    /// False while the target is locked or disabled.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        !self.locked && !self.disabled
    }

    /// Whether a body drag may actually move the target.
    #[must_use]
    pub fn can_move(&self) -> bool {
        self.is_interactive() && self.options.enable_move
    }

    /// Write geometry through. Callers run it through the solver first.
    pub fn apply_geometry(&mut self, rect: Rect, angle: f64) {
        self.geometry = Geometry::new(rect, normalize_degrees(angle));
    }

    pub fn set_angle(&mut self, deg: f64) {
        self.geometry.angle = normalize_degrees(deg);
    }

    /// # Errors
    ///
    /// Returns `InvalidOptions` unless `scale` is finite and positive.
    pub fn set_scale(&mut self, scale: f64) -> Result<(), EngineError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(EngineError::invalid_options(format!("scale must be finite and > 0, got {scale}")));
        }
        self.scale = scale;
        Ok(())
    }

    /// Replace the options, re-clamping the current rectangle to the new limits.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOptions` if the new options fail validation.
    pub fn set_options(&mut self, options: TargetOptions) -> Result<(), EngineError> {
        options.validate()?;
        self.constraints = options.constraints();
        self.options = options;
        self.geometry.rect = self.constraints.clamp_rect(self.geometry.rect);
        Ok(())
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_containment(&mut self, containment: Option<Rect>) {
        self.containment = containment;
    }

    /// Capture the containment frame for a drag starting now.
    #[must_use]
    pub fn containment_frame(&self) -> Option<ContainmentFrame> {
        let bounds = self.containment?;
        let rect = self.geometry.rect;
        let rendered = bounding_box(&rect, self.geometry.angle);
        Some(ContainmentFrame {
            bounds,
            offset: Point::new(rendered.left - rect.left, rendered.top - rect.top),
            width: rendered.width,
            height: rendered.height,
        })
    }
}

/// In-memory store of registered targets.
#[derive(Debug, Default)]
pub struct TargetStore {
    targets: HashMap<TargetId, Target>,
}

impl TargetStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { targets: HashMap::new() }
    }

    /// Insert a target. Returns false (and leaves the store alone) if the id is taken.
    pub fn insert(&mut self, target: Target) -> bool {
        if self.targets.contains_key(&target.id) {
            return false;
        }
        self.targets.insert(target.id, target);
        true
    }

    /// Remove a target by id, returning it if it was present.
    pub fn remove(&mut self, id: &TargetId) -> Option<Target> {
        self.targets.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &TargetId) -> Option<&Target> {
        self.targets.get(id)
    }

    pub fn get_mut(&mut self, id: &TargetId) -> Option<&mut Target> {
        self.targets.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &TargetId) -> bool {
        self.targets.contains_key(id)
    }

    /// Registered ids in a stable order.
    #[must_use]
    pub fn ids(&self) -> Vec<TargetId> {
        let mut ids: Vec<TargetId> = self.targets.keys().copied().collect();
        ids.sort();
        ids
    }}
