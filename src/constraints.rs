//! Constraint solver: turns a handle and a local-frame pointer delta into a
//! candidate rectangle that respects size limits and aspect ratio.
//!
//! `resolve` is pure and recomputes from the session's initial rectangle on
//! every pointer-move, so repeated calls with the same delta give the same
//! answer and nothing accumulates between frames.

#[cfg(test)]
#[path = "constraints_test.rs"]
mod constraints_test;

use crate::consts::{DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};
use crate::error::EngineError;
use crate::geometry::{Point, Rect};
use crate::handle::{Handle, Sign};

/// Size limits and resize modes for one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min_width: f64,
    pub min_height: f64,
    /// `f64::INFINITY` when unbounded.
    pub max_width: f64,
    /// `f64::INFINITY` when unbounded.
    pub max_height: f64,
    /// Corner handles keep the initial height/width ratio.
    pub aspect_ratio: bool,
    /// Growth is symmetric about the center instead of pinned to a corner.
    pub resize_from_center: bool,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            max_width: f64::INFINITY,
            max_height: f64::INFINITY,
            aspect_ratio: true,
            resize_from_center: false,
        }
    }
}

impl Constraints {
    /// Check that the limits describe a non-empty, positive range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOptions` if a minimum is not finite and positive, a
    /// maximum is NaN, or a minimum exceeds its maximum.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, min, max) in [
            ("width", self.min_width, self.max_width),
            ("height", self.min_height, self.max_height),
        ] {
            if !min.is_finite() || min <= 0.0 {
                return Err(EngineError::invalid_options(format!("min_{name} must be finite and > 0, got {min}")));
            }
            if max.is_nan() {
                return Err(EngineError::invalid_options(format!("max_{name} is NaN")));
            }
            if min > max {
                return Err(EngineError::invalid_options(format!("min_{name} {min} exceeds max_{name} {max}")));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn clamp_width(&self, width: f64) -> f64 {
        clamp_dim(width, self.min_width, self.max_width)
    }

    #[must_use]
    pub fn clamp_height(&self, height: f64) -> f64 {
        clamp_dim(height, self.min_height, self.max_height)
    }

    /// `rect` with both dimensions pulled into range, origin untouched.
    #[must_use]
    pub fn clamp_rect(&self, rect: Rect) -> Rect {
        Rect { width: self.clamp_width(rect.width), height: self.clamp_height(rect.height), ..rect }
    }

    fn width_in_range(&self, width: f64) -> bool {
        width >= self.min_width && width <= self.max_width
    }

    fn height_in_range(&self, height: f64) -> bool {
        height >= self.min_height && height <= self.max_height
    }
}

// Lower bound first, then upper: an inverted range resolves to the maximum.
fn clamp_dim(value: f64, min: f64, max: f64) -> f64 {
    let mut v = value;
    if v < min || v.is_nan() {
        v = min;
    }
    if v > max {
        v = max;
    }
    v
}

/// Origin that keeps a `width` × `height` rectangle centered on `initial`.
#[must_use]
pub fn center_origin(initial: &Rect, width: f64, height: f64) -> Point {
    let c = initial.center();
    Point::new(c.x - width / 2.0, c.y - height / 2.0)
}

/// Resolve the rectangle a resize handle produces for `raw_delta`.
///
/// `raw_delta` is the pointer displacement since session start, already in
/// the target's local (unrotated) frame and already divided by its scale.
/// The returned rectangle is axis-aligned in that frame; rotation-aware
/// repositioning is the caller's job.
#[must_use]
pub fn resolve(handle: Handle, initial: &Rect, raw_delta: Point, constraints: &Constraints) -> Rect {
    let spec = handle.spec();
    let delta = if constraints.resize_from_center {
        Point::new(raw_delta.x * 2.0, raw_delta.y * 2.0)
    } else {
        raw_delta
    };

    let mut width = initial.width;
    let mut height = initial.height;
    if spec.width.affects() {
        width = constraints.clamp_width(initial.width + spec.width.factor() * delta.x);
    }
    if spec.height.affects() {
        height = constraints.clamp_height(initial.height + spec.height.factor() * delta.y);
    }

    if constraints.aspect_ratio && handle.is_corner() {
        (width, height) = keep_aspect(initial, width, constraints);
    }

    let origin = if constraints.resize_from_center {
        center_origin(initial, width, height)
    } else {
        let left = if spec.width == Sign::Shrink { initial.right() - width } else { initial.left };
        let top = if spec.height == Sign::Shrink { initial.bottom() - height } else { initial.top };
        Point::new(left, top)
    };

    Rect::new(origin.x, origin.y, width, height)
}

/// Derive height from the already-clamped width using the initial ratio.
///
/// If that height is out of range it is clamped and the width re-derived
/// from it once. The width is not re-checked afterwards, so jointly
/// unsatisfiable limits can leave it marginally outside its range.
fn keep_aspect(initial: &Rect, width: f64, constraints: &Constraints) -> (f64, f64) {
    if initial.width <= 0.0 || initial.height <= 0.0 {
        return (width, constraints.clamp_height(initial.height));
    }
    let height = width * initial.height / initial.width;
    if constraints.height_in_range(height) {
        return (width, height);
    }
    let height = constraints.clamp_height(height);
    let rederived = height * initial.width / initial.height;
    if !constraints.width_in_range(rederived) {
        tracing::trace!(width = rederived, height, "aspect-locked limits are jointly unsatisfiable");
    }
    (rederived, height)
}
