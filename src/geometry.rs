//! Rotation math for rectangles in a shared 2-D layout space.
//!
//! The layout space has its origin at the top-left and y grows downward, so a
//! positive angle is a clockwise rotation on screen. Rectangles are stored
//! unrotated (`left`, `top`, `width`, `height`) together with an angle that
//! rotates them about their own center.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle before rotation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Same size, moved so that its top-left corner sits at `origin`.
    #[must_use]
    pub fn with_origin(self, origin: Point) -> Self {
        Self { left: origin.x, top: origin.y, ..self }
    }

    /// True when every component is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.left.is_finite() && self.top.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// A rectangle together with its clockwise rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub rect: Rect,
    pub angle: f64,
}

impl Geometry {
    #[must_use]
    pub fn new(rect: Rect, angle: f64) -> Self {
        Self { rect, angle }
    }
}

/// One of the four corners of a rectangle, named in its unrotated layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

/// World-space corners of a rotated rectangle.
///
/// ```text
///   a ______________ b
///    |              |
///    |      p       |
///    |______________|
///   d                c
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub a: Point,
    pub b: Point,
    pub c: Point,
    pub d: Point,
    pub center: Point,
}

impl Corners {
    #[must_use]
    pub fn get(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => self.a,
            Corner::TopRight => self.b,
            Corner::BottomRight => self.c,
            Corner::BottomLeft => self.d,
        }
    }

    fn all(&self) -> [Point; 4] {
        [self.a, self.b, self.c, self.d]
    }
}

/// Normalize any angle into `[0, 360)`. Non-finite input maps to 0.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rotate `point` about `center` with the screen-to-local convention.
///
/// Passing a rectangle's own angle maps a screen-space point into that
/// rectangle's unrotated frame; passing the negated angle maps back.
#[must_use]
pub fn rotate_point(center: Point, point: Point, angle_deg: f64) -> Point {
    let radians = angle_deg.to_radians();
    let (sin, cos) = radians.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point {
        x: cos * dx + sin * dy + center.x,
        y: cos * dy - sin * dx + center.y,
    }
}

/// Corners of `rect` after rotating it about its center by `angle_deg`.
#[must_use]
pub fn corners_of(rect: &Rect, angle_deg: f64) -> Corners {
    let center = rect.center();
    let rotate = |p: Point| rotate_point(center, p, -angle_deg);
    Corners {
        a: rotate(Point::new(rect.left, rect.top)),
        b: rotate(Point::new(rect.right(), rect.top)),
        c: rotate(Point::new(rect.right(), rect.bottom())),
        d: rotate(Point::new(rect.left, rect.bottom())),
        center,
    }
}

/// New top-left for `new_rect` such that its `anchor` corner, rotated by
/// `angle_deg`, lands where the same corner of `old_rect` was.
#[must_use]
pub fn anchor_fix(new_rect: &Rect, old_rect: &Rect, angle_deg: f64, anchor: Corner) -> Point {
    let fixed = corners_of(old_rect, angle_deg).get(anchor);
    let moved = corners_of(new_rect, angle_deg).get(anchor);
    Point {
        x: new_rect.left + fixed.x - moved.x,
        y: new_rect.top + fixed.y - moved.y,
    }
}

/// Axis-aligned bounding box of `rect` rotated by `angle_deg`.
#[must_use]
pub fn bounding_box(rect: &Rect, angle_deg: f64) -> Rect {
    let corners = corners_of(rect, angle_deg).all();
    let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}
