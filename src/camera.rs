//! Screen ↔ layout conversion for pointer input.
//!
//! Pointer events arrive in screen pixels. The host reports how its layout
//! space is scrolled and zoomed relative to the screen, and the engine maps
//! every pointer position through this camera before any session math runs.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Pan/zoom of the layout space as seen on screen.
///
/// `pan_x` / `pan_y` are the screen position of the layout origin in CSS
/// pixels (the negated scroll offset). `zoom` is screen pixels per layout
/// unit (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to layout coordinates.
    #[must_use]
    pub fn screen_to_layout(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// A camera is usable when pan is finite and zoom is finite and positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.pan_x.is_finite() && self.pan_y.is_finite() && self.zoom.is_finite() && self.zoom > 0.0
    }
}
