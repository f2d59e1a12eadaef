//! Shared numeric constants for the interaction engine.

// ── Constraint defaults ─────────────────────────────────────────

/// Smallest width a target may be resized to unless its options say otherwise.
pub const DEFAULT_MIN_WIDTH: f64 = 30.0;

/// Smallest height a target may be resized to unless its options say otherwise.
pub const DEFAULT_MIN_HEIGHT: f64 = 30.0;

// ── Rotation ────────────────────────────────────────────────────

/// Compass offset applied when the rotate affordance hangs below the box.
pub const BOTTOM_ROTATE_HANDLE_OFFSET_DEG: f64 = 180.0;
