//! Engine-wide configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::consts::BOTTOM_ROTATE_HANDLE_OFFSET_DEG;
use crate::error::EngineError;

/// Where the overlay draws its rotate affordance relative to the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateHandlePlacement {
    /// Above the box: a pointer straight above the pivot reads 0°.
    #[default]
    Top,
    /// Below the box: a pointer straight below the pivot reads 0°.
    Bottom,
}

impl RotateHandlePlacement {
    /// Degrees subtracted from the raw compass bearing of the pointer.
    #[must_use]
    pub fn offset_deg(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Bottom => BOTTOM_ROTATE_HANDLE_OFFSET_DEG,
        }
    }
}

/// Settings shared by every target of one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rotate_handle: RotateHandlePlacement,
    /// Initial screen ↔ layout mapping; hosts update it as they scroll/zoom.
    pub camera: Camera,
}

impl EngineConfig {
    /// # Errors
    ///
    /// Returns `InvalidOptions` if the camera cannot map screen points.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.camera.is_valid() {
            return Err(EngineError::invalid_options(format!("camera is not usable: {:?}", self.camera)));
        }
        Ok(())
    }
}
