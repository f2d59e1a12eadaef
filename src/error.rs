//! Error taxonomy for the interaction engine.
//!
//! Every variant is a programming error on the caller's side: the engine has
//! no I/O, so nothing here is retryable. Constraint violations never show up
//! as errors; they are resolved by clamping.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::target::TargetId;

/// Errors returned by [`crate::engine::Engine`] operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Session or target lifecycle misuse.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The operation names a target whose options the engine does not hold.
    #[error("missing target options: {0}")]
    MissingTargetOptions(TargetId),

    /// Registration-time validation of target options or geometry failed.
    #[error("invalid target options: {0}")]
    InvalidOptions(String),
}

impl EngineError {
    /// Stable machine-readable code for hosts that surface errors.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidState(_) => "E_INVALID_STATE",
            Self::MissingTargetOptions(_) => "E_MISSING_TARGET_OPTIONS",
            Self::InvalidOptions(_) => "E_INVALID_OPTIONS",
        }
    }

    pub(crate) fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub(crate) fn invalid_options(msg: impl Into<String>) -> Self {
        Self::InvalidOptions(msg.into())
    }
}
