use uuid::Uuid;

use super::*;

#[test]
fn error_codes_are_stable() {
    assert_eq!(EngineError::invalid_state("x").error_code(), "E_INVALID_STATE");
    assert_eq!(EngineError::MissingTargetOptions(Uuid::nil()).error_code(), "E_MISSING_TARGET_OPTIONS");
    assert_eq!(EngineError::invalid_options("x").error_code(), "E_INVALID_OPTIONS");
}

#[test]
fn display_includes_detail() {
    let err = EngineError::invalid_state("session already active");
    assert_eq!(err.to_string(), "invalid state: session already active");
    let err = EngineError::MissingTargetOptions(Uuid::nil());
    assert!(err.to_string().contains("00000000-0000-0000-0000-000000000000"));
}
