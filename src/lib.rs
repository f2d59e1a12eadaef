//! Pointer-driven move, resize and rotate for rotatable rectangles.
//!
//! The crate is the interaction core behind a selection overlay: the host
//! registers rectangles, forwards pointer-down/move/up in screen coordinates,
//! and applies the geometry the engine hands back. Rendering the overlay and
//! wiring input listeners stay with the host; everything between a pointer
//! position and a committed rectangle lives here.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::Engine`]: registration, selection, session protocol, event outbox |
//! | [`session`] | Active-gesture record and the per-frame geometry computation |
//! | [`constraints`] | Size limits, aspect ratio and resize-from-center solver |
//! | [`geometry`] | Points, rectangles and rotation math (corners, anchor fix) |
//! | [`handle`] | The nine overlay handles and what each one drives |
//! | [`target`] | Registered rectangles, their options and containment |
//! | [`event`] | Lifecycle and selection events for the host |
//! | [`camera`] | Screen ↔ layout conversion |
//! | [`config`] | Engine-wide settings |
//! | [`replay`] | JSON gesture scripts replayed against an engine |
//! | [`error`] | Error taxonomy |
//! | [`consts`] | Shared numeric constants (default minimum sizes, handle offsets) |

pub mod camera;
pub mod config;
pub mod constraints;
pub mod consts;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod handle;
pub mod replay;
pub mod session;
pub mod target;
