//! Core logic for the Halo circular camera preview.
//!
//! This crate is UI-free. It provides:
//! - The capture session state machine (permission -> configure -> run)
//! - Configuration negotiation against device capabilities
//! - Window geometry: size presets, center-preserving resize, the inner
//!   clipped circle, and the mirror transform
//!
//! The desktop app supplies the real camera backend (nokhwa) and the real
//! window; tests drive everything with scripted fakes.

pub mod backend;
pub mod device;
pub mod display;
pub mod geometry;
pub mod session;

pub use backend::{Authorization, CameraBackend, CameraInfo, CameraStream, CaptureError, CaptureResult, Frame};
pub use device::{negotiate, CaptureConfig, DeviceCapabilities, Resolution};
pub use display::{DisplayController, WindowSink, WindowState};
pub use geometry::{Point, Rect, SizePreset, Transform, CIRCLE_MARGIN};
pub use session::{Phase, Session, SessionEvent, SessionManager};
