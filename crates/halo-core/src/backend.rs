//! The seam between the session state machine and camera hardware.
//!
//! The desktop app implements [`CameraBackend`] on top of nokhwa; tests use
//! a scripted fake. The session layer never touches a camera API directly.

use std::time::Duration;

use crate::device::{CaptureConfig, DeviceCapabilities};

/// Camera authorization as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Authorized,
    /// The user has not been asked yet; a request will show the OS dialog.
    NotDetermined,
    /// Denied or restricted. Only an external settings change clears this.
    Denied,
}

/// A decoded RGBA video frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8, `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * 4) as usize);
        Self { width, height, data }
    }
}

/// Camera device information surfaced to the UI.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CameraInfo {
    pub id: String,
    pub name: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CaptureError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("no usable camera device found")]
    NoDevice,

    #[error("failed to open camera: {0}")]
    Open(String),

    #[error("failed to capture frame: {0}")]
    Capture(String),

    #[error("camera configuration timed out after {0:?}")]
    Timeout(Duration),
}

pub type CaptureResult<T> = Result<T, CaptureError>;

/// An open capture pipeline producing frames until dropped.
///
/// Streams are created and consumed on the capture thread only; they never
/// cross threads, so no `Send` bound is required of implementations.
pub trait CameraStream {
    /// Block until the next frame is available and decode it.
    fn next_frame(&mut self) -> CaptureResult<Frame>;
}

/// Camera access as the session layer sees it.
///
/// `open` is called with the negotiated config; implementations must fall
/// back to default settings rather than fail when applying the negotiated
/// controls does not work (only a missing or unopenable device is an error).
pub trait CameraBackend: Send + Sync + 'static {
    type Stream: CameraStream + 'static;

    fn authorization(&self) -> Authorization;

    /// Ask the OS for camera access. The callback may fire on any thread;
    /// callers marshal the result where they need it.
    fn request_permission(&self, on_result: Box<dyn FnOnce(bool) + Send>);

    fn list_devices(&self) -> CaptureResult<Vec<CameraInfo>>;

    fn capabilities(&self, device: &CameraInfo) -> CaptureResult<DeviceCapabilities>;

    fn open(&self, device: &CameraInfo, config: &CaptureConfig) -> CaptureResult<Self::Stream>;
}
