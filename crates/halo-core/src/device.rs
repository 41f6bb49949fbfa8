//! Configuration negotiation: pick the best capture settings a device
//! supports, degrading one capability at a time. Nothing here is an error;
//! an unsupported capability is a skipped optimization.

use tracing::debug;

/// Frame rate cap. Devices reporting more are clamped to this.
pub const MAX_FRAME_RATE: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Preferred resolutions, best first.
pub const RES_1080P: Resolution = Resolution::new(1920, 1080);
pub const RES_720P: Resolution = Resolution::new(1280, 720);

/// Capability set reported by a probed camera device.
#[derive(Debug, Clone, Default)]
pub struct DeviceCapabilities {
    /// Resolutions the device can produce.
    pub resolutions: Vec<Resolution>,
    /// Highest frame rate the device supports at any resolution.
    pub max_frame_rate: u32,
    pub continuous_autofocus: bool,
    pub continuous_auto_exposure: bool,
    pub continuous_auto_white_balance: bool,
}

impl DeviceCapabilities {
    pub fn supports(&self, res: Resolution) -> bool {
        self.resolutions.contains(&res)
    }
}

/// Negotiated capture settings for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConfig {
    /// None means "device default" (no preferred resolution was available).
    pub resolution: Option<Resolution>,
    pub frame_rate: u32,
    pub autofocus: bool,
    pub auto_exposure: bool,
    pub auto_white_balance: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            resolution: None,
            frame_rate: 30,
            autofocus: false,
            auto_exposure: false,
            auto_white_balance: false,
        }
    }
}

/// Negotiate capture settings against `caps`.
///
/// Resolution ladder: 1080p, then 720p, then the device default. Frame rate
/// is min(60, device max). The three continuous-control modes are enabled
/// only where supported; each is independent of the others.
pub fn negotiate(caps: &DeviceCapabilities) -> CaptureConfig {
    let resolution = if caps.supports(RES_1080P) {
        debug!("negotiated 1080p capture");
        Some(RES_1080P)
    } else if caps.supports(RES_720P) {
        debug!("negotiated 720p capture");
        Some(RES_720P)
    } else {
        debug!("no preferred resolution available, using device default");
        None
    };

    let frame_rate = if caps.max_frame_rate == 0 {
        CaptureConfig::default().frame_rate
    } else {
        caps.max_frame_rate.min(MAX_FRAME_RATE)
    };

    CaptureConfig {
        resolution,
        frame_rate,
        autofocus: caps.continuous_autofocus,
        auto_exposure: caps.continuous_auto_exposure,
        auto_white_balance: caps.continuous_auto_white_balance,
    }
}

/// Pick the capture device: prefer a front-facing camera by name, else the
/// first enumerated device. Returns None when no device exists.
pub fn select_device(devices: &[crate::backend::CameraInfo]) -> Option<&crate::backend::CameraInfo> {
    devices
        .iter()
        .find(|d| {
            let name = d.name.to_lowercase();
            name.contains("front") || name.contains("facetime")
        })
        .or_else(|| devices.first())
}
