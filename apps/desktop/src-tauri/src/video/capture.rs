//! Video capture from camera using nokhwa.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use nokhwa::pixel_format::RgbAFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, ControlValueSetter, FrameFormat, KnownCameraControl,
    RequestedFormat, RequestedFormatType, Resolution as SensorResolution,
};
use nokhwa::Camera;
use tracing::{debug, info, warn};

use halo_core::{
    Authorization, CameraBackend, CameraInfo, CameraStream, CaptureConfig, CaptureError,
    CaptureResult, DeviceCapabilities, Frame, Resolution,
};

/// Camera access via nokhwa's native backends (AVFoundation, V4L2, MSMF).
#[derive(Default)]
pub struct NokhwaBackend {
    /// Set once the user has answered the OS permission prompt with a no.
    denied: Arc<AtomicBool>,
}

impl NokhwaBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(target_os = "macos")]
fn os_authorized() -> bool {
    nokhwa::nokhwa_check()
}

#[cfg(not(target_os = "macos"))]
fn os_authorized() -> bool {
    // Camera access is not brokered by the OS on these platforms.
    true
}

#[cfg(target_os = "macos")]
fn os_request_permission(on_result: Box<dyn FnOnce(bool) + Send>) {
    use std::sync::{Mutex, PoisonError};

    // nokhwa_initialize wants a Fn; it only ever fires once.
    let slot = Mutex::new(Some(on_result));
    nokhwa::nokhwa_initialize(move |granted| {
        if let Some(callback) = slot.lock().unwrap_or_else(PoisonError::into_inner).take() {
            callback(granted);
        }
    });
}

#[cfg(not(target_os = "macos"))]
fn os_request_permission(on_result: Box<dyn FnOnce(bool) + Send>) {
    on_result(true);
}

fn native_backend() -> ApiBackend {
    #[cfg(target_os = "linux")]
    {
        ApiBackend::Video4Linux
    }
    #[cfg(not(target_os = "linux"))]
    {
        ApiBackend::Auto
    }
}

fn parse_index(device: &CameraInfo) -> CaptureResult<CameraIndex> {
    device
        .id
        .parse::<u32>()
        .map(CameraIndex::Index)
        .map_err(|_| CaptureError::Open(format!("invalid device id: {}", device.id)))
}

/// Enable the negotiated continuous control modes. Each is independent; an
/// unsupported control is a skipped optimization, not an error.
fn apply_controls(camera: &mut Camera, config: &CaptureConfig) {
    let wanted = [
        (KnownCameraControl::Focus, config.autofocus, "autofocus"),
        (KnownCameraControl::Exposure, config.auto_exposure, "auto exposure"),
        (
            KnownCameraControl::WhiteBalance,
            config.auto_white_balance,
            "auto white balance",
        ),
    ];
    for (control, enabled, label) in wanted {
        if !enabled {
            continue;
        }
        match camera.set_camera_control(control, ControlValueSetter::Boolean(true)) {
            Ok(()) => debug!("enabled continuous {label}"),
            Err(e) => debug!("continuous {label} not applied: {e}"),
        }
    }
}

impl CameraBackend for NokhwaBackend {
    type Stream = NokhwaStream;

    fn authorization(&self) -> Authorization {
        // A fresh OS grant wins over a remembered refusal, so re-enabling
        // access in the privacy settings takes effect on the next start.
        if os_authorized() {
            return Authorization::Authorized;
        }
        if self.denied.load(Ordering::SeqCst) {
            Authorization::Denied
        } else {
            Authorization::NotDetermined
        }
    }

    fn request_permission(&self, on_result: Box<dyn FnOnce(bool) + Send>) {
        let denied = Arc::clone(&self.denied);
        os_request_permission(Box::new(move |granted| {
            if !granted {
                denied.store(true, Ordering::SeqCst);
            }
            on_result(granted);
        }));
    }

    fn list_devices(&self) -> CaptureResult<Vec<CameraInfo>> {
        let backend = native_backend();
        debug!("querying cameras with backend {backend:?}");

        let devices = match nokhwa::query(backend) {
            Ok(devices) => devices,
            #[cfg(target_os = "linux")]
            Err(e) => {
                warn!("V4L2 query failed ({e}), retrying with auto backend");
                nokhwa::query(ApiBackend::Auto)
                    .map_err(|e| CaptureError::Open(format!("failed to query cameras: {e}")))?
            }
            #[cfg(not(target_os = "linux"))]
            Err(e) => {
                warn!("camera query failed: {e}");
                return Err(CaptureError::Open(format!("failed to query cameras: {e}")));
            }
        };

        info!("found {} camera device(s)", devices.len());
        Ok(devices
            .iter()
            .enumerate()
            .map(|(idx, info)| CameraInfo {
                id: idx.to_string(),
                name: info.human_name().to_string(),
                is_default: idx == 0,
            })
            .collect())
    }

    fn capabilities(&self, device: &CameraInfo) -> CaptureResult<DeviceCapabilities> {
        let index = parse_index(device)?;
        let requested = RequestedFormat::new::<RgbAFormat>(RequestedFormatType::None);
        let camera = Camera::new(index, requested)
            .map_err(|e| CaptureError::Open(format!("failed to probe camera: {e}")))?;

        let formats = camera
            .compatible_camera_formats()
            .map_err(|e| CaptureError::Open(format!("failed to list camera formats: {e}")))?;

        let mut resolutions: Vec<Resolution> = formats
            .iter()
            .map(|f| Resolution::new(f.resolution().width(), f.resolution().height()))
            .collect();
        resolutions.sort_by_key(|r| (r.width, r.height));
        resolutions.dedup();
        let max_frame_rate = formats.iter().map(|f| f.frame_rate()).max().unwrap_or(0);

        // Control discovery is best-effort; an empty list just means no
        // continuous modes get enabled.
        let controls = camera.camera_controls().unwrap_or_default();
        let has = |wanted: KnownCameraControl| controls.iter().any(|c| c.control() == wanted);

        Ok(DeviceCapabilities {
            resolutions,
            max_frame_rate,
            continuous_autofocus: has(KnownCameraControl::Focus),
            continuous_auto_exposure: has(KnownCameraControl::Exposure),
            continuous_auto_white_balance: has(KnownCameraControl::WhiteBalance),
        })
    }

    fn open(&self, device: &CameraInfo, config: &CaptureConfig) -> CaptureResult<NokhwaStream> {
        let index = parse_index(device)?;
        let format_type = match config.resolution {
            // Most cameras speak MJPEG; Closest degrades gracefully when the
            // exact format is unavailable.
            Some(res) => RequestedFormatType::Closest(CameraFormat::new(
                SensorResolution::new(res.width, res.height),
                FrameFormat::MJPEG,
                config.frame_rate,
            )),
            None => RequestedFormatType::AbsoluteHighestResolution,
        };
        let requested = RequestedFormat::new::<RgbAFormat>(format_type);

        let mut camera = Camera::new(index, requested)
            .map_err(|e| CaptureError::Open(format!("failed to open camera: {e}")))?;

        apply_controls(&mut camera, config);

        camera
            .open_stream()
            .map_err(|e| CaptureError::Open(format!("failed to open camera stream: {e}")))?;

        let resolution = camera.resolution();
        let frame_rate = camera.frame_rate().max(1);
        info!(
            "camera stream open: {}x{} @ {} fps",
            resolution.width(),
            resolution.height(),
            frame_rate
        );

        Ok(NokhwaStream {
            camera,
            interval: Duration::from_millis(1000 / u64::from(frame_rate)),
            last_frame: None,
        })
    }
}

/// An open nokhwa stream paced to the negotiated frame rate.
pub struct NokhwaStream {
    camera: Camera,
    interval: Duration,
    last_frame: Option<Instant>,
}

impl CameraStream for NokhwaStream {
    fn next_frame(&mut self) -> CaptureResult<Frame> {
        // Rate limiting
        if let Some(last) = self.last_frame {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last_frame = Some(Instant::now());

        let buffer = self
            .camera
            .frame()
            .map_err(|e| CaptureError::Capture(e.to_string()))?;
        let image = buffer
            .decode_image::<RgbAFormat>()
            .map_err(|e| CaptureError::Capture(format!("failed to decode frame: {e}")))?;

        let (width, height) = (image.width(), image.height());
        Ok(Frame::new(width, height, image.into_raw()))
    }
}

impl Drop for NokhwaStream {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            debug!("failed to stop camera stream: {e}");
        }
    }
}
