//! Camera session lifecycle: permission check, device selection and
//! configuration, then frame production on a background thread.
//!
//! All blocking hardware calls happen off the caller's thread; `start` and
//! `stop` return immediately. The capture thread publishes decoded frames
//! into a latest-frame slot that the renderer polls.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::backend::{
    Authorization, CameraBackend, CameraInfo, CameraStream, CaptureError, CaptureResult, Frame,
};
use crate::device::{negotiate, select_device, CaptureConfig};

/// Deadline for device selection and configuration. A camera that cannot be
/// opened within this window puts the session in `Failed` instead of
/// hanging forever.
pub const CONFIGURE_TIMEOUT: Duration = Duration::from_secs(10);

/// Consecutive frame failures tolerated before the session gives up.
const MAX_CONSECUTIVE_FAILURES: u32 = 30;

/// Lifecycle state of the capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Uninitialized,
    PermissionPending,
    /// Terminal until the user re-grants access in OS settings.
    PermissionDenied,
    Configuring,
    Running,
    Stopped,
    /// Terminal until the device situation changes externally.
    Failed,
}

/// Session event sent to the app layer for user-visible surfacing.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Camera access denied; the app shows the one permission dialog.
    PermissionDenied,
    /// Capture is live on the named device.
    Started { device: CameraInfo },
    /// Capture was stopped by request.
    Stopped,
    /// Configuration or capture failed; no frames will be delivered.
    Failed { error: CaptureError },
}

/// What the display layer needs from a session. Lets tests drive a
/// [`crate::display::DisplayController`] with a scripted fake.
pub trait Session {
    fn start(&self);
    fn stop(&self);
    fn set_mirror(&self, mirrored: bool);
    fn mirrored(&self) -> bool;
    fn current_frame(&self) -> Option<Arc<Frame>>;
    fn phase(&self) -> Phase;
}

struct Shared {
    phase: Mutex<Phase>,
    frame: Mutex<Option<Arc<Frame>>>,
    mirrored: AtomicBool,
    /// Capture loop run flag.
    run: AtomicBool,
    /// Bumped on every start attempt and stop, so stale capture threads and
    /// configuration watchdogs cannot touch a newer session generation.
    epoch: AtomicU64,
    /// Deadline for device selection and configuration.
    configure_timeout: Duration,
}

/// Owns the camera acquisition lifecycle. Cheap to clone; clones share the
/// same session.
pub struct SessionManager<B: CameraBackend> {
    backend: Arc<B>,
    shared: Arc<Shared>,
    events: UnboundedSender<SessionEvent>,
}

impl<B: CameraBackend> Clone for SessionManager<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            shared: Arc::clone(&self.shared),
            events: self.events.clone(),
        }
    }
}

impl<B: CameraBackend> SessionManager<B> {
    /// Create a session over `backend`. The receiver delivers
    /// [`SessionEvent`]s; the app layer marshals them to the UI thread.
    pub fn new(backend: B) -> (Self, UnboundedReceiver<SessionEvent>) {
        Self::with_configure_timeout(backend, CONFIGURE_TIMEOUT)
    }

    /// Like [`SessionManager::new`] with a custom configuration deadline.
    pub fn with_configure_timeout(
        backend: B,
        configure_timeout: Duration,
    ) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let manager = Self {
            backend: Arc::new(backend),
            shared: Arc::new(Shared {
                phase: Mutex::new(Phase::Uninitialized),
                frame: Mutex::new(None),
                mirrored: AtomicBool::new(false),
                run: AtomicBool::new(false),
                epoch: AtomicU64::new(0),
                configure_timeout,
            }),
            events,
        };
        (manager, rx)
    }

    fn phase_lock(&self) -> MutexGuard<'_, Phase> {
        self.shared.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn frame_lock(&self) -> MutexGuard<'_, Option<Arc<Frame>>> {
        self.shared.frame.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: SessionEvent) {
        // Receiver gone just means nobody is listening anymore.
        let _ = self.events.send(event);
    }

    fn bump_epoch(&self) -> u64 {
        self.shared.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Begin producing frames. Idempotent: a session that is already
    /// running, configuring, or waiting on permission is left alone.
    pub fn start(&self) {
        let mut phase = self.phase_lock();
        match *phase {
            Phase::Running => {
                debug!("start ignored, session already running");
                return;
            }
            Phase::Configuring | Phase::PermissionPending => {
                debug!("start ignored, session start already in progress");
                return;
            }
            _ => {}
        }

        match self.backend.authorization() {
            Authorization::Authorized => {
                *phase = Phase::Configuring;
                let epoch = self.bump_epoch();
                drop(phase);
                self.spawn_capture(epoch);
            }
            Authorization::NotDetermined => {
                *phase = Phase::PermissionPending;
                drop(phase);
                info!("requesting camera permission");
                let this = self.clone();
                self.backend
                    .request_permission(Box::new(move |granted| this.finish_permission(granted)));
            }
            Authorization::Denied => {
                *phase = Phase::PermissionDenied;
                drop(phase);
                warn!("camera permission denied");
                self.emit(SessionEvent::PermissionDenied);
            }
        }
    }

    /// Stop producing frames. Idempotent. During a permission wait this
    /// rolls the session back to `Uninitialized` so a later start can retry.
    pub fn stop(&self) {
        let mut phase = self.phase_lock();
        match *phase {
            Phase::Running | Phase::Configuring => {
                *phase = Phase::Stopped;
                self.bump_epoch();
                drop(phase);
                self.shared.run.store(false, Ordering::SeqCst);
                self.frame_lock().take();
                info!("camera session stopped");
                self.emit(SessionEvent::Stopped);
            }
            Phase::PermissionPending => {
                *phase = Phase::Uninitialized;
                self.bump_epoch();
                debug!("stop during permission wait, rolling back");
            }
            _ => {
                debug!("stop ignored in phase {:?}", *phase);
            }
        }
    }

    /// Latest decoded frame, or None before the first frame and after a
    /// stop or failure. Never blocks.
    pub fn current_frame(&self) -> Option<Arc<Frame>> {
        self.frame_lock().clone()
    }

    /// Display-layer mirror flag; the capture pipeline is not touched.
    pub fn set_mirror(&self, mirrored: bool) {
        self.shared.mirrored.store(mirrored, Ordering::SeqCst);
        debug!("mirror set to {mirrored}");
    }

    pub fn mirrored(&self) -> bool {
        self.shared.mirrored.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> Phase {
        *self.phase_lock()
    }

    fn finish_permission(&self, granted: bool) {
        let mut phase = self.phase_lock();
        if *phase != Phase::PermissionPending {
            debug!("permission result arrived after session moved on");
            return;
        }
        if granted {
            info!("camera permission granted");
            *phase = Phase::Configuring;
            let epoch = self.bump_epoch();
            drop(phase);
            self.spawn_capture(epoch);
        } else {
            *phase = Phase::PermissionDenied;
            drop(phase);
            warn!("camera permission denied by user");
            self.emit(SessionEvent::PermissionDenied);
        }
    }

    fn spawn_capture(&self, epoch: u64) {
        self.shared.run.store(true, Ordering::SeqCst);

        let this = self.clone();
        let spawned = thread::Builder::new()
            .name("camera-session".into())
            .spawn(move || this.capture_thread(epoch));
        if let Err(e) = spawned {
            self.fail(epoch, CaptureError::Open(format!("failed to spawn capture thread: {e}")));
            return;
        }

        // Watchdog: a device that never finishes opening must not wedge the
        // session in Configuring.
        let this = self.clone();
        let _ = thread::Builder::new()
            .name("configure-watchdog".into())
            .spawn(move || {
                thread::sleep(this.shared.configure_timeout);
                this.on_configure_timeout(epoch);
            });
    }

    fn on_configure_timeout(&self, epoch: u64) {
        let timeout = self.shared.configure_timeout;
        let mut phase = self.phase_lock();
        if self.shared.epoch.load(Ordering::SeqCst) != epoch || *phase != Phase::Configuring {
            return;
        }
        *phase = Phase::Failed;
        drop(phase);
        self.shared.run.store(false, Ordering::SeqCst);
        warn!("camera configuration timed out after {timeout:?}");
        self.emit(SessionEvent::Failed {
            error: CaptureError::Timeout(timeout),
        });
    }

    fn capture_thread(&self, epoch: u64) {
        match self.configure() {
            Ok((device, stream)) => self.capture_loop(epoch, device, stream),
            Err(e) => self.fail(epoch, e),
        }
    }

    /// Select and open a device. Capability probing is best-effort: a probe
    /// failure falls back to default settings rather than aborting.
    fn configure(&self) -> CaptureResult<(CameraInfo, B::Stream)> {
        let devices = self.backend.list_devices()?;
        let device = select_device(&devices).cloned().ok_or(CaptureError::NoDevice)?;
        info!("selected camera: {}", device.name);

        let config = match self.backend.capabilities(&device) {
            Ok(caps) => negotiate(&caps),
            Err(e) => {
                warn!("capability probe failed, using default settings: {e}");
                CaptureConfig::default()
            }
        };
        debug!(?config, "opening camera");

        let stream = self.backend.open(&device, &config)?;
        Ok((device, stream))
    }

    fn capture_loop(&self, epoch: u64, device: CameraInfo, mut stream: B::Stream) {
        {
            let mut phase = self.phase_lock();
            if self.shared.epoch.load(Ordering::SeqCst) != epoch || *phase != Phase::Configuring {
                debug!("session moved on during configuration, discarding stream");
                return;
            }
            *phase = Phase::Running;
        }
        info!("camera session running on {}", device.name);
        self.emit(SessionEvent::Started { device });

        let mut failures = 0u32;
        while self.shared.run.load(Ordering::Relaxed)
            && self.shared.epoch.load(Ordering::SeqCst) == epoch
        {
            match stream.next_frame() {
                Ok(frame) => {
                    failures = 0;
                    // A stop or restart may have landed while this frame was
                    // in flight; a stale generation must not publish into
                    // the slot the newer one owns.
                    let mut slot = self.frame_lock();
                    if self.shared.epoch.load(Ordering::SeqCst) != epoch {
                        debug!("discarding frame from a stale capture generation");
                        return;
                    }
                    *slot = Some(Arc::new(frame));
                }
                Err(e) => {
                    failures += 1;
                    warn!("failed to capture frame: {e}");
                    if failures >= MAX_CONSECUTIVE_FAILURES {
                        self.fail(epoch, e);
                        return;
                    }
                }
            }
        }
        debug!("capture loop ended");
    }

    fn fail(&self, epoch: u64, err: CaptureError) {
        let mut phase = self.phase_lock();
        if self.shared.epoch.load(Ordering::SeqCst) != epoch {
            return;
        }
        *phase = Phase::Failed;
        drop(phase);
        self.shared.run.store(false, Ordering::SeqCst);
        self.frame_lock().take();
        error!("camera session failed: {err}");
        self.emit(SessionEvent::Failed { error: err });
    }
}

impl<B: CameraBackend> Session for SessionManager<B> {
    fn start(&self) {
        SessionManager::start(self)
    }

    fn stop(&self) {
        SessionManager::stop(self)
    }

    fn set_mirror(&self, mirrored: bool) {
        SessionManager::set_mirror(self, mirrored)
    }

    fn mirrored(&self) -> bool {
        SessionManager::mirrored(self)
    }

    fn current_frame(&self) -> Option<Arc<Frame>> {
        SessionManager::current_frame(self)
    }

    fn phase(&self) -> Phase {
        SessionManager::phase(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceCapabilities, Resolution, RES_1080P};
    use std::sync::atomic::AtomicUsize;
    use std::time::Instant;

    type PermissionCallback = Box<dyn FnOnce(bool) + Send>;

    /// Scripted camera backend: a fixed device list, canned capabilities,
    /// and an infinite synthetic frame stream. Clones share state so tests
    /// can inspect call counts after handing the backend to a session.
    #[derive(Clone)]
    struct FakeBackend {
        state: Arc<FakeState>,
    }

    struct FakeState {
        authorization: Mutex<Authorization>,
        devices: Vec<CameraInfo>,
        grant_permission: bool,
        /// When true, permission callbacks are parked instead of invoked.
        hold_permission: bool,
        held_callback: Mutex<Option<PermissionCallback>>,
        /// How long `open` blocks before returning a stream.
        open_delay: Duration,
        /// When set, the stream waits on this gate before each frame.
        frame_gate: Mutex<Option<std::sync::mpsc::Receiver<()>>>,
        list_calls: AtomicUsize,
        open_calls: AtomicUsize,
    }

    impl FakeBackend {
        fn with_devices(authorization: Authorization, devices: Vec<CameraInfo>) -> Self {
            Self {
                state: Arc::new(FakeState {
                    authorization: Mutex::new(authorization),
                    devices,
                    grant_permission: true,
                    hold_permission: false,
                    held_callback: Mutex::new(None),
                    open_delay: Duration::ZERO,
                    frame_gate: Mutex::new(None),
                    list_calls: AtomicUsize::new(0),
                    open_calls: AtomicUsize::new(0),
                }),
            }
        }

        fn one_camera(authorization: Authorization) -> Self {
            Self::with_devices(
                authorization,
                vec![CameraInfo {
                    id: "0".into(),
                    name: "Fake Camera".into(),
                    is_default: true,
                }],
            )
        }

        fn one_camera_with(authorization: Authorization, configure: impl FnOnce(&mut FakeState)) -> Self {
            let mut fake = Self::one_camera(authorization);
            configure(Arc::get_mut(&mut fake.state).expect("fresh fake is unshared"));
            fake
        }

        fn list_calls(&self) -> usize {
            self.state.list_calls.load(Ordering::SeqCst)
        }

        fn open_calls(&self) -> usize {
            self.state.open_calls.load(Ordering::SeqCst)
        }
    }

    struct FakeStream {
        counter: u8,
        gate: Option<std::sync::mpsc::Receiver<()>>,
    }

    impl CameraStream for FakeStream {
        fn next_frame(&mut self) -> CaptureResult<Frame> {
            match &self.gate {
                Some(gate) => gate
                    .recv()
                    .map_err(|_| CaptureError::Capture("frame gate closed".into()))?,
                None => thread::sleep(Duration::from_millis(1)),
            }
            self.counter = self.counter.wrapping_add(1);
            Ok(Frame::new(2, 2, vec![self.counter; 16]))
        }
    }

    impl CameraBackend for FakeBackend {
        type Stream = FakeStream;

        fn authorization(&self) -> Authorization {
            *self.state.authorization.lock().unwrap()
        }

        fn request_permission(&self, on_result: Box<dyn FnOnce(bool) + Send>) {
            if self.state.hold_permission {
                *self.state.held_callback.lock().unwrap() = Some(on_result);
                return;
            }
            let granted = self.state.grant_permission;
            *self.state.authorization.lock().unwrap() = if granted {
                Authorization::Authorized
            } else {
                Authorization::Denied
            };
            on_result(granted);
        }

        fn list_devices(&self) -> CaptureResult<Vec<CameraInfo>> {
            self.state.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.state.devices.clone())
        }

        fn capabilities(&self, _device: &CameraInfo) -> CaptureResult<DeviceCapabilities> {
            Ok(DeviceCapabilities {
                resolutions: vec![Resolution::new(640, 480), RES_1080P],
                max_frame_rate: 30,
                continuous_autofocus: true,
                continuous_auto_exposure: false,
                continuous_auto_white_balance: false,
            })
        }

        fn open(&self, _device: &CameraInfo, config: &CaptureConfig) -> CaptureResult<FakeStream> {
            self.state.open_calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(config.resolution, Some(RES_1080P));
            if !self.state.open_delay.is_zero() {
                thread::sleep(self.state.open_delay);
            }
            let gate = self.state.frame_gate.lock().unwrap().take();
            Ok(FakeStream { counter: 0, gate })
        }
    }

    fn wait_until(what: &str, mut cond: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if cond() {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("timed out waiting for {what}");
    }

    fn expect_event(events: &mut UnboundedReceiver<SessionEvent>) -> SessionEvent {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Ok(event) = events.try_recv() {
                return event;
            }
            if Instant::now() > deadline {
                panic!("timed out waiting for session event");
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_start_reaches_running_and_delivers_frames() {
        let backend = FakeBackend::one_camera(Authorization::Authorized);
        let (session, _events) = SessionManager::new(backend.clone());

        assert_eq!(session.phase(), Phase::Uninitialized);
        assert!(session.current_frame().is_none());

        session.start();
        wait_until("phase Running", || session.phase() == Phase::Running);
        wait_until("first frame", || session.current_frame().is_some());

        let frame = session.current_frame().unwrap();
        assert_eq!((frame.width, frame.height), (2, 2));
    }

    #[test]
    fn test_start_is_idempotent() {
        let backend = FakeBackend::one_camera(Authorization::Authorized);
        let (session, _events) = SessionManager::new(backend.clone());

        session.start();
        wait_until("phase Running", || session.phase() == Phase::Running);
        session.start();
        session.start();

        // Give a hypothetical duplicate open a chance to happen.
        thread::sleep(Duration::from_millis(50));
        assert_eq!(backend.open_calls(), 1);
        assert_eq!(session.phase(), Phase::Running);
    }

    #[test]
    fn test_denied_permission_never_configures() {
        let backend = FakeBackend::one_camera(Authorization::Denied);
        let (session, mut events) = SessionManager::new(backend.clone());

        session.start();
        assert_eq!(session.phase(), Phase::PermissionDenied);
        assert_eq!(backend.list_calls(), 0);
        assert_eq!(backend.open_calls(), 0);
        assert!(session.current_frame().is_none());

        match expect_event(&mut events) {
            SessionEvent::PermissionDenied => {}
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_permission_request_granted_then_running() {
        let backend = FakeBackend::one_camera(Authorization::NotDetermined);
        let (session, mut events) = SessionManager::new(backend.clone());

        session.start();
        wait_until("phase Running", || session.phase() == Phase::Running);

        match expect_event(&mut events) {
            SessionEvent::Started { device } => assert_eq!(device.name, "Fake Camera"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_permission_request_denied() {
        let backend = FakeBackend::one_camera_with(Authorization::NotDetermined, |state| {
            state.grant_permission = false;
        });
        let (session, mut events) = SessionManager::new(backend.clone());

        session.start();
        wait_until("phase PermissionDenied", || {
            session.phase() == Phase::PermissionDenied
        });
        assert_eq!(backend.list_calls(), 0);
        match expect_event(&mut events) {
            SessionEvent::PermissionDenied => {}
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_no_device_fails_and_frames_stay_none() {
        let backend = FakeBackend::with_devices(Authorization::Authorized, vec![]);
        let (session, mut events) = SessionManager::new(backend);

        session.start();
        wait_until("phase Failed", || session.phase() == Phase::Failed);
        assert!(session.current_frame().is_none());

        match expect_event(&mut events) {
            SessionEvent::Failed {
                error: CaptureError::NoDevice,
            } => {}
            other => panic!("unexpected event: {other:?}"),
        }

        // Terminal: no frames ever arrive afterwards.
        thread::sleep(Duration::from_millis(50));
        assert!(session.current_frame().is_none());
        assert_eq!(session.phase(), Phase::Failed);
    }

    #[test]
    fn test_stop_then_restart() {
        let backend = FakeBackend::one_camera(Authorization::Authorized);
        let (session, _events) = SessionManager::new(backend.clone());

        session.start();
        wait_until("phase Running", || session.phase() == Phase::Running);

        session.stop();
        assert_eq!(session.phase(), Phase::Stopped);
        assert!(session.current_frame().is_none(), "stop clears the frame slot");
        session.stop();
        assert_eq!(session.phase(), Phase::Stopped);

        session.start();
        wait_until("phase Running again", || session.phase() == Phase::Running);
        assert_eq!(backend.open_calls(), 2);
    }

    #[test]
    fn test_frame_in_flight_during_stop_is_discarded() {
        let (gate, frames) = std::sync::mpsc::channel();
        let backend = FakeBackend::one_camera_with(Authorization::Authorized, |state| {
            state.frame_gate = Mutex::new(Some(frames));
        });
        let (session, _events) = SessionManager::new(backend);

        session.start();
        wait_until("phase Running", || session.phase() == Phase::Running);
        gate.send(()).unwrap();
        wait_until("first frame", || session.current_frame().is_some());

        // The capture thread is now blocked inside the stream; stop while
        // its next frame is still in flight.
        thread::sleep(Duration::from_millis(20));
        session.stop();
        assert_eq!(session.phase(), Phase::Stopped);
        assert!(session.current_frame().is_none());

        // Releasing the in-flight frame must not land it in the slot.
        let _ = gate.send(());
        thread::sleep(Duration::from_millis(50));
        assert!(session.current_frame().is_none());
        assert_eq!(session.phase(), Phase::Stopped);
    }

    #[test]
    fn test_configure_timeout_fails_the_session() {
        let backend = FakeBackend::one_camera_with(Authorization::Authorized, |state| {
            state.open_delay = Duration::from_millis(500);
        });
        let (session, mut events) =
            SessionManager::with_configure_timeout(backend, Duration::from_millis(50));

        session.start();
        wait_until("phase Failed", || session.phase() == Phase::Failed);

        match expect_event(&mut events) {
            SessionEvent::Failed {
                error: CaptureError::Timeout(timeout),
            } => assert_eq!(timeout, Duration::from_millis(50)),
            other => panic!("unexpected event: {other:?}"),
        }

        // The slow open finishing later must not resurrect the session.
        thread::sleep(Duration::from_millis(600));
        assert_eq!(session.phase(), Phase::Failed);
        assert!(session.current_frame().is_none());
    }

    #[test]
    fn test_start_retries_after_external_permission_grant() {
        let backend = FakeBackend::one_camera(Authorization::Denied);
        let (session, mut events) = SessionManager::new(backend.clone());

        session.start();
        assert_eq!(session.phase(), Phase::PermissionDenied);
        match expect_event(&mut events) {
            SessionEvent::PermissionDenied => {}
            other => panic!("unexpected event: {other:?}"),
        }

        // Access re-granted in OS settings; the next explicit start retries.
        *backend.state.authorization.lock().unwrap() = Authorization::Authorized;
        session.start();
        wait_until("phase Running", || session.phase() == Phase::Running);
    }

    #[test]
    fn test_stop_during_permission_wait_rolls_back() {
        let backend = FakeBackend::one_camera_with(Authorization::NotDetermined, |state| {
            state.hold_permission = true;
        });
        let (session, _events) = SessionManager::new(backend.clone());

        session.start();
        assert_eq!(session.phase(), Phase::PermissionPending);

        session.stop();
        assert_eq!(session.phase(), Phase::Uninitialized);

        // A late grant must not resurrect the cancelled start.
        let callback = backend.state.held_callback.lock().unwrap().take().unwrap();
        callback(true);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(session.phase(), Phase::Uninitialized);
        assert_eq!(backend.open_calls(), 0);
    }

    #[test]
    fn test_mirror_flag_is_display_only() {
        let backend = FakeBackend::one_camera(Authorization::Authorized);
        let (session, _events) = SessionManager::new(backend);

        assert!(!session.mirrored());
        session.set_mirror(true);
        assert!(session.mirrored());
        assert_eq!(session.phase(), Phase::Uninitialized);
        session.set_mirror(false);
        assert!(!session.mirrored());
    }
}
