//! Session event plumbing: marshal events to the main thread, forward them
//! to the frontend, and surface the permission and no-camera dialogs.

use tauri::{AppHandle, Emitter};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

use halo_core::{CameraInfo, SessionEvent};

#[cfg(target_os = "macos")]
const CAMERA_PRIVACY_URL: &str =
    "x-apple.systempreferences:com.apple.preference.security?Privacy_Camera";

/// Session event forwarded to the frontend
#[derive(Clone, serde::Serialize)]
#[serde(tag = "type", content = "data")]
pub enum PreviewEvent {
    /// Camera access denied; externally resolved in OS settings
    PermissionDenied,
    /// Capture is live on the named device
    Started { device: CameraInfo },
    /// Capture stopped by request
    Stopped,
    /// Configuration or capture failed, no frames coming
    Failed { message: String },
}

impl From<&SessionEvent> for PreviewEvent {
    fn from(event: &SessionEvent) -> Self {
        match event {
            SessionEvent::PermissionDenied => PreviewEvent::PermissionDenied,
            SessionEvent::Started { device } => PreviewEvent::Started {
                device: device.clone(),
            },
            SessionEvent::Stopped => PreviewEvent::Stopped,
            SessionEvent::Failed { error } => PreviewEvent::Failed {
                message: error.to_string(),
            },
        }
    }
}

/// Drain session events off the UI thread. Each event is handed to the
/// main thread before touching any UI, so session completions never race
/// window or dialog state.
pub fn spawn_forwarder(app: AppHandle, mut events: UnboundedReceiver<SessionEvent>) {
    tauri::async_runtime::spawn(async move {
        while let Some(event) = events.recv().await {
            let handle = app.clone();
            if app
                .run_on_main_thread(move || handle_event(&handle, event))
                .is_err()
            {
                // App is shutting down.
                break;
            }
        }
    });
}

fn handle_event(app: &AppHandle, event: SessionEvent) {
    if let Err(e) = app.emit("session://event", PreviewEvent::from(&event)) {
        warn!("failed to emit session event: {e}");
    }

    match event {
        SessionEvent::PermissionDenied => show_permission_dialog(app),
        SessionEvent::Failed { error } => {
            // The original design failed silently here; surface it instead.
            app.dialog()
                .message(format!("The camera preview is unavailable: {error}"))
                .title("Camera Unavailable")
                .kind(MessageDialogKind::Error)
                .show(|_| {});
        }
        SessionEvent::Started { .. } | SessionEvent::Stopped => {}
    }
}

/// The one permission prompt: explains the denial and offers a deep link to
/// the OS privacy settings. No retry loop; re-granting is external.
fn show_permission_dialog(app: &AppHandle) {
    let handle = app.clone();
    app.dialog()
        .message(
            "Halo needs access to your camera. Allow it in your system privacy \
             settings, then choose Show Camera again.",
        )
        .title("Camera Permission Needed")
        .kind(MessageDialogKind::Warning)
        .buttons(MessageDialogButtons::OkCancelCustom(
            "Open Privacy Settings".into(),
            "Cancel".into(),
        ))
        .show(move |open_settings| {
            if open_settings {
                open_privacy_settings(&handle);
            }
        });
}

#[cfg(target_os = "macos")]
fn open_privacy_settings(app: &AppHandle) {
    use tauri_plugin_shell::ShellExt;

    if let Err(e) = app.shell().open(CAMERA_PRIVACY_URL, None) {
        warn!("failed to open privacy settings: {e}");
    }
}

#[cfg(not(target_os = "macos"))]
fn open_privacy_settings(_app: &AppHandle) {
    warn!("no camera privacy settings deep link on this platform");
}
