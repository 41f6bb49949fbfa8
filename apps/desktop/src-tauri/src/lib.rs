mod commands;
mod events;
mod tray;
mod video;
mod window;

use std::sync::{Mutex, MutexGuard, PoisonError};

use tauri::Manager;

use halo_core::{DisplayController, Point, SessionManager};
use video::NokhwaBackend;
use window::PreviewWindow;

/// The display controller wired to the real camera backend and window.
pub type Display = DisplayController<SessionManager<NokhwaBackend>, PreviewWindow>;

/// Global application state shared across Tauri commands
pub struct AppState {
    pub display: Mutex<Display>,
}

impl AppState {
    pub fn display(&self) -> MutexGuard<'_, Display> {
        self.display.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halo=debug,halo_core=debug".into()),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            // Menu-bar utility: no Dock icon, the tray is the whole surface.
            #[cfg(target_os = "macos")]
            app.set_activation_policy(tauri::ActivationPolicy::Accessory);

            let webview = app
                .get_webview_window("preview")
                .ok_or_else(|| anyhow::anyhow!("preview window missing from tauri.conf.json"))?;

            let origin = webview
                .outer_position()
                .ok()
                .map(|position| {
                    let scale = webview.scale_factor().unwrap_or(1.0);
                    let logical = position.to_logical::<f64>(scale);
                    Point { x: logical.x, y: logical.y }
                })
                .unwrap_or_default();

            let (session, session_events) = SessionManager::new(NokhwaBackend::new());
            let mut display =
                DisplayController::new(session, PreviewWindow::new(webview.clone()), origin);
            // The preview is up and capturing as soon as the app launches.
            display.show();
            app.manage(AppState {
                display: Mutex::new(display),
            });

            events::spawn_forwarder(app.handle().clone(), session_events);
            tray::init(app)?;
            track_window_moves(&webview);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::preview::show_preview,
            commands::preview::hide_preview,
            commands::preview::toggle_preview,
            commands::preview::stop_preview,
            commands::preview::set_size_preset,
            commands::preview::set_mirrored,
            commands::preview::current_frame,
            commands::preview::preview_layout,
            commands::preview::session_phase,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Keep the controller's notion of the window origin in sync with user drag.
fn track_window_moves(webview: &tauri::WebviewWindow) {
    let handle = webview.clone();
    webview.on_window_event(move |event| {
        if let tauri::WindowEvent::Moved(position) = event {
            let scale = handle.scale_factor().unwrap_or(1.0);
            let logical = position.to_logical::<f64>(scale);
            if let Some(state) = handle.try_state::<AppState>() {
                state.display().set_position(Point {
                    x: logical.x,
                    y: logical.y,
                });
            }
        }
    });
}
