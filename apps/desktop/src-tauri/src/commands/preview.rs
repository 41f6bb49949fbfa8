//! Tauri commands for the circular preview window.

use tauri::State;

use halo_core::{Phase, Rect, SizePreset, Transform};

use crate::AppState;

/// Decoded frame handed to the frontend renderer.
#[derive(serde::Serialize)]
pub struct FramePayload {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8.
    pub data: Vec<u8>,
}

/// Geometry the renderer needs each frame: the clipped circle in
/// window-local coordinates and the mirror transform.
#[derive(serde::Serialize)]
pub struct PreviewLayout {
    pub circle: Rect,
    pub transform: Transform,
    pub mirrored: bool,
}

#[tauri::command]
pub fn show_preview(state: State<'_, AppState>) {
    state.display().show();
}

#[tauri::command]
pub fn hide_preview(state: State<'_, AppState>) {
    state.display().hide();
}

#[tauri::command]
pub fn toggle_preview(state: State<'_, AppState>) {
    state.display().toggle();
}

/// Tear the capture pipeline down, unlike `hide_preview` which keeps it warm.
#[tauri::command]
pub fn stop_preview(state: State<'_, AppState>) {
    state.display().stop();
}

#[tauri::command]
pub fn set_size_preset(state: State<'_, AppState>, preset: SizePreset) {
    state.display().resize(preset);
}

#[tauri::command]
pub fn set_mirrored(state: State<'_, AppState>, mirrored: bool) {
    state.display().set_mirrored(mirrored);
}

/// Latest frame for rendering, or None while hidden, stopped, or failed.
#[tauri::command]
pub fn current_frame(state: State<'_, AppState>) -> Option<FramePayload> {
    state.display().frame_to_render().map(|frame| FramePayload {
        width: frame.width,
        height: frame.height,
        data: frame.data.clone(),
    })
}

#[tauri::command]
pub fn preview_layout(state: State<'_, AppState>) -> PreviewLayout {
    let display = state.display();
    PreviewLayout {
        circle: display.circle(),
        transform: display.render_transform(),
        mirrored: display.mirrored(),
    }
}

#[tauri::command]
pub fn session_phase(state: State<'_, AppState>) -> Phase {
    state.display().session().phase()
}
