//! The real preview window behind the core's [`WindowSink`] seam.

use tauri::{LogicalPosition, LogicalSize, WebviewWindow};
use tracing::warn;

use halo_core::{Rect, WindowSink};

pub struct PreviewWindow {
    window: WebviewWindow,
}

impl PreviewWindow {
    pub fn new(window: WebviewWindow) -> Self {
        Self { window }
    }
}

impl WindowSink for PreviewWindow {
    fn apply_frame(&self, frame: Rect) {
        if let Err(e) = self
            .window
            .set_size(LogicalSize::new(frame.width, frame.height))
        {
            warn!("failed to resize preview window: {e}");
        }
        if let Err(e) = self.window.set_position(LogicalPosition::new(frame.x, frame.y)) {
            warn!("failed to move preview window: {e}");
        }
    }

    fn set_visible(&self, visible: bool) {
        let result = if visible {
            self.window.show().and_then(|_| self.window.set_focus())
        } else {
            self.window.hide()
        };
        if let Err(e) = result {
            warn!("failed to change preview visibility: {e}");
        }
    }
}
