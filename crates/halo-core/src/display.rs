//! Display controller: translates user intent (tray clicks, drag) into
//! window geometry and session commands. Owns the window state; the actual
//! window is behind [`WindowSink`] so tests can run headless.

use std::sync::Arc;

use tracing::debug;

use crate::backend::Frame;
use crate::geometry::{
    inner_circle, mirror_transform, resize_preserving_center, Point, Rect, SizePreset, Transform,
};
use crate::session::Session;

/// Current window geometry and visibility. Mutated only by explicit
/// commands, plus position updates from user drag.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct WindowState {
    pub visible: bool,
    pub preset: SizePreset,
    pub frame: Rect,
}

/// The platform window operations the controller needs.
pub trait WindowSink {
    /// Apply a new outer frame in one step; the window server animates the
    /// transition on platforms that do so natively.
    fn apply_frame(&self, frame: Rect);

    fn set_visible(&self, visible: bool);
}

/// Owns one window and one session, constructor-injected.
pub struct DisplayController<S: Session, W: WindowSink> {
    session: S,
    window: W,
    state: WindowState,
}

impl<S: Session, W: WindowSink> DisplayController<S, W> {
    /// `initial_origin` is where the window first appears; the preset
    /// defaults to Medium (300).
    pub fn new(session: S, window: W, initial_origin: Point) -> Self {
        let preset = SizePreset::default();
        let frame = Rect::new(initial_origin.x, initial_origin.y, preset.side(), preset.side());
        Self {
            session,
            window,
            state: WindowState {
                visible: false,
                preset,
                frame,
            },
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn window_state(&self) -> &WindowState {
        &self.state
    }

    /// Make the window visible and start capture. No-op when already shown.
    pub fn show(&mut self) {
        if self.state.visible {
            debug!("show ignored, window already visible");
            return;
        }
        self.state.visible = true;
        self.window.set_visible(true);
        self.session.start();
    }

    /// Order the window off-screen. Capture keeps running so a later show
    /// resumes without device-open latency.
    pub fn hide(&mut self) {
        if !self.state.visible {
            debug!("hide ignored, window already hidden");
            return;
        }
        self.state.visible = false;
        self.window.set_visible(false);
    }

    pub fn toggle(&mut self) {
        if self.state.visible {
            self.hide();
        } else {
            self.show();
        }
    }

    /// Tear the capture pipeline down and hide the window.
    pub fn stop(&mut self) {
        self.session.stop();
        self.hide();
    }

    /// Switch to `preset`, keeping the window center fixed.
    pub fn resize(&mut self, preset: SizePreset) {
        self.state.frame = resize_preserving_center(self.state.frame, preset);
        self.state.preset = preset;
        self.window.apply_frame(self.state.frame);
        debug!("resized to {} ({})", preset.side(), preset.label());
    }

    /// Position update from user drag.
    pub fn set_position(&mut self, origin: Point) {
        self.state.frame.x = origin.x;
        self.state.frame.y = origin.y;
    }

    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.session.set_mirror(mirrored);
    }

    pub fn mirrored(&self) -> bool {
        self.session.mirrored()
    }

    /// The clipped circle in window-local coordinates.
    pub fn circle(&self) -> Rect {
        inner_circle(Rect::new(0.0, 0.0, self.state.frame.width, self.state.frame.height))
    }

    /// Transform to apply to the rendered output, read once per frame.
    pub fn render_transform(&self) -> Transform {
        mirror_transform(self.session.mirrored())
    }

    /// Frame to render right now, if any. Hidden windows render nothing.
    pub fn frame_to_render(&self) -> Option<Arc<Frame>> {
        if !self.state.visible {
            return None;
        }
        self.session.current_frame()
    }
}
