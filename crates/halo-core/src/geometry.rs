//! Window geometry: size presets, center-preserving resize, the inner
//! clipped circle, and the render transform for mirroring.

/// Margin between the window edge and the clipped circle, in logical units.
pub const CIRCLE_MARGIN: f64 = 50.0;

/// The four fixed window sizes offered in the tray menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizePreset {
    Small,
    Medium,
    Large,
    XLarge,
}

impl SizePreset {
    pub const ALL: [SizePreset; 4] = [
        SizePreset::Small,
        SizePreset::Medium,
        SizePreset::Large,
        SizePreset::XLarge,
    ];

    /// Side length of the (square) preview window, in logical units.
    pub fn side(self) -> f64 {
        match self {
            SizePreset::Small => 200.0,
            SizePreset::Medium => 300.0,
            SizePreset::Large => 400.0,
            SizePreset::XLarge => 500.0,
        }
    }

    /// Menu label for this preset.
    pub fn label(self) -> &'static str {
        match self {
            SizePreset::Small => "Small (200\u{00d7}200)",
            SizePreset::Medium => "Medium (300\u{00d7}300)",
            SizePreset::Large => "Large (400\u{00d7}400)",
            SizePreset::XLarge => "Extra Large (500\u{00d7}500)",
        }
    }
}

impl Default for SizePreset {
    fn default() -> Self {
        SizePreset::Medium
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned rectangle in logical units, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    pub fn origin(&self) -> Point {
        Point { x: self.x, y: self.y }
    }
}

/// Compute the window frame for `preset` while keeping the current center
/// fixed. Intermediate sizes do not matter: the result depends only on the
/// current center and the target side length.
pub fn resize_preserving_center(current: Rect, preset: SizePreset) -> Rect {
    let side = preset.side();
    let center = current.center();
    Rect {
        x: center.x - side / 2.0,
        y: center.y - side / 2.0,
        width: side,
        height: side,
    }
}

/// The clipped circle in window-local coordinates: concentric with the
/// window, diameter = shortest side minus [`CIRCLE_MARGIN`].
pub fn inner_circle(window: Rect) -> Rect {
    let diameter = window.width.min(window.height) - CIRCLE_MARGIN;
    Rect {
        x: (window.width - diameter) / 2.0,
        y: (window.height - diameter) / 2.0,
        width: diameter,
        height: diameter,
    }
}

/// Affine scale about the view center, applied to the rendered output.
/// Only two values occur: identity and a horizontal flip.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    pub sx: f64,
    pub sy: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform { sx: 1.0, sy: 1.0 };
    pub const HORIZONTAL_FLIP: Transform = Transform { sx: -1.0, sy: 1.0 };

    pub fn is_identity(&self) -> bool {
        *self == Transform::IDENTITY
    }
}

/// Render transform for the current mirror flag.
pub fn mirror_transform(mirrored: bool) -> Transform {
    if mirrored {
        Transform::HORIZONTAL_FLIP
    } else {
        Transform::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_resize_preserves_center_for_all_presets() {
        let start = Rect::new(120.0, 80.0, 300.0, 300.0);
        let center = start.center();

        for preset in SizePreset::ALL {
            let resized = resize_preserving_center(start, preset);
            assert_close(resized.center().x, center.x);
            assert_close(resized.center().y, center.y);
            assert_close(resized.width, preset.side());
            assert_close(resized.height, preset.side());
        }
    }

    #[test]
    fn test_resize_sequence_depends_only_on_final_preset() {
        // 300 -> 500 -> 200 must land exactly where 300 -> 200 would.
        let start = Rect::new(50.0, 50.0, 300.0, 300.0);
        let center = start.center();

        let via_xl = resize_preserving_center(
            resize_preserving_center(start, SizePreset::XLarge),
            SizePreset::Small,
        );
        assert_close(via_xl.width, 200.0);
        assert_close(via_xl.height, 200.0);
        assert_close(via_xl.center().x, center.x);
        assert_close(via_xl.center().y, center.y);

        let direct = resize_preserving_center(start, SizePreset::Small);
        assert_eq!(via_xl, direct);
    }

    #[test]
    fn test_inner_circle_is_concentric_with_constant_margin() {
        for preset in SizePreset::ALL {
            let window = Rect::new(0.0, 0.0, preset.side(), preset.side());
            let circle = inner_circle(window);

            assert_close(circle.width, preset.side() - CIRCLE_MARGIN);
            assert_close(circle.height, circle.width);
            assert_close(circle.center().x, window.center().x);
            assert_close(circle.center().y, window.center().y);
        }
    }

    #[test]
    fn test_mirror_transform_round_trip_is_identity() {
        assert_eq!(mirror_transform(false), Transform::IDENTITY);
        assert_eq!(mirror_transform(true), Transform::HORIZONTAL_FLIP);
        // Mirroring on and back off yields the exact pre-mirror transform.
        let before = mirror_transform(false);
        let after = mirror_transform(false);
        assert_eq!(before, after);
        assert!(after.is_identity());
    }

    #[test]
    fn test_preset_sides() {
        let sides: Vec<f64> = SizePreset::ALL.iter().map(|p| p.side()).collect();
        assert_eq!(sides, vec![200.0, 300.0, 400.0, 500.0]);
    }
}
