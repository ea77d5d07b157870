use crate::points::{PixelPoint, Point, Root, UvPoint};
use serde::{Deserialize, Serialize};

/// Current view over the root plane.
///
/// - `scale`: zoom level; the visible half-extent on the short axis is `1 / scale`
/// - `offset`: centre of the visible window in UV space
/// - `pixel_ratio`: device pixels per CSS pixel
/// - `canvas_size`: backing canvas size in device pixels
/// - `iterations`: iteration count handed to the shader
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewInfo {
    pub scale: f64,
    pub offset: UvPoint,
    pub pixel_ratio: f64,
    pub canvas_size: (u32, u32),
    pub iterations: u32,
}

impl ViewInfo {
    pub fn new(
        scale: f64,
        offset: UvPoint,
        pixel_ratio: f64,
        canvas_size: (u32, u32),
        iterations: u32,
    ) -> Self {
        Self {
            scale,
            offset,
            pixel_ratio,
            canvas_size,
            iterations,
        }
    }

    pub fn canvas_width(&self) -> u32 {
        self.canvas_size.0
    }

    pub fn canvas_height(&self) -> u32 {
        self.canvas_size.1
    }

    /// Scale a pointer position from CSS pixels to the canvas backing store.
    pub fn to_device_pixels(&self, css_x: f64, css_y: f64) -> PixelPoint {
        Point::new(css_x * self.pixel_ratio, css_y * self.pixel_ratio)
    }

    /// Resize the backing canvas to cover `css_width` x `css_height` CSS pixels.
    ///
    /// Each side is at least one device pixel, so the view window always has an area.
    pub fn resize_css(&mut self, css_width: f64, css_height: f64) {
        let ratio = self.pixel_ratio;
        let device = |css: f64| ((css * ratio).round() as u32).max(1);
        self.canvas_size = (device(css_width), device(css_height));
    }
}

/// Linear RGB colour of a root's basin, each channel in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
        ]
    }

    /// CSS `rgb()` notation used by the 2D overlay.
    pub fn css_rgb(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("rgb({r}, {g}, {b})")
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Single owner of everything the interaction handlers mutate.
///
/// `roots` and `colors` are parallel: index `i` is the root, its handle and
/// its shader uniform slot.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub view: ViewInfo,
    pub roots: Vec<Root>,
    pub colors: Vec<Color>,
}

impl ViewState {
    pub fn new(view: ViewInfo, roots: Vec<Root>, colors: Vec<Color>) -> Self {
        assert_eq!(
            roots.len(),
            colors.len(),
            "every root needs exactly one colour"
        );
        Self {
            view,
            roots,
            colors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_view() -> ViewInfo {
        ViewInfo::new(0.5, Point::new(0.0, 0.0), 2.0, (1600, 1200), 10)
    }

    #[test]
    fn to_device_pixels_applies_pixel_ratio() {
        let view = test_view();
        assert_eq!(view.to_device_pixels(400.0, 300.0), Point::new(800.0, 600.0));
    }

    #[test]
    fn resize_css_scales_by_pixel_ratio() {
        let mut view = test_view();
        view.resize_css(1024.0, 768.0);
        assert_eq!(view.canvas_size, (2048, 1536));
    }

    #[test]
    fn resize_css_rounds_fractional_sizes() {
        let mut view = test_view();
        view.pixel_ratio = 1.5;
        view.resize_css(101.0, 33.0);
        // 151.5 rounds up, 49.5 rounds up
        assert_eq!(view.canvas_size, (152, 50));
    }

    #[test]
    fn resize_css_never_produces_an_empty_canvas() {
        let mut view = test_view();
        view.pixel_ratio = 0.3;
        view.resize_css(1.0, 1.0);
        assert_eq!(view.canvas_size, (1, 1));

        view.resize_css(0.0, 400.0);
        assert_eq!(view.canvas_size, (1, 120));
    }

    #[test]
    fn color_css_rgb_rounds_channels() {
        let color = Color::new(0.337, 0.443, 0.537);
        assert_eq!(color.to_rgb8(), [86, 113, 137]);
        assert_eq!(color.css_rgb(), "rgb(86, 113, 137)");
    }

    #[test]
    fn color_channels_are_clamped() {
        let color = Color::new(-0.5, 1.5, 1.0);
        assert_eq!(color.to_rgb8(), [0, 255, 255]);
    }

    #[test]
    #[should_panic(expected = "every root needs exactly one colour")]
    fn view_state_rejects_mismatched_colors() {
        ViewState::new(test_view(), vec![Point::new(0.0, 0.0)], vec![]);
    }

    #[test]
    fn view_info_serialization_roundtrip() {
        let original = test_view();
        let json = serde_json::to_string(&original).unwrap();
        let restored: ViewInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
    }
}
