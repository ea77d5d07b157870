use crate::points::{HandleCoord, Point, UvPoint};
use crate::view::ViewInfo;

/// Rectangle of UV space currently visible on the canvas.
///
/// Derived from a [`ViewInfo`] on demand and never stored between events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    pub start_x: f64,
    pub end_x: f64,
    pub start_y: f64,
    pub end_y: f64,
}

impl ViewWindow {
    pub fn width(&self) -> f64 {
        self.end_x - self.start_x
    }

    pub fn height(&self) -> f64 {
        self.end_y - self.start_y
    }

    pub fn is_valid(&self) -> bool {
        self.end_x > self.start_x && self.end_y > self.start_y
    }

    /// Layout of the `u_viewWindow` uniform: `[startX, endX, startY, endY]`.
    pub fn as_uniform(&self) -> [f32; 4] {
        [
            self.start_x as f32,
            self.end_x as f32,
            self.start_y as f32,
            self.end_y as f32,
        ]
    }

    /// Map a device-pixel position to UV space.
    ///
    /// Pixel rows grow downward while UV `y` grows upward, so `y` is flipped.
    pub fn pixel_to_uv(&self, px: f64, py: f64, canvas_size: (u32, u32)) -> UvPoint {
        let norm_x = px / canvas_size.0 as f64;
        let norm_y = py / canvas_size.1 as f64;
        Point::new(
            self.start_x + norm_x * self.width(),
            self.start_y + (1.0 - norm_y) * self.height(),
        )
    }

    /// Inverse of [`ViewWindow::pixel_to_uv`], rounded to whole pixels.
    pub fn uv_to_pixel(&self, uv: &UvPoint, canvas_size: (u32, u32)) -> HandleCoord {
        let norm_x = (uv.x() - self.start_x) / self.width();
        let norm_y = (uv.y() - self.start_y) / self.height();
        Point::new(
            (norm_x * canvas_size.0 as f64).round() as i32,
            ((1.0 - norm_y) * canvas_size.1 as f64).round() as i32,
        )
    }
}

pub fn calculate_aspect_ratio(canvas_width: u32, canvas_height: u32) -> f64 {
    canvas_width as f64 / canvas_height as f64
}

/// Compute the visible UV window for a view.
///
/// The half-extent is `1 / scale` on both axes, then the long axis of the
/// canvas is widened by the aspect ratio so circles stay circular, then the
/// window is translated by `offset`.
///
/// # Panics
///
/// Panics if `scale` is not positive or the canvas has zero area. Both are
/// integration bugs in the caller and are not clamped.
pub fn compute_view_window(view: &ViewInfo) -> ViewWindow {
    assert!(
        view.scale > 0.0,
        "view scale must be positive, got {}",
        view.scale
    );
    let (width, height) = view.canvas_size;
    assert!(
        width > 0 && height > 0,
        "canvas must have a non-zero area, got {width}x{height}"
    );

    let half_extent = 1.0 / view.scale;
    let ratio = calculate_aspect_ratio(width, height);
    let (half_x, half_y) = if ratio > 1.0 {
        (half_extent * ratio, half_extent)
    } else {
        (half_extent, half_extent / ratio)
    };

    let (offset_x, offset_y) = view.offset.into_parts();
    ViewWindow {
        start_x: offset_x - half_x,
        end_x: offset_x + half_x,
        start_y: offset_y - half_y,
        end_y: offset_y + half_y,
    }
}

/// Convert a device-pixel position into UV space for the current view.
pub fn pixel_to_uv(px: f64, py: f64, view: &ViewInfo) -> UvPoint {
    compute_view_window(view).pixel_to_uv(px, py, view.canvas_size)
}

/// Convert a UV position into whole device pixels for the current view.
pub fn uv_to_pixel(uv: &UvPoint, view: &ViewInfo) -> HandleCoord {
    compute_view_window(view).uv_to_pixel(uv, view.canvas_size)
}

/// Convert a pointer position in CSS pixels into UV space.
pub fn css_to_uv(css_x: f64, css_y: f64, view: &ViewInfo) -> UvPoint {
    let device = view.to_device_pixels(css_x, css_y);
    pixel_to_uv(*device.x(), *device.y(), view)
}
