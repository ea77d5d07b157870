//! Screen-space positions of the draggable root handles.
//!
//! Handle coordinates are fully derived from the roots and the current view.
//! They are rebuilt on every refresh and are the only thing pointer hit-testing
//! looks at, so a refresh must run after every mutation of the view or a root.

use crate::points::{HandleCoord, PixelPoint, Root};
use crate::transforms::compute_view_window;
use crate::view::{Color, ViewInfo};
use serde::{Deserialize, Serialize};

/// Geometry of a handle in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleStyle {
    /// Hit radius, also the outer edge of the stroked circle.
    pub radius: f64,
    /// White outline width.
    pub outline: f64,
}

impl HandleStyle {
    pub const fn new(radius: f64, outline: f64) -> Self {
        Self { radius, outline }
    }

    /// Radius of the filled circle, inset by the outline.
    pub fn fill_radius(&self) -> f64 {
        self.radius - self.outline
    }
}

impl Default for HandleStyle {
    fn default() -> Self {
        Self::new(36.0, 6.0)
    }
}

/// 2D surface the handle overlay is drawn on.
pub trait OverlayPainter {
    /// Resize and clear the overlay to `canvas_size`, then draw one handle per
    /// coordinate in index order using the parallel `colors` slice.
    fn draw_handles(
        &mut self,
        canvas_size: (u32, u32),
        coords: &[HandleCoord],
        colors: &[Color],
        style: &HandleStyle,
    );
}

#[derive(Clone, Debug, Default)]
pub struct HandleRegistry {
    coords: Vec<HandleCoord>,
    style: HandleStyle,
}

impl HandleRegistry {
    pub fn new(style: HandleStyle) -> Self {
        Self {
            coords: Vec::new(),
            style,
        }
    }

    pub fn style(&self) -> &HandleStyle {
        &self.style
    }

    pub fn coords(&self) -> &[HandleCoord] {
        &self.coords
    }

    /// Recompute every handle position from its root, in root-index order.
    pub fn refresh(&mut self, view: &ViewInfo, roots: &[Root]) {
        let window = compute_view_window(view);
        self.coords.clear();
        self.coords.extend(
            roots
                .iter()
                .map(|root| window.uv_to_pixel(root, view.canvas_size)),
        );
    }

    /// Index of the handle under `pointer` (device pixels), if any.
    ///
    /// Handles are tested in ascending index order and the last hit wins.
    /// Overlapping handles are not disambiguated by distance.
    pub fn hit_test(&self, pointer: &PixelPoint) -> Option<usize> {
        let radius_sq = self.style.radius * self.style.radius;
        self.coords
            .iter()
            .enumerate()
            .filter(|(_, coord)| coord.to_f64().distance_squared(pointer) < radius_sq)
            .map(|(index, _)| index)
            .last()
    }

    pub fn draw(&self, view: &ViewInfo, colors: &[Color], painter: &mut impl OverlayPainter) {
        painter.draw_handles(view.canvas_size, &self.coords, colors, &self.style);
    }
}
