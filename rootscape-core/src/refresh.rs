//! Propagation of a view change to the renderer, the overlay and the labels.

use crate::handles::{HandleRegistry, OverlayPainter};
use crate::interface::format_value;
use crate::points::Root;
use crate::transforms::{compute_view_window, ViewWindow};
use crate::view::{Color, ViewInfo};

/// Shader parameter uploads and draw requests.
pub trait ShaderParams {
    /// Upload the visible window and the canvas size in device pixels.
    fn set_view_window(&mut self, window: &ViewWindow, canvas_size: (u32, u32));
    fn set_roots(&mut self, roots: &[Root]);
    fn set_colors(&mut self, colors: &[Color]);
    fn set_iterations(&mut self, iterations: u32);
    /// Draw one full-viewport frame with the current parameters.
    fn request_redraw(&mut self);
}

/// Text readouts of the current view.
pub trait LabelSink {
    fn update_label(&mut self, label: Label, text: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    OffsetX,
    OffsetY,
    Scale,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::OffsetX, Label::OffsetY, Label::Scale];

    /// Id of the page element showing this label.
    pub fn element_id(&self) -> &'static str {
        match self {
            Label::OffsetX => "offset-label-x",
            Label::OffsetY => "offset-label-y",
            Label::Scale => "scale-label",
        }
    }

    pub fn text(&self, view: &ViewInfo) -> String {
        match self {
            Label::OffsetX => format!("x: {}", format_value(*view.offset.x())),
            Label::OffsetY => format!("y: {}", format_value(*view.offset.y())),
            Label::Scale => format!("scale: {}", format_value(view.scale)),
        }
    }
}

/// Bring every collaborator in line with the current view and roots.
///
/// Runs, in order: window and canvas size upload, redraw, handle
/// repositioning and overlay repaint, label update.
pub fn refresh_view(
    view: &ViewInfo,
    roots: &[Root],
    colors: &[Color],
    handles: &mut HandleRegistry,
    shader: &mut impl ShaderParams,
    overlay: &mut impl OverlayPainter,
    labels: &mut impl LabelSink,
) {
    let window = compute_view_window(view);
    shader.set_view_window(&window, view.canvas_size);
    shader.request_redraw();

    handles.refresh(view, roots);
    handles.draw(view, colors, overlay);

    for label in Label::ALL {
        labels.update_label(label, &label.text(view));
    }
}
