pub mod canvas_utils;
mod overlay;
mod webgl;

pub use overlay::CanvasOverlay;
pub use webgl::WebGlRenderer;
