use std::f64::consts::TAU;

use rootscape_core::{Color, HandleCoord, HandleStyle, OverlayPainter};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::canvas_utils::{fit_canvas, get_2d_context};

/// 2D canvas stacked above the WebGL canvas, holding the draggable handles.
pub struct CanvasOverlay {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasOverlay {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = get_2d_context(&canvas)?;
        Ok(Self { canvas, ctx })
    }

    fn draw_handle(
        &self,
        coord: &HandleCoord,
        color: &Color,
        style: &HandleStyle,
    ) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.arc(
            *coord.x() as f64,
            *coord.y() as f64,
            style.fill_radius(),
            0.0,
            TAU,
        )?;
        ctx.set_fill_style_str(&color.css_rgb());
        ctx.fill();
        ctx.set_line_width(style.outline);
        ctx.set_stroke_style_str("white");
        ctx.stroke();
        Ok(())
    }
}

impl OverlayPainter for CanvasOverlay {
    fn draw_handles(
        &mut self,
        canvas_size: (u32, u32),
        coords: &[HandleCoord],
        colors: &[Color],
        style: &HandleStyle,
    ) {
        fit_canvas(&self.canvas, canvas_size);
        self.ctx
            .clear_rect(0.0, 0.0, canvas_size.0 as f64, canvas_size.1 as f64);

        for (coord, color) in coords.iter().zip(colors) {
            if let Err(err) = self.draw_handle(coord, color, style) {
                log::error!("failed to draw handle at {coord:?}: {err:?}");
            }
        }
    }
}
