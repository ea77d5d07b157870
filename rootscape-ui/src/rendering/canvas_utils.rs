use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, WebGlRenderingContext, Window,
};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No global window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("Window has no document"))
}

/// Look up an element by id and cast it to the expected element type.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{id} has an unexpected type")))
}

/// Window inner size in CSS pixels.
pub fn inner_size(window: &Window) -> Result<(f64, f64), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerWidth is not a number"))?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerHeight is not a number"))?;
    Ok((width, height))
}

/// Get 2D rendering context from canvas.
pub fn get_2d_context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    Ok(canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("No 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?)
}

/// Get WebGL 1 rendering context from canvas.
pub fn get_webgl_context(canvas: &HtmlCanvasElement) -> Result<WebGlRenderingContext, JsValue> {
    Ok(canvas
        .get_context("webgl")?
        .ok_or_else(|| JsValue::from_str("Unable to initialize WebGL"))?
        .dyn_into::<WebGlRenderingContext>()?)
}

/// Resize a canvas backing store, leaving it alone when already sized.
///
/// Returns true if the size changed, which also clears the canvas.
pub fn fit_canvas(canvas: &HtmlCanvasElement, size: (u32, u32)) -> bool {
    if canvas.width() == size.0 && canvas.height() == size.1 {
        return false;
    }
    canvas.set_width(size.0);
    canvas.set_height(size.1);
    true
}
