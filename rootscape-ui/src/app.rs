//! Page bootstrap: reads configuration, builds the explorer over the page's
//! canvases and hooks up every listener.

use std::cell::RefCell;
use std::rc::Rc;

use rootscape_core::{Explorer, ExplorerConfig};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement};

use crate::clock::PerformanceClock;
use crate::controls;
use crate::events;
use crate::labels::DomLabels;
use crate::rendering::canvas_utils::{document, element_by_id, inner_size, window};
use crate::rendering::{CanvasOverlay, WebGlRenderer};

pub type BrowserExplorer = Explorer<WebGlRenderer, CanvasOverlay, DomLabels>;

/// The explorer shared between event listeners on the single browser thread.
pub type SharedExplorer = Rc<RefCell<BrowserExplorer>>;

const GL_CANVAS_ID: &str = "gl-canvas";
const OVERLAY_CANVAS_ID: &str = "interact-canvas";
/// `<script type="application/json">` element holding optional overrides.
const CONFIG_SCRIPT_ID: &str = "rootscape-config";

pub fn start() -> Result<(), JsValue> {
    let window = window()?;
    let document = document()?;

    let config = load_config(&document);
    let css_size = inner_size(&window)?;
    let canvas_size = device_canvas_size(css_size, config.pixel_ratio);

    let gl_canvas: HtmlCanvasElement = element_by_id(&document, GL_CANVAS_ID)?;
    let overlay_canvas: HtmlCanvasElement = element_by_id(&document, OVERLAY_CANVAS_ID)?;

    let renderer = WebGlRenderer::new(gl_canvas)?;
    let overlay = CanvasOverlay::new(overlay_canvas)?;
    let labels = DomLabels::new(&document)?;

    let explorer: SharedExplorer = Rc::new(RefCell::new(Explorer::new(
        &config,
        canvas_size,
        renderer,
        overlay,
        labels,
    )));

    controls::attach_settings_button(&document)?;
    controls::attach_iterations_input(&document, &explorer)?;

    let clock = PerformanceClock::new(&window)?;
    events::attach_resize(&window, &explorer)?;
    events::attach_mouse(&window, &explorer, &clock)?;
    events::attach_touch(&document, &explorer, &clock)?;

    Ok(())
}

fn load_config(document: &Document) -> ExplorerConfig {
    let source = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|element| element.text_content());
    config_from_source(source.as_deref())
}

/// Parse page-supplied overrides, falling back to the built-in defaults.
fn config_from_source(source: Option<&str>) -> ExplorerConfig {
    let Some(json) = source.map(str::trim).filter(|json| !json.is_empty()) else {
        log::debug!("no page configuration, using defaults");
        return ExplorerConfig::default();
    };

    match ExplorerConfig::from_json(json) {
        Ok(config) => {
            log::info!("loaded page configuration with {} roots", config.roots.len());
            config
        }
        Err(err) => {
            log::warn!("ignoring page configuration: {err}");
            ExplorerConfig::default()
        }
    }
}

/// Backing-store size for a CSS size; never zero so the first frame has an area.
fn device_canvas_size(css_size: (f64, f64), pixel_ratio: f64) -> (u32, u32) {
    let scale = |css: f64| ((css * pixel_ratio).round() as u32).max(1);
    (scale(css_size.0), scale(css_size.1))
}
