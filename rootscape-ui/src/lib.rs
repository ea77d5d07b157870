mod app;
mod clock;
mod controls;
mod events;
mod labels;
pub mod rendering;

use wasm_bindgen::prelude::*;

pub use app::{BrowserExplorer, SharedExplorer};
pub use clock::PerformanceClock;
pub use labels::DomLabels;
pub use rendering::{CanvasOverlay, WebGlRenderer};

#[wasm_bindgen]
pub fn hydrate() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
    app::start()
}
