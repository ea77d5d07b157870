use rootscape_core::Clock;
use wasm_bindgen::prelude::*;
use web_sys::{Performance, Window};

/// Millisecond clock over `performance.now()`.
#[derive(Clone)]
pub struct PerformanceClock {
    performance: Performance,
}

impl PerformanceClock {
    pub fn new(window: &Window) -> Result<Self, JsValue> {
        let performance = window
            .performance()
            .ok_or_else(|| JsValue::from_str("No performance timer"))?;
        Ok(Self { performance })
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> u64 {
        self.performance.now() as u64
    }
}
