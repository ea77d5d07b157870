use rootscape_core::{Label, LabelSink};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::rendering::canvas_utils::element_by_id;

/// Offset and scale readouts in the settings menu.
pub struct DomLabels {
    elements: Vec<(Label, Element)>,
}

impl DomLabels {
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        let elements = Label::ALL
            .into_iter()
            .map(|label| -> Result<(Label, Element), JsValue> {
                Ok((label, element_by_id(document, label.element_id())?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { elements })
    }
}

impl LabelSink for DomLabels {
    fn update_label(&mut self, label: Label, text: &str) {
        if let Some((_, element)) = self.elements.iter().find(|(l, _)| *l == label) {
            element.set_text_content(Some(text));
        }
    }
}
