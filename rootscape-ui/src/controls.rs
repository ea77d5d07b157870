use rootscape_core::parse_iterations;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement, HtmlInputElement};

use crate::app::SharedExplorer;
use crate::rendering::canvas_utils::element_by_id;

const SETTINGS_BUTTON_ID: &str = "settings-button";
const ITERATIONS_INPUT_ID: &str = "iterations-input";
const MENU_ACTIVE_CLASS: &str = "menu-active";

/// Toggle the settings menu open and closed.
pub fn attach_settings_button(document: &Document) -> Result<(), JsValue> {
    let button: HtmlElement = element_by_id(document, SETTINGS_BUTTON_ID)?;

    let button_clone = button.clone();
    let on_click = Closure::wrap(Box::new(move |_: Event| {
        let Some(menu) = button_clone.parent_element() else {
            return;
        };
        if let Err(err) = menu.class_list().toggle(MENU_ACTIVE_CLASS) {
            log::warn!("failed to toggle settings menu: {err:?}");
        }
    }) as Box<dyn FnMut(Event)>);

    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

/// Apply edits of the iteration count, writing the normalized value back.
pub fn attach_iterations_input(
    document: &Document,
    explorer: &SharedExplorer,
) -> Result<(), JsValue> {
    let input: HtmlInputElement = element_by_id(document, ITERATIONS_INPUT_ID)?;
    input.set_value(&explorer.borrow().state().view.iterations.to_string());

    let input_clone = input.clone();
    let explorer = explorer.clone();
    let on_change = Closure::wrap(Box::new(move |_: Event| {
        let mut explorer = explorer.borrow_mut();
        match parse_iterations(&input_clone.value()) {
            Ok(iterations) => {
                input_clone.set_value(&iterations.to_string());
                explorer.set_iterations(iterations);
            }
            Err(err) => {
                log::warn!("rejected iteration count: {err}");
                input_clone.set_value(&explorer.state().view.iterations.to_string());
            }
        }
    }) as Box<dyn FnMut(Event)>);

    input.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    on_change.forget();
    Ok(())
}
