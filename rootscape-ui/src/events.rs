//! Browser input wiring. Mouse and touch events are reduced to
//! [`GestureInput`]s in CSS pixels and handed to the shared explorer.

use rootscape_core::{Clock, GestureInput};
use wasm_bindgen::prelude::*;
use web_sys::{Document, MouseEvent, TouchEvent, WheelEvent, Window};

use crate::app::SharedExplorer;
use crate::clock::PerformanceClock;
use crate::rendering::canvas_utils::inner_size;

fn mouse_input(event: &MouseEvent, clock: &impl Clock) -> GestureInput {
    GestureInput::now(event.client_x() as f64, event.client_y() as f64, clock)
}

/// Touches only ever drive a single pointer: the first changed touch.
fn touch_input(event: &TouchEvent, clock: &impl Clock) -> Option<GestureInput> {
    event
        .changed_touches()
        .get(0)
        .map(|touch| GestureInput::now(touch.client_x() as f64, touch.client_y() as f64, clock))
}

pub fn attach_resize(window: &Window, explorer: &SharedExplorer) -> Result<(), JsValue> {
    let window_clone = window.clone();
    let explorer = explorer.clone();
    let on_resize = Closure::wrap(Box::new(move || match inner_size(&window_clone) {
        Ok((width, height)) if width >= 1.0 && height >= 1.0 => {
            explorer.borrow_mut().resize(width, height);
        }
        Ok(size) => log::debug!("skipping resize to empty layout {size:?}"),
        Err(err) => log::error!("failed to read window size: {err:?}"),
    }) as Box<dyn FnMut()>);

    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}

pub fn attach_mouse(
    window: &Window,
    explorer: &SharedExplorer,
    clock: &PerformanceClock,
) -> Result<(), JsValue> {
    let (down_explorer, down_clock) = (explorer.clone(), clock.clone());
    let on_down = Closure::wrap(Box::new(move |e: MouseEvent| {
        down_explorer
            .borrow_mut()
            .pointer_down(mouse_input(&e, &down_clock));
    }) as Box<dyn FnMut(MouseEvent)>);
    window.add_event_listener_with_callback("mousedown", on_down.as_ref().unchecked_ref())?;
    on_down.forget();

    let (move_explorer, move_clock) = (explorer.clone(), clock.clone());
    let on_move = Closure::wrap(Box::new(move |e: MouseEvent| {
        move_explorer
            .borrow_mut()
            .pointer_move(mouse_input(&e, &move_clock));
    }) as Box<dyn FnMut(MouseEvent)>);
    window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    on_move.forget();

    let up_explorer = explorer.clone();
    let on_up = Closure::wrap(Box::new(move |_: MouseEvent| {
        up_explorer.borrow_mut().pointer_up();
    }) as Box<dyn FnMut(MouseEvent)>);
    window.add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref())?;
    on_up.forget();

    let (wheel_explorer, wheel_clock) = (explorer.clone(), clock.clone());
    let on_wheel = Closure::wrap(Box::new(move |e: WheelEvent| {
        wheel_explorer
            .borrow_mut()
            .wheel(mouse_input(&e, &wheel_clock), e.delta_y());
    }) as Box<dyn FnMut(WheelEvent)>);
    window.add_event_listener_with_callback("wheel", on_wheel.as_ref().unchecked_ref())?;
    on_wheel.forget();

    Ok(())
}

pub fn attach_touch(
    document: &Document,
    explorer: &SharedExplorer,
    clock: &PerformanceClock,
) -> Result<(), JsValue> {
    let (start_explorer, start_clock) = (explorer.clone(), clock.clone());
    let on_start = Closure::wrap(Box::new(move |e: TouchEvent| {
        if let Some(input) = touch_input(&e, &start_clock) {
            start_explorer.borrow_mut().pointer_down(input);
        }
    }) as Box<dyn FnMut(TouchEvent)>);
    document.add_event_listener_with_callback("touchstart", on_start.as_ref().unchecked_ref())?;
    on_start.forget();

    let (move_explorer, move_clock) = (explorer.clone(), clock.clone());
    let on_move = Closure::wrap(Box::new(move |e: TouchEvent| {
        if let Some(input) = touch_input(&e, &move_clock) {
            move_explorer.borrow_mut().pointer_move(input);
        }
    }) as Box<dyn FnMut(TouchEvent)>);
    document.add_event_listener_with_callback("touchmove", on_move.as_ref().unchecked_ref())?;
    on_move.forget();

    let end_explorer = explorer.clone();
    let on_end = Closure::wrap(Box::new(move |_: TouchEvent| {
        end_explorer.borrow_mut().pointer_up();
    }) as Box<dyn FnMut(TouchEvent)>);
    document.add_event_listener_with_callback("touchend", on_end.as_ref().unchecked_ref())?;
    on_end.forget();

    Ok(())
}
