//! Conversion of DOM events into gesture inputs

use pullrefresh_common::{MouseInput, TouchInput, WheelInput};
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, Node, TouchEvent, WheelEvent};

use crate::dom::DomProbe;

/// Pixels per line for line-mode wheel deltas
pub(crate) const LINE_HEIGHT: f64 = 16.0;

/// `may_suppress` is false for passive listeners, where `preventDefault`
/// would be ignored by the browser anyway.
pub(crate) fn touch_input(event: &TouchEvent, may_suppress: bool) -> TouchInput {
    TouchInput {
        first_y: event.touches().get(0).map(|touch| f64::from(touch.client_y())),
        cancelable: may_suppress && event.cancelable(),
    }
}

pub(crate) fn mouse_input(event: &MouseEvent, may_suppress: bool) -> MouseInput {
    MouseInput {
        y: f64::from(event.client_y()),
        button: event.button(),
        cancelable: may_suppress && event.cancelable(),
    }
}

pub(crate) fn wheel_input(event: &WheelEvent, page_height: f64) -> WheelInput {
    WheelInput {
        delta_y: delta_pixels(event.delta_y(), event.delta_mode(), page_height),
        cancelable: event.cancelable(),
    }
}

/// Normalize a wheel delta to pixels
pub(crate) fn delta_pixels(delta: f64, mode: u32, page_height: f64) -> f64 {
    match mode {
        WheelEvent::DOM_DELTA_LINE => delta * LINE_HEIGHT,
        WheelEvent::DOM_DELTA_PAGE => delta * page_height,
        _ => delta,
    }
}

/// Event target as a node, falling back to the container
pub(crate) fn target_node(event: &Event, probe: &DomProbe) -> Node {
    event
        .target()
        .and_then(|target| target.dyn_into::<Node>().ok())
        .unwrap_or_else(|| probe.container_node())
}
