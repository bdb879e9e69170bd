//! Event listener registration on the pull container
//!
//! Listeners are attached directly rather than through `html!` handlers so
//! touchmove and wheel can be registered non-passive. Every registration is
//! undone when its [`EventListener`] is dropped.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget, MouseEvent, TouchEvent, WheelEvent};
use web_time::Instant;

use crate::driver::Driver;
use crate::input;

const PASSIVE: bool = true;
const ACTIVE: bool = false;

/// One registered DOM listener, removed on drop
pub(crate) struct EventListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub(crate) fn new<F>(
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        handler: F,
    ) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;

        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Every listener the gesture needs on one container
pub(crate) struct ListenerSet {
    #[allow(dead_code)] // held for Drop
    listeners: Vec<EventListener>,
}

impl ListenerSet {
    pub(crate) fn attach(container: &Element, driver: &Driver) -> Result<Self, JsValue> {
        let target: &EventTarget = container.as_ref();

        let listeners = vec![
            listen(target, "touchstart", PASSIVE, driver, |driver, event| {
                if let Some(touch) = event.dyn_ref::<TouchEvent>() {
                    let touch = input::touch_input(touch, false);
                    driver.run(Some(event), |controller| {
                        let node = input::target_node(event, controller.probe());
                        controller.touch_start(&touch, node)
                    });
                }
            })?,
            listen(target, "touchmove", ACTIVE, driver, |driver, event| {
                if let Some(touch) = event.dyn_ref::<TouchEvent>() {
                    let touch = input::touch_input(touch, true);
                    driver.run(Some(event), |controller| controller.touch_move(&touch));
                }
            })?,
            listen(target, "touchend", PASSIVE, driver, |driver, event| {
                driver.run(Some(event), |controller| controller.touch_end());
            })?,
            listen(target, "touchcancel", PASSIVE, driver, |driver, event| {
                driver.run(Some(event), |controller| controller.touch_cancel());
            })?,
            listen(target, "mousedown", PASSIVE, driver, |driver, event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    let mouse = input::mouse_input(mouse, false);
                    driver.run(Some(event), |controller| {
                        let node = input::target_node(event, controller.probe());
                        controller.mouse_down(&mouse, node)
                    });
                }
            })?,
            listen(target, "mousemove", PASSIVE, driver, |driver, event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    let mouse = input::mouse_input(mouse, false);
                    driver.run(Some(event), |controller| controller.mouse_move(&mouse));
                }
            })?,
            listen(target, "mouseup", PASSIVE, driver, |driver, event| {
                driver.run(Some(event), |controller| controller.mouse_up());
            })?,
            listen(target, "mouseleave", PASSIVE, driver, |driver, event| {
                driver.run(Some(event), |controller| controller.mouse_leave());
            })?,
            listen(target, "wheel", ACTIVE, driver, |driver, event| {
                if let Some(wheel) = event.dyn_ref::<WheelEvent>() {
                    driver.run(Some(event), |controller| {
                        let wheel = input::wheel_input(wheel, controller.probe().page_height());
                        let node = input::target_node(event, controller.probe());
                        controller.wheel(&wheel, &node, Instant::now())
                    });
                }
            })?,
        ];

        Ok(Self { listeners })
    }
}

fn listen<F>(
    target: &EventTarget,
    kind: &'static str,
    passive: bool,
    driver: &Driver,
    handler: F,
) -> Result<EventListener, JsValue>
where
    F: Fn(&Driver, &Event) + 'static,
{
    let driver = driver.clone();
    EventListener::new(target, kind, passive, move |event| handler(&driver, &event))
}
