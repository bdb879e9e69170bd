//! Carries out the effects requested by the gesture controller
//!
//! The driver owns the controller behind `Rc<RefCell<_>>`. Timers and the
//! refresh future only hold weak references, so once the component drops
//! its driver a late timer or completion finds nothing to call into.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gloo_timers::callback::Timeout;
use pullrefresh_common::{
    Effect, Effects, PullConfig, PullController, PullView, Result, TimerSlot, TimerToken,
};
use tracing::debug;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};
use yew::Callback;

use crate::components::pull_to_refresh::RefreshFuture;
use crate::dom::DomProbe;

struct DriverState {
    controller: PullController<DomProbe>,
    timers: HashMap<TimerSlot, Timeout>,
    on_refresh: Callback<(), RefreshFuture>,
    on_view: Callback<PullView>,
}

#[derive(Clone)]
pub(crate) struct Driver(Rc<RefCell<DriverState>>);

impl Driver {
    pub(crate) fn new(
        container: Element,
        config: PullConfig,
        on_refresh: Callback<(), RefreshFuture>,
        on_view: Callback<PullView>,
    ) -> Result<Self> {
        let controller = PullController::new(config, DomProbe::new(container))?;
        Ok(Self(Rc::new(RefCell::new(DriverState {
            controller,
            timers: HashMap::new(),
            on_refresh,
            on_view,
        }))))
    }

    fn upgrade(weak: &Weak<RefCell<DriverState>>) -> Option<Self> {
        weak.upgrade().map(Self)
    }

    /// Run one controller operation, carry out its effects and publish the view
    ///
    /// The controller borrow ends before any effect runs, so callbacks may
    /// re-enter the driver.
    pub(crate) fn run<F>(&self, event: Option<&Event>, operation: F)
    where
        F: FnOnce(&mut PullController<DomProbe>) -> Effects,
    {
        let effects = operation(&mut self.0.borrow_mut().controller);
        self.apply(effects, event);
        self.publish();
    }

    /// Push the current view to the renderer
    pub(crate) fn publish(&self) {
        let (view, on_view) = {
            let state = self.0.borrow();
            (state.controller.view(), state.on_view.clone())
        };
        on_view.emit(view);
    }

    pub(crate) fn set_loading(&self, loading: bool) {
        self.run(None, |controller| controller.set_loading(loading));
    }

    pub(crate) fn set_on_refresh(&self, on_refresh: Callback<(), RefreshFuture>) {
        self.0.borrow_mut().on_refresh = on_refresh;
    }

    /// Stop the controller and drop every pending timer
    pub(crate) fn teardown(&self) {
        let effects = self.0.borrow_mut().controller.teardown();
        self.apply(effects, None);
        self.0.borrow_mut().timers.clear();
    }

    fn apply(&self, effects: Effects, event: Option<&Event>) {
        for effect in effects {
            match effect {
                Effect::SuppressNative => {
                    if let Some(event) = event.filter(|event| event.cancelable()) {
                        event.prevent_default();
                    }
                }
                Effect::StartRefresh => self.start_refresh(),
                Effect::Schedule { slot, token, delay } => self.schedule(slot, token, delay),
                Effect::Cancel(slot) => {
                    self.0.borrow_mut().timers.remove(&slot);
                }
            }
        }
    }

    fn schedule(&self, slot: TimerSlot, token: TimerToken, delay: Duration) {
        let weak = Rc::downgrade(&self.0);
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, move || {
            if let Some(driver) = Driver::upgrade(&weak) {
                driver.run(None, |controller| controller.timer_fired(slot, token));
            }
        });
        // Replacing an entry drops the old Timeout, which clears it.
        self.0.borrow_mut().timers.insert(slot, timeout);
    }

    fn start_refresh(&self) {
        let on_refresh = self.0.borrow().on_refresh.clone();
        let pending = on_refresh.emit(());
        let weak = Rc::downgrade(&self.0);

        spawn_local(async move {
            let outcome = pending.await;
            match Driver::upgrade(&weak) {
                Some(driver) => driver.run(None, move |controller| controller.refresh_settled(outcome)),
                None => debug!("Refresh finished after unmount"),
            }
        });
    }
}
