//! Per-container composition of the session and the three adapters
//!
//! Hosts forward native events here and carry out the returned [`Effects`].
//! After [`PullController::teardown`] every entry point is a no-op, so late
//! timers or refresh completions cannot touch a destroyed view.

use tracing::debug;
use web_time::Instant;

use crate::adapters::{MouseAdapter, MouseInput, TouchAdapter, TouchInput, WheelAdapter, WheelInput};
use crate::config::PullConfig;
use crate::effect::{Effects, TimerSlot, TimerToken};
use crate::probe::ScrollProbe;
use crate::session::PullSession;
use crate::view::PullView;
use crate::{GestureState, RefreshOutcome, Result};

#[derive(Debug)]
pub struct PullController<P: ScrollProbe> {
    session: PullSession,
    touch: TouchAdapter,
    mouse: MouseAdapter,
    wheel: WheelAdapter,
    probe: P,
    torn_down: bool,
}

impl<P: ScrollProbe> PullController<P> {
    pub fn new(config: PullConfig, probe: P) -> Result<Self> {
        Ok(Self {
            session: PullSession::new(config)?,
            touch: TouchAdapter,
            mouse: MouseAdapter,
            wheel: WheelAdapter::new(),
            probe,
            torn_down: false,
        })
    }

    pub fn session(&self) -> &PullSession {
        &self.session
    }

    pub fn wheel_adapter(&self) -> &WheelAdapter {
        &self.wheel
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }

    pub fn state(&self) -> GestureState {
        self.session.state()
    }

    pub fn view(&self) -> PullView {
        self.session.view()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn touch_start(&mut self, input: &TouchInput, target: P::Target) -> Effects {
        if self.torn_down {
            return Effects::new();
        }
        match self.touch.start(input, target) {
            Some(event) => self.session.dispatch(event, &self.probe),
            None => Effects::new(),
        }
    }

    pub fn touch_move(&mut self, input: &TouchInput) -> Effects {
        if self.torn_down {
            return Effects::new();
        }
        match self.touch.moved(input) {
            Some(event) => self.session.dispatch(event, &self.probe),
            None => Effects::new(),
        }
    }

    pub fn touch_end(&mut self) -> Effects {
        if self.torn_down {
            return Effects::new();
        }
        self.session.dispatch(self.touch.end(), &self.probe)
    }

    pub fn touch_cancel(&mut self) -> Effects {
        if self.torn_down {
            return Effects::new();
        }
        self.session.dispatch(self.touch.cancel(), &self.probe)
    }

    pub fn mouse_down(&mut self, input: &MouseInput, target: P::Target) -> Effects {
        if self.torn_down {
            return Effects::new();
        }
        match self.mouse.down(input, target) {
            Some(event) => self.session.dispatch(event, &self.probe),
            None => Effects::new(),
        }
    }

    pub fn mouse_move(&mut self, input: &MouseInput) -> Effects {
        if self.torn_down {
            return Effects::new();
        }
        match self.mouse.moved(input, self.session.is_dragging()) {
            Some(event) => self.session.dispatch(event, &self.probe),
            None => Effects::new(),
        }
    }

    pub fn mouse_up(&mut self) -> Effects {
        if self.torn_down {
            return Effects::new();
        }
        self.session.dispatch(self.mouse.up(), &self.probe)
    }

    pub fn mouse_leave(&mut self) -> Effects {
        if self.torn_down {
            return Effects::new();
        }
        self.session.dispatch(self.mouse.leave(), &self.probe)
    }

    pub fn wheel(&mut self, input: &WheelInput, target: &P::Target, now: Instant) -> Effects {
        if self.torn_down {
            return Effects::new();
        }
        self.wheel
            .on_wheel(input, target, now, &mut self.session, &self.probe)
    }

    /// Mirror the caller's loading flag
    pub fn set_loading(&mut self, loading: bool) -> Effects {
        if self.torn_down {
            return Effects::new();
        }
        self.session.set_loading(loading)
    }

    pub fn refresh_settled(&mut self, outcome: RefreshOutcome) -> Effects {
        if self.torn_down {
            return Effects::new();
        }
        self.session.refresh_settled(outcome)
    }

    pub fn timer_fired(&mut self, slot: TimerSlot, token: TimerToken) -> Effects {
        if self.torn_down {
            return Effects::new();
        }
        match slot {
            TimerSlot::Settle => self.session.settle_fired(token),
            TimerSlot::WheelIdle => self.wheel.idle_fired(token, &mut self.session),
        }
    }

    /// Cancel every timer and stop reacting to input; idempotent
    pub fn teardown(&mut self) -> Effects {
        let mut effects = Effects::new();
        if self.torn_down {
            return effects;
        }
        self.torn_down = true;

        effects.append(self.session.teardown());
        self.wheel.reset(&mut effects);
        debug!(cancelled = effects.len(), "Pull controller torn down");
        effects
    }
}
