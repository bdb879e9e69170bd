//! Pull gesture state machine
//!
//! One [`PullSession`] exists per mounted container. It owns the gesture
//! state, the pull distance and the start coordinate, and is the only place
//! they change. Adapters feed it [`PullEvent`]s (or, for the wheel, the
//! `wheel_pull`/`cancel_pull`/`execute_refresh` operations).
//!
//! ```text
//!            start                move diff > 0            end >= threshold
//!   Idle ───────────▶ Dragging ───────────────▶ Pulling ───────────────────▶ Refreshing
//!    ▲                  │  ▲                      │                              │
//!    │   move diff < 0  │  └── move diff <= 0 ────┘                              │
//!    ├──────────────────┘                         │ end < threshold              │
//!    ├────────────────────────────────────────────┘                              │
//!    └──────────────────── settle delay after the refresh completes ─────────────┘
//! ```

use tracing::{debug, info, trace, warn};

use crate::adapters::PullEvent;
use crate::config::PullConfig;
use crate::effect::{Effect, Effects, TimerHandle, TimerSlot, TimerToken};
use crate::probe::ScrollProbe;
use crate::view::PullView;
use crate::{GestureState, RefreshOutcome, Result};

#[derive(Debug)]
pub struct PullSession {
    config: PullConfig,
    state: GestureState,
    pull_distance: f64,
    start_y: f64,
    /// A touch or mouse press is being tracked
    pressed: bool,
    external_loading: bool,
    refresh_in_flight: bool,
    settle: TimerHandle,
}

impl PullSession {
    /// Create a session; an initial `is_loading` starts in `Refreshing`
    pub fn new(config: PullConfig) -> Result<Self> {
        config.validate()?;

        let state = if config.is_loading {
            GestureState::Refreshing
        } else {
            GestureState::Idle
        };

        Ok(Self {
            external_loading: config.is_loading,
            config,
            state,
            pull_distance: 0.0,
            start_y: 0.0,
            pressed: false,
            refresh_in_flight: false,
            settle: TimerHandle::new(TimerSlot::Settle),
        })
    }

    pub fn config(&self) -> &PullConfig {
        &self.config
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn pull_distance(&self) -> f64 {
        self.pull_distance
    }

    pub fn start_y(&self) -> f64 {
        self.start_y
    }

    pub fn is_pulling(&self) -> bool {
        self.state == GestureState::Pulling
    }

    pub fn is_refreshing(&self) -> bool {
        self.state == GestureState::Refreshing
    }

    /// A press is active and has not been cancelled or released
    pub fn is_dragging(&self) -> bool {
        self.pressed && matches!(self.state, GestureState::Dragging | GestureState::Pulling)
    }

    pub fn external_loading(&self) -> bool {
        self.external_loading
    }

    pub fn refresh_in_flight(&self) -> bool {
        self.refresh_in_flight
    }

    pub fn view(&self) -> PullView {
        PullView {
            pull_distance: self.pull_distance,
            is_pulling: self.is_pulling(),
            is_refreshing: self.is_refreshing(),
            is_dragging: self.is_dragging(),
            threshold: self.config.threshold,
        }
    }

    /// Route a normalized adapter event
    pub fn dispatch<P: ScrollProbe>(&mut self, event: PullEvent<P::Target>, probe: &P) -> Effects {
        match event {
            PullEvent::Start { y, target } => self.on_start(y, &target, probe),
            PullEvent::Move { y, cancelable } => self.on_move(y, cancelable, probe),
            PullEvent::End => self.on_end(),
        }
    }

    /// Begin tracking a press at `y`
    ///
    /// Ignored unless the session is idle, the page is at its top and the
    /// target is not inside a scrolled nested region.
    pub fn on_start<P: ScrollProbe>(&mut self, y: f64, target: &P::Target, probe: &P) -> Effects {
        let mut effects = Effects::new();

        if !self.config.enabled || self.state != GestureState::Idle {
            return effects;
        }
        if !probe.page_at_top(self.config.tuning.scroll_tolerance) {
            trace!(page_scroll = probe.page_scroll_top(), "Start rejected, page scrolled");
            return effects;
        }
        if probe.is_inner_scrollable(target) {
            trace!("Start rejected, nested region scrolled");
            return effects;
        }

        // A reset still pending from the previous gesture must not land on this one.
        self.settle.cancel(&mut effects);
        self.start_y = y;
        self.pull_distance = 0.0;
        self.pressed = true;
        self.transition(GestureState::Dragging);

        effects
    }

    pub fn on_move<P: ScrollProbe>(&mut self, y: f64, cancelable: bool, probe: &P) -> Effects {
        let mut effects = Effects::new();

        if !self.pressed || !matches!(self.state, GestureState::Dragging | GestureState::Pulling) {
            return effects;
        }

        let diff = y - self.start_y;
        if diff > 0.0 && probe.page_at_top(self.config.tuning.scroll_tolerance) {
            if cancelable {
                effects.push(Effect::SuppressNative);
            }
            self.pull_distance = diff * self.config.tuning.resistance;
            self.transition(GestureState::Pulling);
        } else {
            self.pull_distance = 0.0;
            if diff < 0.0 {
                // Reversed past the start point: drop the drag so it does not stick.
                self.pressed = false;
                self.transition(GestureState::Idle);
            } else {
                self.transition(GestureState::Dragging);
            }
        }

        effects
    }

    /// Release the press; refreshes when the pull reached the threshold
    pub fn on_end(&mut self) -> Effects {
        let mut effects = Effects::new();

        if !self.pressed {
            return effects;
        }
        self.pressed = false;

        match self.state {
            GestureState::Pulling if self.pull_distance >= self.config.threshold => {
                self.begin_refresh(&mut effects);
            }
            GestureState::Pulling | GestureState::Dragging => {
                debug!(distance = self.pull_distance, "Pull released below threshold");
                self.pull_distance = 0.0;
                self.transition(GestureState::Idle);
            }
            _ => {}
        }

        effects
    }

    /// Force a refresh without a prior release
    ///
    /// No-op while a refresh started here is still in flight.
    pub fn execute_refresh(&mut self) -> Effects {
        let mut effects = Effects::new();

        if self.refresh_in_flight {
            debug!("Refresh already in flight");
            return effects;
        }

        self.pressed = false;
        self.begin_refresh(&mut effects);
        effects
    }

    fn begin_refresh(&mut self, effects: &mut Effects) {
        self.settle.cancel(effects);
        self.pull_distance = self.config.threshold;
        self.refresh_in_flight = true;
        self.transition(GestureState::Refreshing);

        info!(threshold = self.config.threshold, "Starting refresh");
        effects.push(Effect::StartRefresh);
    }

    /// Report completion of the refresh callback
    ///
    /// Success and failure both schedule the settle reset; failures are only
    /// logged. While external loading is on the reset waits for it to end.
    pub fn refresh_settled(&mut self, outcome: RefreshOutcome) -> Effects {
        let mut effects = Effects::new();

        if !self.refresh_in_flight {
            trace!("Ignoring completion of unknown refresh");
            return effects;
        }
        self.refresh_in_flight = false;

        match outcome {
            Ok(()) => debug!("Refresh completed"),
            Err(err) => warn!(error = %err, "Refresh failed"),
        }

        if self.external_loading {
            debug!("Reset deferred until external loading ends");
        } else {
            self.settle.arm(self.config.tuning.settle_delay(), &mut effects);
        }

        effects
    }

    /// Mirror the external loading signal
    pub fn set_loading(&mut self, loading: bool) -> Effects {
        let mut effects = Effects::new();

        if loading == self.external_loading {
            return effects;
        }
        self.external_loading = loading;
        debug!(loading, "External loading changed");

        if loading {
            self.settle.cancel(&mut effects);
            self.pressed = false;
            self.transition(GestureState::Refreshing);
        } else if !self.refresh_in_flight {
            // The distance stays on screen until the settle delay elapses.
            self.transition(GestureState::Idle);
            self.settle.arm(self.config.tuning.settle_delay(), &mut effects);
        }

        effects
    }

    pub fn settle_fired(&mut self, token: TimerToken) -> Effects {
        let effects = Effects::new();

        if !self.settle.fire(token) {
            return effects;
        }
        if self.refresh_in_flight || self.external_loading {
            return effects;
        }

        self.pressed = false;
        self.pull_distance = 0.0;
        self.transition(GestureState::Idle);
        effects
    }

    /// Show a wheel-driven pull of `distance`
    ///
    /// Ignored while refreshing or while a press drag owns the gesture.
    pub fn wheel_pull(&mut self, distance: f64) -> Effects {
        let mut effects = Effects::new();

        if self.state == GestureState::Refreshing || self.pressed {
            return effects;
        }

        self.pull_distance = distance.max(0.0);
        if self.pull_distance > 0.0 {
            self.settle.cancel(&mut effects);
            self.transition(GestureState::Pulling);
        } else {
            self.transition(GestureState::Idle);
        }

        effects
    }

    /// Drop a wheel-driven pull back to idle
    pub fn cancel_pull(&mut self) {
        if self.state == GestureState::Pulling && !self.pressed {
            self.pull_distance = 0.0;
            self.transition(GestureState::Idle);
        }
    }

    /// Disarm the settle timer before the container goes away
    pub fn teardown(&mut self) -> Effects {
        let mut effects = Effects::new();
        self.settle.cancel(&mut effects);
        self.pressed = false;
        effects
    }

    fn transition(&mut self, to: GestureState) {
        if self.state != to {
            debug!(
                from = %self.state,
                to = %to,
                distance = self.pull_distance,
                "Gesture transition"
            );
            self.state = to;
        }
    }
}
