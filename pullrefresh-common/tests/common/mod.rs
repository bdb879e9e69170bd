//! Common test utilities and helpers

#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use pullrefresh_common::{
    Effect, Effects, MouseInput, PullConfig, PullController, RefreshOutcome, ScrollProbe,
    TimerSlot, TimerToken, TouchInput, WheelInput,
};
use web_time::Instant;

/// Node ids handed to the controller as event targets
pub const CONTENT: u32 = 1;
pub const NESTED_LIST: u32 = 2;

/// Page with a fixed scroll offset and a set of scrolled nested regions
#[derive(Debug, Default)]
pub struct FakePage {
    pub scroll_top: f64,
    pub scrolled_regions: Vec<u32>,
}

impl ScrollProbe for FakePage {
    type Target = u32;

    fn page_scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn is_inner_scrollable(&self, target: &u32) -> bool {
        self.scrolled_regions.contains(target)
    }
}

/// Controller driven by a virtual clock
///
/// Carries out effects the way a host would: schedules go into a timer
/// table keyed by slot, and `advance` fires due timers in deadline order.
pub struct Harness {
    pub controller: PullController<FakePage>,
    origin: Instant,
    elapsed: Duration,
    timers: HashMap<TimerSlot, (TimerToken, Duration)>,
    pub refresh_requests: usize,
    pub suppressed: usize,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(PullConfig::default())
    }

    pub fn with_config(config: PullConfig) -> Self {
        Harness {
            controller: PullController::new(config, FakePage::default())
                .expect("Failed to create controller"),
            origin: Instant::now(),
            elapsed: Duration::ZERO,
            timers: HashMap::new(),
            refresh_requests: 0,
            suppressed: 0,
        }
    }

    pub fn now(&self) -> Instant {
        self.origin + self.elapsed
    }

    pub fn page(&mut self) -> &mut FakePage {
        self.controller.probe_mut()
    }

    pub fn distance(&self) -> f64 {
        self.controller.view().pull_distance
    }

    pub fn is_armed(&self, slot: TimerSlot) -> bool {
        self.timers.contains_key(&slot)
    }

    pub fn apply(&mut self, effects: Effects) -> Effects {
        for effect in effects.iter() {
            match effect {
                Effect::SuppressNative => self.suppressed += 1,
                Effect::StartRefresh => self.refresh_requests += 1,
                Effect::Schedule { slot, token, delay } => {
                    self.timers.insert(*slot, (*token, self.elapsed + *delay));
                }
                Effect::Cancel(slot) => {
                    self.timers.remove(slot);
                }
            }
        }
        effects
    }

    pub fn touch_start(&mut self, y: f64) -> Effects {
        self.touch_start_on(y, CONTENT)
    }

    pub fn touch_start_on(&mut self, y: f64, target: u32) -> Effects {
        let effects = self.controller.touch_start(&TouchInput::at(y), target);
        self.apply(effects)
    }

    pub fn touch_move(&mut self, y: f64) -> Effects {
        let effects = self.controller.touch_move(&TouchInput::at(y));
        self.apply(effects)
    }

    pub fn touch_end(&mut self) -> Effects {
        let effects = self.controller.touch_end();
        self.apply(effects)
    }

    pub fn mouse_down(&mut self, y: f64) -> Effects {
        let effects = self.controller.mouse_down(&MouseInput::primary(y), CONTENT);
        self.apply(effects)
    }

    pub fn mouse_move(&mut self, y: f64) -> Effects {
        let effects = self.controller.mouse_move(&MouseInput::primary(y));
        self.apply(effects)
    }

    pub fn mouse_up(&mut self) -> Effects {
        let effects = self.controller.mouse_up();
        self.apply(effects)
    }

    pub fn mouse_leave(&mut self) -> Effects {
        let effects = self.controller.mouse_leave();
        self.apply(effects)
    }

    pub fn wheel(&mut self, delta_y: f64) -> Effects {
        let now = self.now();
        let effects = self
            .controller
            .wheel(&WheelInput::delta(delta_y), &CONTENT, now);
        self.apply(effects)
    }

    pub fn settle(&mut self, outcome: RefreshOutcome) -> Effects {
        let effects = self.controller.refresh_settled(outcome);
        self.apply(effects)
    }

    pub fn set_loading(&mut self, loading: bool) -> Effects {
        let effects = self.controller.set_loading(loading);
        self.apply(effects)
    }

    pub fn teardown(&mut self) -> Effects {
        let effects = self.controller.teardown();
        self.apply(effects)
    }

    /// Move the clock forward, firing every timer that comes due
    pub fn advance(&mut self, by: Duration) {
        let until = self.elapsed + by;
        loop {
            let due = self
                .timers
                .iter()
                .filter(|(_, (_, at))| *at <= until)
                .min_by_key(|(_, (_, at))| *at)
                .map(|(slot, (token, at))| (*slot, *token, *at));

            let Some((slot, token, at)) = due else {
                break;
            };

            self.timers.remove(&slot);
            self.elapsed = at;
            let effects = self.controller.timer_fired(slot, token);
            self.apply(effects);
        }
        self.elapsed = until;
    }

    pub fn advance_ms(&mut self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

/// Assert two distances match up to float noise
pub fn assert_distance(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected distance {}, got {}",
        expected,
        actual
    );
}
