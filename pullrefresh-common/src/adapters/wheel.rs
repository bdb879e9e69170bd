//! Wheel and trackpad adapter
//!
//! Wheel input is a stream of deltas with no press and no release:
//! - upward deltas (`delta_y < 0`) pull, scaled by `wheel_pull_factor` and
//!   clamped to `threshold * max_pull_factor`
//! - downward deltas push the pull back, scaled by `wheel_push_factor`
//! - visible updates are throttled to one per `wheel_throttle_ms`; deltas
//!   inside the window go to an accumulator that the next update flushes
//! - `wheel_idle_ms` of silence ends the gesture: refresh when the pull
//!   reached the threshold, reset otherwise
//! - a single delta above `wheel_fast_delta` that leaves the pull past the
//!   threshold refreshes at once without waiting for the silence

use tracing::{debug, trace};
use web_time::Instant;

use crate::effect::{Effect, Effects, TimerHandle, TimerSlot, TimerToken};
use crate::probe::ScrollProbe;
use crate::session::PullSession;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelInput {
    /// Vertical delta in pixels; negative scrolls toward the top
    pub delta_y: f64,
    pub cancelable: bool,
}

impl WheelInput {
    pub fn delta(delta_y: f64) -> Self {
        Self {
            delta_y,
            cancelable: true,
        }
    }
}

#[derive(Debug)]
pub struct WheelAdapter {
    /// Scaled upward deltas not yet shown
    pending: f64,
    last_processed: Option<Instant>,
    last_event: Option<Instant>,
    idle: TimerHandle,
}

impl Default for WheelAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl WheelAdapter {
    pub fn new() -> Self {
        Self {
            pending: 0.0,
            last_processed: None,
            last_event: None,
            idle: TimerHandle::new(TimerSlot::WheelIdle),
        }
    }

    pub fn pending(&self) -> f64 {
        self.pending
    }

    pub fn last_event_at(&self) -> Option<Instant> {
        self.last_event
    }

    /// A wheel gesture is in progress
    pub fn is_active(&self) -> bool {
        self.last_event.is_some()
    }

    pub fn on_wheel<P: ScrollProbe>(
        &mut self,
        input: &WheelInput,
        target: &P::Target,
        now: Instant,
        session: &mut PullSession,
        probe: &P,
    ) -> Effects {
        let mut effects = Effects::new();

        if !session.config().enabled || session.is_refreshing() || session.is_dragging() {
            return effects;
        }

        let tuning = session.config().tuning;
        let threshold = session.config().threshold;
        let max_pull = session.config().max_pull();

        if !probe.page_at_top(tuning.scroll_tolerance) || probe.is_inner_scrollable(target) {
            self.reset(&mut effects);
            session.cancel_pull();
            return effects;
        }

        self.last_event = Some(now);
        self.idle.arm(tuning.wheel_idle(), &mut effects);

        if input.delta_y < 0.0 {
            let scaled = -input.delta_y * tuning.wheel_pull_factor;

            // The first delta of a gesture opens the throttle window.
            let last = *self.last_processed.get_or_insert(now);
            if now.saturating_duration_since(last) < tuning.wheel_throttle() {
                self.pending += scaled;
                if session.is_pulling() && input.cancelable {
                    effects.push(Effect::SuppressNative);
                }
                trace!(pending = self.pending, "Wheel delta accumulated");
                return effects;
            }

            let distance = (live_distance(session) + self.pending + scaled).min(max_pull);
            self.pending = 0.0;
            self.last_processed = Some(now);

            effects.append(session.wheel_pull(distance));
            if distance > 0.0 && input.cancelable {
                effects.push(Effect::SuppressNative);
            }

            if -input.delta_y > tuning.wheel_fast_delta && distance >= threshold {
                debug!(delta_y = input.delta_y, distance, "Fast wheel pull past threshold");
                self.reset(&mut effects);
                effects.append(session.execute_refresh());
            }
        } else if input.delta_y > 0.0 {
            let current = (live_distance(session) + self.pending).min(max_pull);
            self.pending = 0.0;

            if current <= 0.0 {
                // Plain scroll toward content; nothing to push back.
                self.reset(&mut effects);
                return effects;
            }

            let distance = (current - input.delta_y * tuning.wheel_push_factor).max(0.0);
            effects.append(session.wheel_pull(distance));

            if distance > 0.0 {
                if session.is_pulling() && input.cancelable {
                    effects.push(Effect::SuppressNative);
                }
            } else {
                self.reset(&mut effects);
            }
        }

        effects
    }

    /// Handle the inactivity timer: the wheel gesture's release
    pub fn idle_fired(&mut self, token: TimerToken, session: &mut PullSession) -> Effects {
        let mut effects = Effects::new();

        if !self.idle.fire(token) {
            return effects;
        }

        let distance = (live_distance(session) + self.pending).min(session.config().max_pull());
        self.reset(&mut effects);

        if session.is_refreshing() || session.is_dragging() {
            return effects;
        }

        if distance >= session.config().threshold {
            debug!(distance, "Wheel gesture ended past threshold");
            effects.append(session.execute_refresh());
        } else {
            trace!(distance, "Wheel gesture ended below threshold");
            session.cancel_pull();
        }

        effects
    }

    /// Drop the accumulator and disarm the inactivity timer
    pub fn reset(&mut self, effects: &mut Effects) {
        self.pending = 0.0;
        self.last_processed = None;
        self.last_event = None;
        self.idle.cancel(effects);
    }
}

/// Distance a wheel delta builds on
///
/// Only a pull in progress counts. The distance left on screen while a settle
/// reset is pending belongs to the finished refresh.
fn live_distance(session: &PullSession) -> f64 {
    if session.is_pulling() {
        session.pull_distance()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PullConfig;
    use crate::GestureState;
    use std::time::Duration;

    #[derive(Default)]
    struct Page {
        scroll_top: f64,
    }

    impl ScrollProbe for Page {
        type Target = ();

        fn page_scroll_top(&self) -> f64 {
            self.scroll_top
        }

        fn is_inner_scrollable(&self, _target: &()) -> bool {
            false
        }
    }

    struct Rig {
        adapter: WheelAdapter,
        session: PullSession,
        page: Page,
        start: Instant,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                adapter: WheelAdapter::new(),
                session: PullSession::new(PullConfig::default()).unwrap(),
                page: Page::default(),
                start: Instant::now(),
            }
        }

        fn wheel(&mut self, at_ms: u64, delta_y: f64) -> Effects {
            let now = self.start + Duration::from_millis(at_ms);
            self.adapter.on_wheel(
                &WheelInput::delta(delta_y),
                &(),
                now,
                &mut self.session,
                &self.page,
            )
        }
    }

    #[test]
    fn test_first_delta_only_accumulates() {
        let mut rig = Rig::new();

        let effects = rig.wheel(0, -20.0);

        assert!(effects.scheduled(TimerSlot::WheelIdle).is_some());
        assert_eq!(rig.session.pull_distance(), 0.0);
        assert!((rig.adapter.pending() - 6.0).abs() < 1e-9);
        assert!(rig.adapter.is_active());
    }

    #[test]
    fn test_flush_after_window() {
        let mut rig = Rig::new();
        rig.wheel(0, -20.0);
        rig.wheel(8, -20.0);

        let effects = rig.wheel(16, -20.0);

        assert!(effects.suppresses_native());
        assert!((rig.session.pull_distance() - 18.0).abs() < 1e-9);
        assert_eq!(rig.adapter.pending(), 0.0);
        assert_eq!(rig.session.state(), GestureState::Pulling);
    }

    #[test]
    fn test_pull_is_clamped() {
        let mut rig = Rig::new();
        rig.wheel(0, -40.0);
        for step in 1..20 {
            rig.wheel(step * 20, -40.0);
        }
        // The last deltas are under the fast trigger, so no refresh yet.
        assert_eq!(rig.session.pull_distance(), 120.0);
        assert!(!rig.session.is_refreshing());
    }

    #[test]
    fn test_downward_delta_decays() {
        let mut rig = Rig::new();
        rig.wheel(0, -100.0);
        rig.wheel(20, -10.0);
        assert!((rig.session.pull_distance() - 33.0).abs() < 1e-9);

        rig.wheel(40, 20.0);
        assert!((rig.session.pull_distance() - 23.0).abs() < 1e-9);
        assert!(rig.session.is_pulling());

        let effects = rig.wheel(60, 100.0);
        assert_eq!(rig.session.pull_distance(), 0.0);
        assert_eq!(rig.session.state(), GestureState::Idle);
        assert!(!effects.suppresses_native());
        assert!(effects.cancels(TimerSlot::WheelIdle));
        assert!(!rig.adapter.is_active());
    }

    #[test]
    fn test_plain_downward_scroll_is_untouched() {
        let mut rig = Rig::new();

        let effects = rig.wheel(0, 30.0);

        assert!(!effects.suppresses_native());
        assert_eq!(rig.session.state(), GestureState::Idle);
    }

    #[test]
    fn test_scrolled_page_resets_pull() {
        let mut rig = Rig::new();
        rig.wheel(0, -50.0);
        rig.wheel(20, -10.0);
        assert!(rig.session.is_pulling());

        rig.page.scroll_top = 40.0;
        let effects = rig.wheel(40, -10.0);

        assert!(effects.cancels(TimerSlot::WheelIdle));
        assert_eq!(rig.session.pull_distance(), 0.0);
        assert_eq!(rig.session.state(), GestureState::Idle);
    }

    #[test]
    fn test_idle_below_threshold_resets() {
        let mut rig = Rig::new();
        rig.wheel(0, -50.0);
        let effects = rig.wheel(20, -10.0);
        let (token, delay) = effects.scheduled(TimerSlot::WheelIdle).unwrap();
        assert_eq!(delay, Duration::from_millis(50));

        let effects = rig.adapter.idle_fired(token, &mut rig.session);

        assert!(!effects.starts_refresh());
        assert_eq!(rig.session.state(), GestureState::Idle);
        assert_eq!(rig.session.pull_distance(), 0.0);
    }

    #[test]
    fn test_idle_flushes_pending_before_deciding() {
        let mut rig = Rig::new();
        // 0.3 * 250 = 75, never shown because no second event arrives.
        let effects = rig.wheel(0, -250.0);
        let (token, _) = effects.scheduled(TimerSlot::WheelIdle).unwrap();

        let effects = rig.adapter.idle_fired(token, &mut rig.session);

        assert!(effects.starts_refresh());
        assert_eq!(rig.session.state(), GestureState::Refreshing);
        assert_eq!(rig.session.pull_distance(), 60.0);
    }

    #[test]
    fn test_stale_idle_token_is_ignored() {
        let mut rig = Rig::new();
        let first = rig.wheel(0, -250.0).scheduled(TimerSlot::WheelIdle).unwrap().0;
        rig.wheel(5, -10.0);

        assert!(rig.adapter.idle_fired(first, &mut rig.session).is_empty());
        assert!(!rig.session.is_refreshing());
    }

    #[test]
    fn test_fast_delta_past_threshold_triggers_immediately() {
        let mut rig = Rig::new();
        rig.wheel(0, -100.0);

        let effects = rig.wheel(20, -120.0);

        assert!(effects.starts_refresh());
        assert!(effects.cancels(TimerSlot::WheelIdle));
        assert_eq!(rig.session.state(), GestureState::Refreshing);
        assert_eq!(rig.session.pull_distance(), 60.0);
    }

    #[test]
    fn test_leftover_settle_distance_is_not_a_pull() {
        let mut rig = Rig::new();
        rig.session.execute_refresh();
        rig.session.set_loading(true);
        rig.session.refresh_settled(Ok(()));
        rig.session.set_loading(false);
        assert_eq!(rig.session.state(), GestureState::Idle);
        assert_eq!(rig.session.pull_distance(), 60.0);

        let (token, _) = rig.wheel(0, -2.0).scheduled(TimerSlot::WheelIdle).unwrap();
        let effects = rig.adapter.idle_fired(token, &mut rig.session);

        assert!(!effects.starts_refresh());
        assert_eq!(rig.session.state(), GestureState::Idle);
    }

    #[test]
    fn test_ignored_while_refreshing() {
        let mut rig = Rig::new();
        rig.session.execute_refresh();

        let effects = rig.wheel(0, -100.0);

        assert!(effects.is_empty());
        assert_eq!(rig.adapter.pending(), 0.0);
    }
}
