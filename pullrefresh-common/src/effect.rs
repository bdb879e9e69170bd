//! Side effects requested by the gesture core
//!
//! The core never sleeps, spawns or touches the DOM. Operations return an
//! ordered [`Effects`] list and the host carries each entry out:
//! - `SuppressNative`: call `preventDefault` on the triggering event
//! - `StartRefresh`: run the refresh callback, then report back with
//!   [`PullController::refresh_settled`](crate::PullController::refresh_settled)
//! - `Schedule`/`Cancel`: arm or disarm the timer for a [`TimerSlot`]; a fired
//!   timer is reported with [`PullController::timer_fired`](crate::PullController::timer_fired)

use std::time::Duration;
use tracing::trace;

/// Independent timers the gesture can have armed at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Delay between refresh completion and indicator reset
    Settle,
    /// Wheel silence that stands in for a release
    WheelIdle,
}

/// Identifies one arming of a timer slot
///
/// Re-arming a slot issues a new token, so a late fire carrying an old token
/// is recognized as stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SuppressNative,
    StartRefresh,
    Schedule {
        slot: TimerSlot,
        token: TimerToken,
        delay: Duration,
    },
    Cancel(TimerSlot),
}

/// Ordered list of effects produced by one operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects(Vec<Effect>);

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.0.push(effect);
    }

    pub fn append(&mut self, mut other: Effects) {
        self.0.append(&mut other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Effect> {
        self.0.iter()
    }

    /// Whether the host should block the native scroll for this event
    pub fn suppresses_native(&self) -> bool {
        self.0.contains(&Effect::SuppressNative)
    }

    /// Whether a refresh must be started
    pub fn starts_refresh(&self) -> bool {
        self.0.contains(&Effect::StartRefresh)
    }

    /// Last schedule request for `slot`, if any
    pub fn scheduled(&self, slot: TimerSlot) -> Option<(TimerToken, Duration)> {
        self.0.iter().rev().find_map(|effect| match effect {
            Effect::Schedule {
                slot: s,
                token,
                delay,
            } if *s == slot => Some((*token, *delay)),
            _ => None,
        })
    }

    /// Whether `slot` is cancelled by these effects
    pub fn cancels(&self, slot: TimerSlot) -> bool {
        self.0.contains(&Effect::Cancel(slot))
    }
}

impl IntoIterator for Effects {
    type Item = Effect;
    type IntoIter = std::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Effects {
    type Item = &'a Effect;
    type IntoIter = std::slice::Iter<'a, Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Tracks the armed token of one timer slot
#[derive(Debug)]
pub(crate) struct TimerHandle {
    slot: TimerSlot,
    issued: u64,
    armed: Option<TimerToken>,
}

impl TimerHandle {
    pub(crate) fn new(slot: TimerSlot) -> Self {
        Self {
            slot,
            issued: 0,
            armed: None,
        }
    }

    /// Arm the slot, superseding any pending arming
    pub(crate) fn arm(&mut self, delay: Duration, effects: &mut Effects) -> TimerToken {
        self.issued += 1;
        let token = TimerToken(self.issued);
        self.armed = Some(token);
        effects.push(Effect::Schedule {
            slot: self.slot,
            token,
            delay,
        });
        token
    }

    pub(crate) fn cancel(&mut self, effects: &mut Effects) {
        if self.armed.take().is_some() {
            effects.push(Effect::Cancel(self.slot));
        }
    }

    /// Consume a fire; false when the token is stale
    pub(crate) fn fire(&mut self, token: TimerToken) -> bool {
        if self.armed == Some(token) {
            self.armed = None;
            true
        } else {
            trace!(slot = ?self.slot, token = token.get(), "Ignoring stale timer");
            false
        }
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}
