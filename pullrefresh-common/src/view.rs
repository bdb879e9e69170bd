//! Snapshot read by the renderer after every state change

use serde::Serialize;

use crate::DEFAULT_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PullView {
    /// Resistance-adjusted offset of the indicator and content
    pub pull_distance: f64,
    pub is_pulling: bool,
    pub is_refreshing: bool,
    /// A press drag is active; renderers drop their transitions meanwhile
    pub is_dragging: bool,
    pub threshold: f64,
}

impl Default for PullView {
    fn default() -> Self {
        Self {
            pull_distance: 0.0,
            is_pulling: false,
            is_refreshing: false,
            is_dragging: false,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl PullView {
    /// Releasing now would start a refresh
    pub fn is_armed(&self) -> bool {
        self.pull_distance >= self.threshold
    }

    /// Fraction of the threshold covered, capped at 1
    pub fn progress(&self) -> f64 {
        (self.pull_distance / self.threshold).clamp(0.0, 1.0)
    }

    /// Whether the indicator should be drawn at all
    pub fn is_visible(&self) -> bool {
        self.is_refreshing || self.pull_distance > 0.0
    }

    pub fn label(&self) -> &'static str {
        if self.is_refreshing {
            "Refreshing..."
        } else if self.is_armed() {
            "Release to refresh"
        } else {
            "Pull to refresh"
        }
    }
}
