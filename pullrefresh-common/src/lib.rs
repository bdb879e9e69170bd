//! Platform-independent pull-to-refresh gesture core shared by the mobile UI
//!
//! Touch, mouse and wheel input are normalized by the adapters into one pull
//! gesture driven by [`PullSession`]. Nothing in this crate touches a clock,
//! a timer or an executor: every operation returns [`Effects`] that the host
//! (see `pullrefresh-mobile`) carries out.

pub mod adapters;
pub mod config;
pub mod controller;
pub mod effect;
pub mod probe;
pub mod session;
pub mod view;

use serde::{Deserialize, Serialize};

pub use adapters::{MouseAdapter, MouseInput, PullEvent, TouchAdapter, TouchInput, WheelAdapter, WheelInput};
pub use config::{PullConfig, PullTuning, DEFAULT_THRESHOLD};
pub use controller::PullController;
pub use effect::{Effect, Effects, TimerSlot, TimerToken};
pub use probe::{Overflow, ScrollNode, ScrollProbe};
pub use session::PullSession;
pub use view::PullView;

/// Phase of the pull gesture
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GestureState {
    /// No active press and nothing in flight
    #[default]
    Idle,
    /// Press active, no qualifying downward pull yet
    Dragging,
    /// Downward pull recognized, indicator visible
    Pulling,
    /// Refresh callback in flight or external loading active
    Refreshing,
}

impl std::fmt::Display for GestureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Dragging => write!(f, "dragging"),
            Self::Pulling => write!(f, "pulling"),
            Self::Refreshing => write!(f, "refreshing"),
        }
    }
}

/// Configuration and setup errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a refresh callback
///
/// The gesture only uses it for logging; the settle-and-reset path is the same
/// for success and failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefreshError {
    #[error("Refresh failed: {0}")]
    Failed(String),

    #[error("Refresh aborted")]
    Aborted,
}

/// Result a refresh callback resolves to
pub type RefreshOutcome = std::result::Result<(), RefreshError>;
