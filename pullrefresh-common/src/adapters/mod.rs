//! Input adapters
//!
//! Each adapter turns one native input stream into the session's event
//! vocabulary. Touch and mouse are stateless translators; the wheel adapter
//! keeps its own accumulator and inactivity timer because wheel hardware has
//! no press or release.

pub mod mouse;
pub mod touch;
pub mod wheel;

pub use mouse::{MouseAdapter, MouseInput, PRIMARY_BUTTON};
pub use touch::{TouchAdapter, TouchInput};
pub use wheel::{WheelAdapter, WheelInput};

/// Normalized gesture event
#[derive(Debug, Clone, PartialEq)]
pub enum PullEvent<T> {
    Start { y: f64, target: T },
    Move { y: f64, cancelable: bool },
    End,
}
