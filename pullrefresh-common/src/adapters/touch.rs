//! Touch adapter

use super::PullEvent;

/// Fields of a touch event the gesture reads
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchInput {
    /// `clientY` of the first active touch point
    pub first_y: Option<f64>,
    pub cancelable: bool,
}

impl TouchInput {
    pub fn at(y: f64) -> Self {
        Self {
            first_y: Some(y),
            cancelable: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TouchAdapter;

impl TouchAdapter {
    /// `touchstart` with no touch point yields nothing
    pub fn start<T>(&self, input: &TouchInput, target: T) -> Option<PullEvent<T>> {
        input.first_y.map(|y| PullEvent::Start { y, target })
    }

    pub fn moved<T>(&self, input: &TouchInput) -> Option<PullEvent<T>> {
        input.first_y.map(|y| PullEvent::Move {
            y,
            cancelable: input.cancelable,
        })
    }

    /// `touchend` carries no usable coordinate and always ends the gesture
    pub fn end<T>(&self) -> PullEvent<T> {
        PullEvent::End
    }

    /// `touchcancel` behaves like `touchend`
    pub fn cancel<T>(&self) -> PullEvent<T> {
        PullEvent::End
    }
}
