//! Mouse adapter
//!
//! Mouse moves fire constantly, so they are only forwarded while a drag is
//! active. Leaving the container counts as releasing the button; otherwise a
//! cursor that exits mid-drag would leave the gesture stuck.

use super::PullEvent;

/// `MouseEvent.button` of the main button
pub const PRIMARY_BUTTON: i16 = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    /// `clientY` of the cursor
    pub y: f64,
    pub button: i16,
    pub cancelable: bool,
}

impl MouseInput {
    pub fn primary(y: f64) -> Self {
        Self {
            y,
            button: PRIMARY_BUTTON,
            cancelable: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MouseAdapter;

impl MouseAdapter {
    pub fn down<T>(&self, input: &MouseInput, target: T) -> Option<PullEvent<T>> {
        (input.button == PRIMARY_BUTTON).then(|| PullEvent::Start { y: input.y, target })
    }

    pub fn moved<T>(&self, input: &MouseInput, drag_active: bool) -> Option<PullEvent<T>> {
        drag_active.then(|| PullEvent::Move {
            y: input.y,
            cancelable: input.cancelable,
        })
    }

    pub fn up<T>(&self) -> PullEvent<T> {
        PullEvent::End
    }

    pub fn leave<T>(&self) -> PullEvent<T> {
        PullEvent::End
    }
}
