//! Input model: touch samples and the gesture dispatcher's state machine.
//!
//! The host delivers one batch of [`Touch`] samples per touch-move callback for
//! the sticker under the user's fingers. `InputState` is the interaction being
//! tracked between touch-down and release; it holds only the engaged sticker's
//! id, never a copy of the sticker.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::ObjectId;
use crate::geom::Point;

/// One finger in a touch-move batch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Touch {
    /// Absolute position of the finger (page or canvas space; only differences
    /// between fingers are used).
    pub point: Point,
    /// Horizontal displacement since the previous frame.
    pub dx: f64,
    /// Vertical displacement since the previous frame.
    pub dy: f64,
}

impl Touch {
    /// A touch at `(x, y)` with no frame displacement.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self { point: Point::new(x, y), dx: 0.0, dy: 0.0 }
    }

    /// A touch carrying only a frame displacement.
    #[must_use]
    pub fn drag(dx: f64, dy: f64) -> Self {
        Self { point: Point::default(), dx, dy }
    }
}

/// How an engaged gesture is currently being interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureMode {
    /// Touch-down seen, no move yet.
    #[default]
    Pending,
    /// One finger is dragging the sticker.
    Single,
    /// Two fingers are pinching/rotating the sticker.
    Multi,
}

impl GestureMode {
    /// Mode implied by a move batch with `count` touches, if it is one we handle.
    #[must_use]
    pub fn for_touch_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::Single),
            2 => Some(Self::Multi),
            _ => None,
        }
    }
}

/// Internal state for the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next touch-down.
    #[default]
    Idle,
    /// A sticker is being manipulated.
    Engaged {
        /// Id of the sticker under the user's fingers.
        id: ObjectId,
        /// How the latest move batch was interpreted.
        mode: GestureMode,
    },
}

impl InputState {
    /// Id of the engaged sticker, if any.
    #[must_use]
    pub fn engaged_id(&self) -> Option<ObjectId> {
        match self {
            Self::Idle => None,
            Self::Engaged { id, .. } => Some(*id),
        }
    }

    /// Whether no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
