//! Input model: pointer and key events, and the gesture state machine.
//!
//! This module defines the types consumed by both controllers. `PointerEvent`
//! carries a monotonically increasing `EventId` so a controller can recognise
//! the very event that opened a selection or popup and refuse to treat it as
//! an outside click. `GestureState` is the active gesture being tracked
//! between pointer-down and pointer-up, carrying everything needed to compute
//! absolute layout values from the pointer's total travel.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::MIN_ASPECT_DENOMINATOR;
use crate::hit::ResizeAnchor;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Host-assigned, strictly increasing event sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl EventId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// A pointer event in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub id: EventId,
    pub screen: Point,
    pub button: Button,
}

impl PointerEvent {
    #[must_use]
    pub fn new(id: EventId, screen: Point) -> Self {
        Self { id, screen, button: Button::Primary }
    }

    #[must_use]
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }
}

/// A keyboard key, as named by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Delete or Backspace.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete" || self.0 == "Backspace"
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Where keyboard focus sits when a key arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Focus {
    /// The canvas or some non-editable element.
    #[default]
    Canvas,
    /// A text input, textarea or select; editing keys belong to it.
    TextInput,
}

/// Gesture-start snapshot shared by every resize semantic.
///
/// Captured once on pointer-down and never re-read from props mid-gesture, so
/// each move computes from the same baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStart {
    /// Overlay `(x, y)` or element `(offsetX, offsetY)` at gesture start.
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub scale: f64,
    /// `width / height`, with the height floored at 1.
    pub aspect: f64,
}

impl ResizeStart {
    #[must_use]
    pub fn new(origin: Point, width: f64, height: f64, font_size: f64, scale: f64) -> Self {
        Self { origin, width, height, font_size, scale, aspect: aspect_ratio(width, height) }
    }
}

/// Guarded `w / h`: neither side may drop below 1, so the ratio stays finite and nonzero.
#[must_use]
pub fn aspect_ratio(width: f64, height: f64) -> f64 {
    width.max(MIN_ASPECT_DENOMINATOR) / height.max(MIN_ASPECT_DENOMINATOR)
}

/// Internal state for the gesture state machine.
///
/// `Idle → Dragging → Idle` and `Idle → Resizing → Idle`; there is no
/// transition between the two active states.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The element or overlay follows the pointer.
    Dragging {
        /// Screen position of the pointer-down that started the drag.
        start_screen: Point,
        /// Position or offset at the start of the drag.
        origin: Point,
    },
    /// A handle is being dragged.
    Resizing {
        /// Screen position of the pointer-down that started the resize.
        start_screen: Point,
        /// Which corner/edge handle is being dragged.
        anchor: ResizeAnchor,
        start: ResizeStart,
    },
}

impl GestureState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    #[must_use]
    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing { .. })
    }
}

/// Outside-click guard for a selection or popup.
///
/// Remembers the event that armed it; that same event can never dismiss it,
/// and neither can any event that was issued before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dismissal {
    armed_by: Option<EventId>,
}

impl Dismissal {
    /// Arm the guard with the event that opened the selection or popup.
    pub fn arm(&mut self, by: EventId) {
        self.armed_by = Some(by);
    }

    pub fn disarm(&mut self) {
        self.armed_by = None;
    }

    /// Whether a pointer-down outside the target should close it.
    #[must_use]
    pub fn dismisses(&self, event: EventId) -> bool {
        self.armed_by.is_some_and(|armed| event > armed)
    }
}
