//! Actions returned from controller input handlers for the host to process.
//!
//! Controllers never mutate the overrides they are shown. Every intended
//! change comes back as an `Action`; the host merges it into the state it owns
//! and re-renders with the new snapshot.

#[cfg(test)]
#[path = "action_test.rs"]
mod action_test;

use serde::Serialize;

use crate::doc::{ElementId, LayoutPatch, OverlayPatch};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    /// Shallow-merge `fields` into the layout of `id`.
    ElementUpdated { id: ElementId, fields: LayoutPatch },
    /// Clear every override of `id` back to the default layout.
    ElementReset { id: ElementId },
    /// Store `id` as the single selected element (`None` clears it).
    SelectionChanged { id: Option<ElementId> },
    /// Shallow-merge `fields` into the overlay record.
    OverlayUpdated { fields: OverlayPatch },
    /// Remove the overlay from the active canvas size.
    OverlayDeleted,
    /// Change the pointer cursor.
    SetCursor { cursor: String },
    /// Purely visual state changed (hover, popup, tooltip).
    RenderNeeded,
}

impl Action {
    #[must_use]
    pub fn cursor(cursor: &str) -> Self {
        Self::SetCursor { cursor: cursor.to_owned() }
    }
}
