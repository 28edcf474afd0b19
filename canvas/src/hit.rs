//! Resize handles, constant-size editing chrome, and hit-testing.
//!
//! Chrome sizes are specified in screen pixels and converted to canvas pixels
//! through the inverse scale, so a handle is 10 screen pixels wide whether the
//! preview is shown at 25% or 200%.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::camera::{CanvasScale, Point, Rect};
use crate::consts::{
    BORDER_RADIUS_PX, BORDER_WIDTH_PX, DELETE_BUTTON_PX, HANDLE_HIT_SLOP_PX, HANDLE_SIZE_PX, RESET_BUTTON_OFFSET_PX,
    TOOLTIP_OFFSET_PX,
};
use crate::doc::ElementKind;

/// Which part of an element or overlay was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
    DeleteButton,
}

/// Anchor position for resize handles.
///
/// Named by the compass point the handle sits on; dragging it moves that
/// side and keeps the opposite side fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    pub const CORNERS: [ResizeAnchor; 4] = [Self::Nw, Self::Ne, Self::Sw, Self::Se];

    pub const ALL: [ResizeAnchor; 8] =
        [Self::Nw, Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W];

    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Se | Self::Sw | Self::Nw)
    }

    #[must_use]
    pub fn is_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    #[must_use]
    pub fn is_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    #[must_use]
    pub fn is_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    #[must_use]
    pub fn is_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// +1 when dragging right grows the box, -1 when dragging left does, 0 otherwise.
    #[must_use]
    pub fn horizontal_sign(self) -> f64 {
        if self.is_east() {
            1.0
        } else if self.is_west() {
            -1.0
        } else {
            0.0
        }
    }

    /// +1 when dragging down grows the box, -1 when dragging up does, 0 otherwise.
    #[must_use]
    pub fn vertical_sign(self) -> f64 {
        if self.is_south() {
            1.0
        } else if self.is_north() {
            -1.0
        } else {
            0.0
        }
    }

    /// Handle position as a fraction of the box: `(0 | 0.5 | 1, 0 | 0.5 | 1)`.
    #[must_use]
    pub fn unit_position(self) -> (f64, f64) {
        let x = if self.is_west() {
            0.0
        } else if self.is_east() {
            1.0
        } else {
            0.5
        };
        let y = if self.is_north() {
            0.0
        } else if self.is_south() {
            1.0
        } else {
            0.5
        };
        (x, y)
    }

    /// CSS cursor shown over this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }
}

/// Handles offered for an element kind: eight for images, four corners otherwise.
#[must_use]
pub fn handles_for(kind: ElementKind) -> &'static [ResizeAnchor] {
    match kind {
        ElementKind::Image => &ResizeAnchor::ALL,
        ElementKind::Text | ElementKind::Badge => &ResizeAnchor::CORNERS,
    }
}

/// Editing chrome dimensions, in canvas pixels, for one canvas scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chrome {
    pub handle: f64,
    pub border: f64,
    pub radius: f64,
    pub delete_button: f64,
    pub reset_offset: f64,
    pub tooltip_offset: f64,
    pub hit_slop: f64,
}

impl Chrome {
    #[must_use]
    pub fn for_scale(scale: CanvasScale) -> Self {
        Self {
            handle: scale.ui_px(HANDLE_SIZE_PX),
            border: scale.ui_px(BORDER_WIDTH_PX),
            radius: scale.ui_px(BORDER_RADIUS_PX),
            delete_button: scale.ui_px(DELETE_BUTTON_PX),
            reset_offset: scale.ui_px(RESET_BUTTON_OFFSET_PX),
            tooltip_offset: scale.ui_px(TOOLTIP_OFFSET_PX),
            hit_slop: scale.ui_px(HANDLE_HIT_SLOP_PX),
        }
    }

    /// Selection border drawn just outside the frame.
    #[must_use]
    pub fn border_rect(&self, frame: Rect) -> Rect {
        frame.inflate(self.border)
    }

    /// Square handle centered on the anchor's point of `frame`.
    #[must_use]
    pub fn handle_rect(&self, frame: Rect, anchor: ResizeAnchor) -> Rect {
        let (ux, uy) = anchor.unit_position();
        let cx = frame.x + frame.w * ux;
        let cy = frame.y + frame.h * uy;
        Rect::new(cx - self.handle / 2.0, cy - self.handle / 2.0, self.handle, self.handle)
    }

    /// Round delete button overhanging the top-right corner.
    #[must_use]
    pub fn delete_button_rect(&self, frame: Rect) -> Rect {
        let d = self.delete_button;
        Rect::new(frame.right() + d * 0.6 - d, frame.y - d * 0.6, d, d)
    }
}

/// Test which part of a frame (if any) is under the canvas-space point `pt`.
///
/// The delete button wins over handles, handles win over the body.
#[must_use]
pub fn hit_test(
    pt: Point,
    frame: Rect,
    scale: CanvasScale,
    handles: &[ResizeAnchor],
    delete_button: bool,
) -> Option<HitPart> {
    let chrome = Chrome::for_scale(scale);
    if delete_button && chrome.delete_button_rect(frame).contains(pt) {
        return Some(HitPart::DeleteButton);
    }
    for &anchor in handles {
        if chrome.handle_rect(frame, anchor).inflate(chrome.hit_slop).contains(pt) {
            return Some(HitPart::ResizeHandle(anchor));
        }
    }
    if frame.contains(pt) {
        return Some(HitPart::Body);
    }
    None
}
