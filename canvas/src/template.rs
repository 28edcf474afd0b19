//! Template element controller: drag and resize for the named template slots.
//!
//! One controller instance per slot. Each slot has a fixed [`ElementKind`]
//! that decides what a handle drag means: images change width/height, text
//! changes font size, badges change a uniform scale. Drags are never clamped;
//! the template absorbs overflow.
//!
//! The same layout math drives both modes. With `interactive == false` the
//! controller produces a bare translate and ignores every input, which is the
//! path export and the read-only preview take.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use tracing::{debug, trace};

use crate::action::Action;
use crate::camera::{CanvasScale, Point, Rect};
use crate::consts::{
    FALLBACK_FONT_SIZE, FALLBACK_IMAGE_SIZE, FONT_SIZE_MAX, FONT_SIZE_MIN, FONT_SIZE_PER_PX, IMAGE_MIN_SIZE,
    SCALE_MAX, SCALE_MIN, SCALE_PER_PX, SELECTED_Z_INDEX,
};
use crate::doc::{ElementId, ElementKind, ElementLayout, LayoutPatch};
use crate::hit::{Chrome, ResizeAnchor, handles_for};
use crate::input::{Button, Dismissal, GestureState, PointerEvent, ResizeStart};

/// Fallbacks for a resize that starts before any override exists.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizeDefaults {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub font_size: Option<f64>,
}

/// Everything the host passes in on each call.
#[derive(Debug, Clone, Copy)]
pub struct ElementProps<'a> {
    pub id: ElementId,
    pub layout: &'a ElementLayout,
    /// The element's box at zero offset, in canvas pixels.
    pub frame: Rect,
    pub scale: CanvasScale,
    pub interactive: bool,
    /// Whether the host's single selection currently points at this element.
    pub selected: bool,
    pub defaults: ResizeDefaults,
}

impl ElementProps<'_> {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.id.kind()
    }

    /// The frame moved by the current offset.
    #[must_use]
    pub fn placed_frame(&self) -> Rect {
        let o = self.layout.offset();
        Rect::new(self.frame.x + o.x, self.frame.y + o.y, self.frame.w, self.frame.h)
    }

    fn resize_start(&self) -> ResizeStart {
        let width = self.layout.width().or(self.defaults.width).unwrap_or(FALLBACK_IMAGE_SIZE);
        let height = self.layout.height().or(self.defaults.height).unwrap_or(FALLBACK_IMAGE_SIZE);
        let font_size = self.layout.font_size().or(self.defaults.font_size).unwrap_or(FALLBACK_FONT_SIZE);
        let scale = self.layout.scale().unwrap_or(1.0);
        ResizeStart::new(self.layout.offset(), width, height, font_size, scale)
    }
}

// =============================================================
// Resize semantics
// =============================================================

/// Signed handle travel for single-value resizes.
///
/// The dominant axis wins; each axis is flipped for handles on the
/// left/top so dragging away from the element always grows it.
fn scalar_delta(anchor: ResizeAnchor, d: Point) -> f64 {
    let sx = anchor.horizontal_sign();
    let sy = anchor.vertical_sign();
    if sy == 0.0 || (sx != 0.0 && d.x.abs() > d.y.abs()) { sx * d.x } else { sy * d.y }
}

/// Width/height resize for an image element.
///
/// Corner handles keep the start aspect ratio and pin the opposite corner by
/// shifting the offset. Edge handles stretch one axis and pin the opposite
/// edge. Neither side drops below 50.
#[must_use]
pub fn resize_image(start: &ResizeStart, anchor: ResizeAnchor, d: Point) -> LayoutPatch {
    let (w, h) = if anchor.is_corner() {
        let ratio = start.aspect;
        let grow = if d.x.abs() > d.y.abs() {
            anchor.horizontal_sign() * d.x
        } else {
            anchor.vertical_sign() * d.y * ratio
        };
        let min_w = IMAGE_MIN_SIZE.max(IMAGE_MIN_SIZE * ratio);
        let w = (start.width + grow).max(min_w);
        (w, w / ratio)
    } else {
        let w = (start.width + anchor.horizontal_sign() * d.x).max(IMAGE_MIN_SIZE);
        let h = (start.height + anchor.vertical_sign() * d.y).max(IMAGE_MIN_SIZE);
        (w, h)
    };
    let x = if anchor.is_west() { start.origin.x - (w - start.width) } else { start.origin.x };
    let y = if anchor.is_north() { start.origin.y - (h - start.height) } else { start.origin.y };
    LayoutPatch::size(w, h).with_offset_x(x).with_offset_y(y)
}

/// Font-size resize for a text element: half a point per canvas pixel.
#[must_use]
pub fn resize_text(start: &ResizeStart, anchor: ResizeAnchor, d: Point) -> LayoutPatch {
    let size = (start.font_size + scalar_delta(anchor, d) * FONT_SIZE_PER_PX).max(FONT_SIZE_MIN).min(FONT_SIZE_MAX);
    LayoutPatch::font_size(size)
}

/// Uniform-scale resize for a badge element.
#[must_use]
pub fn resize_badge(start: &ResizeStart, anchor: ResizeAnchor, d: Point) -> LayoutPatch {
    let scale = (start.scale + scalar_delta(anchor, d) * SCALE_PER_PX).max(SCALE_MIN).min(SCALE_MAX);
    LayoutPatch::scale(scale)
}

/// Dispatch a resize to the semantic of `kind`.
#[must_use]
pub fn resize_element(kind: ElementKind, start: &ResizeStart, anchor: ResizeAnchor, d: Point) -> LayoutPatch {
    match kind {
        ElementKind::Image => resize_image(start, anchor, d),
        ElementKind::Text => resize_text(start, anchor, d),
        ElementKind::Badge => resize_badge(start, anchor, d),
    }
}

// =============================================================
// View
// =============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ElementChrome {
    pub border: Rect,
    pub border_width: f64,
    pub radius: f64,
    /// Present only while selected.
    pub handles: Vec<(ResizeAnchor, Rect)>,
    /// Bottom-left of the Reset button, shown while selected with overrides.
    pub reset_button: Option<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementView {
    /// Export and preview: a bare translate, nothing else.
    Static { translate: Point },
    Interactive {
        translate: Point,
        frame: Rect,
        z_index: Option<i32>,
        cursor: &'static str,
        chrome: Option<ElementChrome>,
    },
}

impl ElementView {
    #[must_use]
    pub fn translate(&self) -> Point {
        match self {
            Self::Static { translate } | Self::Interactive { translate, .. } => *translate,
        }
    }
}

// =============================================================
// Controller
// =============================================================

/// Transient interaction state for one template slot.
#[derive(Debug, Clone, Default)]
pub struct ElementController {
    gesture: GestureState,
    hovered: bool,
    selection: Dismissal,
}

impl ElementController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    /// Drop any gesture in flight and the hover state, e.g. when the active
    /// canvas size changes and no pointer-leave will follow.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    pub fn on_pointer_enter(&mut self, props: &ElementProps<'_>) -> Vec<Action> {
        if !props.interactive {
            return Vec::new();
        }
        self.hovered = true;
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_leave(&mut self, props: &ElementProps<'_>) -> Vec<Action> {
        if !props.interactive || !self.gesture.is_idle() {
            return Vec::new();
        }
        self.hovered = false;
        vec![Action::RenderNeeded]
    }

    /// Press on the element body: select it and start a drag.
    pub fn on_pointer_down(&mut self, props: &ElementProps<'_>, ev: &PointerEvent) -> Vec<Action> {
        if !props.interactive || !self.gesture.is_idle() || ev.button != Button::Primary {
            return Vec::new();
        }
        let origin = props.layout.offset();
        self.gesture = GestureState::Dragging { start_screen: ev.screen, origin };
        self.selection.arm(ev.id);
        debug!(element = %props.id, x = origin.x, y = origin.y, "element: drag start");
        vec![Action::SelectionChanged { id: Some(props.id) }, Action::cursor("grabbing")]
    }

    /// Press on a resize handle. Handles the kind does not offer are ignored.
    pub fn on_handle_pointer_down(
        &mut self,
        props: &ElementProps<'_>,
        anchor: ResizeAnchor,
        ev: &PointerEvent,
    ) -> Vec<Action> {
        if !props.interactive || !self.gesture.is_idle() || !handles_for(props.kind()).contains(&anchor) {
            return Vec::new();
        }
        let start = props.resize_start();
        self.gesture = GestureState::Resizing { start_screen: ev.screen, anchor, start };
        self.selection.arm(ev.id);
        debug!(element = %props.id, anchor = anchor.as_str(), "element: resize start");
        vec![Action::SelectionChanged { id: Some(props.id) }, Action::cursor(anchor.cursor())]
    }

    pub fn on_pointer_move(&mut self, props: &ElementProps<'_>, ev: &PointerEvent) -> Vec<Action> {
        let fields = match self.gesture {
            GestureState::Idle => return Vec::new(),
            GestureState::Dragging { start_screen, origin } => {
                let pos = origin + props.scale.screen_delta_to_canvas(start_screen, ev.screen);
                LayoutPatch::offset(pos.x, pos.y)
            }
            GestureState::Resizing { start_screen, anchor, start } => {
                let d = props.scale.screen_delta_to_canvas(start_screen, ev.screen);
                resize_element(props.kind(), &start, anchor, d)
            }
        };
        trace!(element = %props.id, ?fields, "element: update");
        vec![Action::ElementUpdated { id: props.id, fields }]
    }

    pub fn on_pointer_up(&mut self, props: &ElementProps<'_>) -> Vec<Action> {
        if self.gesture.is_idle() {
            return Vec::new();
        }
        debug!(element = %props.id, resized = self.gesture.is_resizing(), "element: gesture end");
        self.gesture = GestureState::Idle;
        vec![Action::cursor("grab"), Action::RenderNeeded]
    }

    /// A pointer-down outside this element. Deselects, unless it is the very
    /// event that selected it.
    pub fn on_outside_pointer_down(&mut self, props: &ElementProps<'_>, ev: &PointerEvent) -> Vec<Action> {
        if !props.interactive || !props.selected || !self.selection.dismisses(ev.id) {
            return Vec::new();
        }
        self.selection.disarm();
        debug!(element = %props.id, "element: deselect on outside click");
        vec![Action::SelectionChanged { id: None }]
    }

    /// Reset button. Nothing to emit when the layout is already the default.
    pub fn on_reset(&mut self, props: &ElementProps<'_>) -> Vec<Action> {
        if !props.interactive || props.layout.is_default() {
            return Vec::new();
        }
        debug!(element = %props.id, "element: reset");
        vec![Action::ElementReset { id: props.id }]
    }

    #[must_use]
    pub fn view(&self, props: &ElementProps<'_>) -> ElementView {
        let translate = props.layout.offset();
        if !props.interactive {
            return ElementView::Static { translate };
        }
        let frame = props.placed_frame();
        let chrome = (props.selected || self.hovered).then(|| {
            let c = Chrome::for_scale(props.scale);
            let handles = if props.selected {
                handles_for(props.kind()).iter().map(|&a| (a, c.handle_rect(frame, a))).collect()
            } else {
                Vec::new()
            };
            let reset_button = (props.selected && !props.layout.is_default())
                .then(|| Point::new(frame.x, frame.y - c.reset_offset));
            ElementChrome { border: c.border_rect(frame), border_width: c.border, radius: c.radius, handles, reset_button }
        });
        ElementView::Interactive {
            translate,
            frame,
            z_index: props.selected.then_some(SELECTED_Z_INDEX),
            cursor: if self.gesture.is_dragging() { "grabbing" } else { "grab" },
            chrome,
        }
    }
}
