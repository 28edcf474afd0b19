//! Freeform overlay controller: one placed character image per canvas size.
//!
//! The controller turns pointer gestures into absolute rectangles for the
//! overlay, clamps drags so at least half the image stays on the canvas, keeps
//! the aspect ratio on corner resizes, and owns the two fixed-position popups
//! (front/back context menu and quick-swap palette). It holds only transient
//! gesture and UI state; the record itself belongs to the host and arrives as
//! a fresh snapshot on every call.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use tracing::{debug, trace};

use crate::action::Action;
use crate::camera::{CanvasScale, Point, Rect, Size};
use crate::consts::{
    DEFAULT_OVERLAY_SIZE, OVERLAY_MIN_WIDTH, OVERLAY_OVERHANG, QUICK_SWAP_COLUMNS, QUICK_SWAP_OFFSET_X,
    QUICK_SWAP_OFFSET_Y,
};
use crate::doc::{OverlayPatch, OverlayPosition, OverlayRecord, ZOrder};
use crate::hit::{Chrome, ResizeAnchor};
use crate::input::{Button, Dismissal, Focus, GestureState, Key, PointerEvent, ResizeStart};
use crate::manifest::{ExpressionAsset, ExpressionLookup};

/// Everything the host passes in on each call.
#[derive(Debug, Clone, Copy)]
pub struct OverlayProps<'a> {
    pub record: &'a OverlayRecord,
    pub canvas: Size,
    pub scale: CanvasScale,
}

// =============================================================
// Geometry
// =============================================================

/// The overlay's current rectangle.
///
/// An explicit rectangle on the record always wins. Otherwise a square of the
/// record's size (default 350) sits flush with the bottom edge: left-aligned,
/// right-aligned, or centered.
#[must_use]
pub fn initial_bounds(record: &OverlayRecord, canvas: Size) -> Rect {
    if let Some(rect) = record.rect() {
        return rect;
    }
    let s = record.size.filter(|s| *s > 0.0).unwrap_or(DEFAULT_OVERLAY_SIZE);
    let y = canvas.height - s;
    let x = match record.position {
        OverlayPosition::Left => 0.0,
        OverlayPosition::Bottom => (canvas.width - s) / 2.0,
        OverlayPosition::Right => canvas.width - s,
    };
    Rect::new(x, y, s, s)
}

/// Clamp a dragged position so the overlay may hang at most half its size
/// past any canvas edge.
#[must_use]
pub fn clamp_position(pos: Point, w: f64, h: f64, canvas: Size) -> Point {
    let x = pos.x.min(canvas.width - w * OVERLAY_OVERHANG).max(-w * OVERLAY_OVERHANG);
    let y = pos.y.min(canvas.height - h * OVERLAY_OVERHANG).max(-h * OVERLAY_OVERHANG);
    Point::new(x, y)
}

/// Aspect-locked resize from one handle.
///
/// The dominant axis of travel drives the new width; vertical travel is
/// converted to width through the aspect ratio. Width is clamped to
/// `[100, canvas_width]`, height follows from the ratio, and the corner
/// opposite `anchor` stays fixed.
#[must_use]
pub fn resize_overlay(start: &ResizeStart, anchor: ResizeAnchor, delta: Point, canvas_width: f64) -> Rect {
    let ratio = start.aspect;
    let grow = if delta.x.abs() > delta.y.abs() {
        anchor.horizontal_sign() * delta.x
    } else {
        anchor.vertical_sign() * delta.y * ratio
    };
    let w = (start.width + grow).min(canvas_width).max(OVERLAY_MIN_WIDTH);
    let h = w / ratio;
    let x = if anchor.is_west() { start.origin.x + start.width - w } else { start.origin.x };
    let y = if anchor.is_north() { start.origin.y + start.height - h } else { start.origin.y };
    Rect::new(x, y, w, h)
}

// =============================================================
// Popups
// =============================================================

/// One row of the front/back context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub z_order: ZOrder,
    pub enabled: bool,
}

/// Menu rows for an overlay currently at `current`. The row for the level it
/// is already at is disabled.
#[must_use]
pub fn context_menu_items(current: ZOrder) -> [MenuItem; 2] {
    [
        MenuItem { label: "Bring to Front", z_order: ZOrder::Front, enabled: current != ZOrder::Front },
        MenuItem { label: "Send to Back", z_order: ZOrder::Back, enabled: current != ZOrder::Back },
    ]
}

/// One tile of the quick-swap palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOption {
    pub asset: ExpressionAsset,
    /// The overlay is already showing this image.
    pub is_current: bool,
}

/// Alternate images for the overlay's person, in manifest order.
#[must_use]
pub fn quick_swap_options(record: &OverlayRecord, lookup: &dyn ExpressionLookup) -> Vec<SwapOption> {
    lookup
        .expressions(record.person_key())
        .into_iter()
        .map(|asset| {
            let is_current = asset.image == record.image;
            SwapOption { asset, is_current }
        })
        .collect()
}

/// An open popup. Positions are fixed screen coordinates, outside any
/// clipping container.
#[derive(Debug, Clone, PartialEq)]
pub enum Popup {
    ContextMenu { at: Point },
    QuickSwap { at: Point, options: Vec<SwapOption> },
}

// =============================================================
// View
// =============================================================

/// Handles, border and delete button, in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayChrome {
    pub border: Rect,
    pub border_width: f64,
    pub radius: f64,
    pub handles: Vec<(ResizeAnchor, Rect)>,
    /// Hidden while a gesture is in progress.
    pub delete_button: Option<Rect>,
}

/// Live `W × H` readout shown under the overlay during a resize.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    /// Top-center of the tooltip, in canvas pixels.
    pub anchor: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupView {
    ContextMenu { at: Point, items: [MenuItem; 2] },
    QuickSwap { at: Point, columns: usize, options: Vec<SwapOption> },
}

/// What the host should draw for the overlay this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub frame: Rect,
    pub image: String,
    pub z_index: i32,
    pub cursor: &'static str,
    pub chrome: Option<OverlayChrome>,
    pub tooltip: Option<Tooltip>,
    pub popup: Option<PopupView>,
}

// =============================================================
// Controller
// =============================================================

/// Transient interaction state for the overlay of the active canvas size.
#[derive(Debug, Clone, Default)]
pub struct OverlayController {
    gesture: GestureState,
    hovered: bool,
    selected: bool,
    selection: Dismissal,
    popup: Option<Popup>,
    popup_guard: Dismissal,
    resize_dims: Option<(f64, f64)>,
}

impl OverlayController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    #[must_use]
    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[must_use]
    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Forget all transient state, e.g. when the overlay is removed.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // --- Hover ---

    pub fn on_pointer_enter(&mut self) -> Vec<Action> {
        self.hovered = true;
        vec![Action::RenderNeeded]
    }

    /// Hover survives leaving the frame while a gesture is still running.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        if !self.gesture.is_idle() {
            return Vec::new();
        }
        self.hovered = false;
        vec![Action::RenderNeeded]
    }

    // --- Gestures ---

    /// Primary press on the image body: select and start dragging.
    pub fn on_body_pointer_down(&mut self, props: &OverlayProps<'_>, ev: &PointerEvent) -> Vec<Action> {
        if self.gesture.is_resizing() || ev.button != Button::Primary {
            return Vec::new();
        }
        let bounds = initial_bounds(props.record, props.canvas);
        self.gesture = GestureState::Dragging { start_screen: ev.screen, origin: bounds.origin() };
        self.select(ev);
        self.close_popup();
        debug!(x = bounds.x, y = bounds.y, "overlay: drag start");
        vec![Action::cursor("grabbing"), Action::RenderNeeded]
    }

    /// Press on a corner handle: select and start an aspect-locked resize.
    pub fn on_handle_pointer_down(
        &mut self,
        props: &OverlayProps<'_>,
        anchor: ResizeAnchor,
        ev: &PointerEvent,
    ) -> Vec<Action> {
        if !self.gesture.is_idle() {
            return Vec::new();
        }
        let bounds = initial_bounds(props.record, props.canvas);
        let start = ResizeStart::new(bounds.origin(), bounds.w, bounds.h, 0.0, 1.0);
        self.gesture = GestureState::Resizing { start_screen: ev.screen, anchor, start };
        self.select(ev);
        self.close_popup();
        debug!(anchor = anchor.as_str(), w = bounds.w, h = bounds.h, "overlay: resize start");
        vec![Action::cursor(anchor.cursor()), Action::RenderNeeded]
    }

    pub fn on_pointer_move(&mut self, props: &OverlayProps<'_>, ev: &PointerEvent) -> Vec<Action> {
        match self.gesture {
            GestureState::Idle => Vec::new(),
            GestureState::Dragging { start_screen, origin } => {
                let bounds = initial_bounds(props.record, props.canvas);
                let d = props.scale.screen_delta_to_canvas(start_screen, ev.screen);
                let pos = clamp_position(origin + d, bounds.w, bounds.h, props.canvas);
                trace!(x = pos.x, y = pos.y, "overlay: drag");
                vec![Action::OverlayUpdated {
                    fields: OverlayPatch { rect: Some(Rect::new(pos.x, pos.y, bounds.w, bounds.h)), ..OverlayPatch::default() },
                }]
            }
            GestureState::Resizing { start_screen, anchor, start } => {
                let d = props.scale.screen_delta_to_canvas(start_screen, ev.screen);
                let rect = resize_overlay(&start, anchor, d, props.canvas.width);
                self.resize_dims = Some((rect.w.round(), rect.h.round()));
                trace!(w = rect.w, h = rect.h, "overlay: resize");
                vec![Action::OverlayUpdated { fields: OverlayPatch { rect: Some(rect), ..OverlayPatch::default() } }]
            }
        }
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if self.gesture.is_idle() {
            return Vec::new();
        }
        debug!(resized = self.gesture.is_resizing(), "overlay: gesture end");
        self.gesture = GestureState::Idle;
        self.resize_dims = None;
        vec![Action::cursor("crosshair"), Action::RenderNeeded]
    }

    /// A pointer-down that landed outside both the overlay and any popup.
    ///
    /// An open popup absorbs it and closes; otherwise the overlay deselects.
    /// The event that opened the popup or selection is never treated as outside.
    pub fn on_outside_pointer_down(&mut self, ev: &PointerEvent) -> Vec<Action> {
        if self.popup.is_some() {
            if !self.popup_guard.dismisses(ev.id) {
                return Vec::new();
            }
            self.close_popup();
            return vec![Action::RenderNeeded];
        }
        if !self.selected || !self.selection.dismisses(ev.id) {
            return Vec::new();
        }
        self.deselect();
        vec![Action::RenderNeeded]
    }

    // --- Popups ---

    /// Right-click: select and open the front/back menu at the cursor.
    pub fn on_context_menu(&mut self, ev: &PointerEvent) -> Vec<Action> {
        self.select(ev);
        self.open_popup(Popup::ContextMenu { at: ev.screen }, ev);
        debug!("overlay: context menu open");
        vec![Action::RenderNeeded]
    }

    /// Double-click: select and open the quick-swap palette, if the person
    /// has any alternate expressions.
    pub fn on_double_click(
        &mut self,
        props: &OverlayProps<'_>,
        ev: &PointerEvent,
        lookup: &dyn ExpressionLookup,
    ) -> Vec<Action> {
        self.select(ev);
        self.close_popup();
        let options = quick_swap_options(props.record, lookup);
        if options.is_empty() {
            debug!(person = props.record.person_key(), "overlay: no expressions to swap");
            return vec![Action::RenderNeeded];
        }
        self.open_popup(Popup::QuickSwap { at: ev.screen, options }, ev);
        debug!("overlay: quick swap open");
        vec![Action::RenderNeeded]
    }

    /// Pick a context-menu row. Disabled rows do nothing and keep the menu open.
    pub fn choose_z_order(&mut self, props: &OverlayProps<'_>, z_order: ZOrder) -> Vec<Action> {
        if !matches!(self.popup, Some(Popup::ContextMenu { .. })) {
            return Vec::new();
        }
        let enabled = context_menu_items(props.record.z_order)
            .iter()
            .any(|item| item.z_order == z_order && item.enabled);
        if !enabled {
            return Vec::new();
        }
        self.close_popup();
        vec![Action::OverlayUpdated { fields: OverlayPatch { z_order: Some(z_order), ..OverlayPatch::default() } }]
    }

    /// Pick a quick-swap tile. Position and size are left untouched.
    pub fn choose_expression(&mut self, expression_id: &str) -> Vec<Action> {
        let Some(Popup::QuickSwap { options, .. }) = &self.popup else {
            return Vec::new();
        };
        let Some(option) = options.iter().find(|o| o.asset.expression_id == expression_id) else {
            return Vec::new();
        };
        let fields = OverlayPatch {
            image: Some(option.asset.image.clone()),
            expression_id: Some(option.asset.expression_id.clone()),
            ..OverlayPatch::default()
        };
        self.close_popup();
        vec![Action::OverlayUpdated { fields }]
    }

    // --- Delete ---

    pub fn on_delete_clicked(&mut self) -> Vec<Action> {
        self.clear();
        vec![Action::OverlayDeleted]
    }

    /// Delete/Backspace removes a selected overlay unless a text field has
    /// focus. Escape closes an open popup.
    pub fn on_key_down(&mut self, key: &Key, focus: Focus) -> Vec<Action> {
        if key.is_escape() && self.popup.is_some() {
            self.close_popup();
            return vec![Action::RenderNeeded];
        }
        if !self.selected || focus == Focus::TextInput || !key.is_delete() {
            return Vec::new();
        }
        debug!(key = %key.0, "overlay: delete via keyboard");
        self.on_delete_clicked()
    }

    // --- View ---

    #[must_use]
    pub fn view(&self, props: &OverlayProps<'_>) -> OverlayView {
        let frame = initial_bounds(props.record, props.canvas);
        let gesturing = !self.gesture.is_idle();
        let chrome = (self.selected || self.hovered).then(|| {
            let c = Chrome::for_scale(props.scale);
            OverlayChrome {
                border: c.border_rect(frame),
                border_width: c.border,
                radius: c.radius,
                handles: ResizeAnchor::CORNERS.iter().map(|&a| (a, c.handle_rect(frame, a))).collect(),
                delete_button: (!gesturing).then(|| c.delete_button_rect(frame)),
            }
        });
        let tooltip = match (self.gesture.is_resizing(), self.resize_dims) {
            (true, Some((w, h))) => Some(Tooltip {
                text: format!("{w} × {h}"),
                anchor: Point::new(frame.center().x, frame.bottom() + Chrome::for_scale(props.scale).tooltip_offset),
            }),
            _ => None,
        };
        let popup = self.popup.as_ref().map(|p| match p {
            Popup::ContextMenu { at } => PopupView::ContextMenu { at: *at, items: context_menu_items(props.record.z_order) },
            Popup::QuickSwap { at, options } => PopupView::QuickSwap {
                at: Point::new(at.x + QUICK_SWAP_OFFSET_X, at.y + QUICK_SWAP_OFFSET_Y),
                columns: QUICK_SWAP_COLUMNS,
                options: options.clone(),
            },
        });
        OverlayView {
            frame,
            image: props.record.image.clone(),
            z_index: props.record.z_order.z_index(),
            cursor: if self.gesture.is_dragging() { "grabbing" } else { "crosshair" },
            chrome,
            tooltip,
            popup,
        }
    }

    // --- Internals ---

    fn select(&mut self, ev: &PointerEvent) {
        self.selected = true;
        self.selection.arm(ev.id);
    }

    fn deselect(&mut self) {
        self.selected = false;
        self.selection.disarm();
        self.close_popup();
    }

    fn open_popup(&mut self, popup: Popup, ev: &PointerEvent) {
        self.popup = Some(popup);
        self.popup_guard.arm(ev.id);
    }

    fn close_popup(&mut self) {
        self.popup = None;
        self.popup_guard.disarm();
    }
}
