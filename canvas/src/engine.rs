use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::camera::{CanvasScale, Point, Size, fit_scale};
use crate::consts::DEFAULT_ASSET_BASE;
use crate::doc::{ElementId, ElementLayout, ElementOverrides, OverlayRecord, PerSize, ZOrder};
use crate::hit::{HitPart, ResizeAnchor, handles_for, hit_test};
use crate::input::{Focus, Key, PointerEvent};
use crate::manifest::{ExpressionLookup, Manifest, ManifestLookup, NoExpressions};
use crate::overlay::{OverlayController, OverlayProps, OverlayView, initial_bounds};
use crate::render::{RenderMode, RenderedElement, TemplateRenderer};
use crate::sizes::{AD_SIZES, CanvasSize, DEFAULT_AD_SIZE, find_size};
use crate::template::ElementController;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("unknown canvas size: {0}")]
    UnknownSize(String),
}

/// Startup settings for an [`EditorCore`].
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Directory manifest file names are relative to.
    pub asset_base: String,
    pub initial_size: String,
    pub scale: f64,
    pub mode: RenderMode,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            asset_base: DEFAULT_ASSET_BASE.to_owned(),
            initial_size: DEFAULT_AD_SIZE.id.to_owned(),
            scale: 1.0,
            mode: RenderMode::Edit,
        }
    }
}

/// What sits under a canvas point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Element(ElementId, HitPart),
    Overlay(HitPart),
}

impl Target {
    fn owner(self) -> Owner {
        match self {
            Self::Element(id, _) => Owner::Element(id),
            Self::Overlay(_) => Owner::Overlay,
        }
    }
}

/// The controller that currently holds the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Element(ElementId),
    Overlay,
}

/// One frame for the host to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorFrame {
    pub size: CanvasSize,
    pub scale: CanvasScale,
    pub mode: RenderMode,
    pub elements: Vec<RenderedElement>,
    pub overlay: Option<OverlayView>,
}

/// Serializable editor state: every size's overrides and overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub active_size: String,
    pub selected_element: Option<ElementId>,
    pub element_overrides: PerSize<ElementOverrides>,
    pub overlays: PerSize<OverlayRecord>,
}

/// The host editor state tree.
///
/// Owns the per-size override maps and the single selection, and is the only
/// place controller actions are merged. Controllers see a fresh snapshot on
/// every call.
pub struct EditorCore {
    size: CanvasSize,
    renderer: TemplateRenderer,
    scale: CanvasScale,
    mode: RenderMode,
    asset_base: String,
    lookup: Option<ManifestLookup>,
    elements: PerSize<ElementOverrides>,
    overlays: PerSize<OverlayRecord>,
    selected: Option<ElementId>,
    element_controllers: BTreeMap<ElementId, ElementController>,
    overlay_controller: OverlayController,
    owner: Option<Owner>,
    hovered: Option<Owner>,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::with_size(DEFAULT_AD_SIZE, &EditorConfig::default())
    }
}

impl EditorCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an editor from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownSize`] when the initial size is not in the catalog.
    pub fn from_config(config: &EditorConfig) -> Result<Self, EditorError> {
        let size = find_size(&config.initial_size).ok_or_else(|| EditorError::UnknownSize(config.initial_size.clone()))?;
        Ok(Self::with_size(size, config))
    }

    fn with_size(size: CanvasSize, config: &EditorConfig) -> Self {
        Self {
            size,
            renderer: TemplateRenderer::new(size.size()),
            scale: CanvasScale::new(config.scale),
            mode: config.mode,
            asset_base: config.asset_base.clone(),
            lookup: None,
            elements: PerSize::new(),
            overlays: PerSize::new(),
            selected: None,
            element_controllers: ElementId::ALL.iter().map(|&id| (id, ElementController::new())).collect(),
            overlay_controller: OverlayController::new(),
            owner: None,
            hovered: None,
        }
    }

    // --- Settings ---

    /// Switch the active canvas size. Selection and any gesture in flight end.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownSize`] for an id outside the catalog.
    pub fn set_active_size(&mut self, id: &str) -> Result<Vec<Action>, EditorError> {
        let size = find_size(id).ok_or_else(|| EditorError::UnknownSize(id.to_owned()))?;
        self.size = size;
        self.renderer = TemplateRenderer::new(size.size());
        self.end_interaction();
        info!(size = size.id, width = size.width, height = size.height, "editor: active size changed");
        Ok(vec![Action::SelectionChanged { id: None }, Action::RenderNeeded])
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = CanvasScale::new(scale);
    }

    /// Fit the active canvas inside a preview viewport.
    pub fn fit_to_viewport(&mut self, viewport: Size) -> CanvasScale {
        self.scale = fit_scale(self.size.size(), viewport);
        self.scale
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        if mode != self.mode && !mode.is_interactive() {
            self.end_interaction();
        }
        self.mode = mode;
    }

    /// Use `manifest` for quick-swap, resolved against the configured asset base.
    pub fn load_manifest(&mut self, manifest: Manifest) {
        info!(people = manifest.people.len(), "editor: manifest loaded");
        self.lookup = Some(ManifestLookup::new(manifest, self.asset_base.clone()));
    }

    // --- Overlay placement ---

    /// Place `record` as the overlay of the active size, replacing any existing one.
    pub fn place_overlay(&mut self, record: OverlayRecord) -> Vec<Action> {
        debug!(size = self.size.id, key = %record.key, "editor: overlay placed");
        self.overlays.insert(self.size.id, record);
        self.overlay_controller.clear();
        vec![Action::RenderNeeded]
    }

    /// Copy the active size's overlay onto every other size, explicit
    /// rectangle included. Returns the number of sizes written.
    pub fn apply_overlay_to_all_sizes(&mut self) -> usize {
        let written = self.overlays.copy_to_all(self.size.id, AD_SIZES.iter().map(|s| s.id));
        info!(from = self.size.id, written, "editor: overlay applied to all sizes");
        written
    }

    /// Copy the active size's element overrides onto every other size.
    pub fn apply_elements_to_all_sizes(&mut self) -> usize {
        let written = self.elements.copy_to_all(self.size.id, AD_SIZES.iter().map(|s| s.id));
        info!(from = self.size.id, written, "editor: element overrides applied to all sizes");
        written
    }

    // --- Action merge ---

    /// Merge controller actions into editor state.
    ///
    /// Returns the actions unchanged so the host can react to cursor and
    /// render hints.
    pub fn apply(&mut self, actions: Vec<Action>) -> Vec<Action> {
        for action in &actions {
            match action {
                Action::ElementUpdated { id, fields } => {
                    self.elements.entry(self.size.id).apply(*id, fields);
                }
                Action::ElementReset { id } => {
                    self.elements.entry(self.size.id).reset(*id);
                }
                Action::SelectionChanged { id } => {
                    self.selected = *id;
                }
                Action::OverlayUpdated { fields } => match self.overlays.get_mut(self.size.id) {
                    Some(record) => record.apply(fields),
                    None => warn!(size = self.size.id, "editor: overlay update with no overlay placed"),
                },
                Action::OverlayDeleted => {
                    self.overlays.remove(self.size.id);
                    if self.owner == Some(Owner::Overlay) {
                        self.owner = None;
                    }
                    debug!(size = self.size.id, "editor: overlay removed");
                }
                Action::SetCursor { .. } | Action::RenderNeeded => {}
            }
        }
        actions
    }

    // --- Pointer routing ---

    /// Screen pixels to canvas pixels, with the canvas drawn at the screen origin.
    #[must_use]
    pub fn to_canvas(&self, screen: Point) -> Point {
        Point::new(screen.x * self.scale.inverse(), screen.y * self.scale.inverse())
    }

    /// What lies under a screen point. The selected element is on top, then a
    /// front overlay, then the template in reverse paint order, then a back overlay.
    #[must_use]
    pub fn target_at(&self, screen: Point) -> Option<Target> {
        let pt = self.to_canvas(screen);
        if let Some(id) = self.selected {
            if let Some(part) = self.hit_element(id, pt) {
                return Some(Target::Element(id, part));
            }
        }
        let overlay = self.hit_overlay(pt);
        let front = self.overlay().is_some_and(|r| r.z_order == ZOrder::Front);
        if front && let Some(part) = overlay {
            return Some(Target::Overlay(part));
        }
        for &id in ElementId::ALL.iter().rev() {
            if Some(id) == self.selected {
                continue;
            }
            if let Some(part) = self.hit_element(id, pt) {
                return Some(Target::Element(id, part));
            }
        }
        overlay.map(Target::Overlay)
    }

    pub fn on_pointer_down(&mut self, ev: &PointerEvent) -> Vec<Action> {
        if !self.mode.is_interactive() {
            return Vec::new();
        }
        if self.owner.is_some() {
            debug!(event = ev.id.0, "editor: pointer down ignored during gesture");
            return Vec::new();
        }
        let target = self.target_at(ev.screen);
        let mut out = self.dismiss_others(target.map(Target::owner), ev);
        out.extend(match target {
            None => Vec::new(),
            Some(Target::Element(id, HitPart::ResizeHandle(anchor))) => self.element_handle_down(id, anchor, ev),
            Some(Target::Element(id, _)) => self.element_body_down(id, ev),
            Some(Target::Overlay(HitPart::DeleteButton)) => {
                let actions = self.overlay_controller.on_delete_clicked();
                self.apply(actions)
            }
            Some(Target::Overlay(part)) => self.overlay_down(part, ev),
        });
        out
    }

    pub fn on_pointer_move(&mut self, ev: &PointerEvent) -> Vec<Action> {
        if !self.mode.is_interactive() {
            return Vec::new();
        }
        match self.owner {
            Some(Owner::Element(id)) => self.element_move(id, ev),
            Some(Owner::Overlay) => {
                let Some(record) = self.overlays.get(self.size.id) else {
                    return Vec::new();
                };
                let props = OverlayProps { record, canvas: self.size.size(), scale: self.scale };
                let actions = self.overlay_controller.on_pointer_move(&props, ev);
                self.apply(actions)
            }
            None => self.update_hover(ev.screen),
        }
    }

    pub fn on_pointer_up(&mut self, _ev: &PointerEvent) -> Vec<Action> {
        let actions = match self.owner.take() {
            Some(Owner::Element(id)) => {
                let layout = self.element_layout(id);
                let props = self.renderer.props(id, &layout, self.scale, self.mode, self.selected);
                self.element_controllers.entry(id).or_default().on_pointer_up(&props)
            }
            Some(Owner::Overlay) => self.overlay_controller.on_pointer_up(),
            None => return Vec::new(),
        };
        self.apply(actions)
    }

    /// Right-click. Only the overlay has a context menu.
    pub fn on_context_menu(&mut self, ev: &PointerEvent) -> Vec<Action> {
        if !self.mode.is_interactive() || self.owner.is_some() {
            return Vec::new();
        }
        match self.target_at(ev.screen) {
            Some(Target::Overlay(_)) => {
                let mut out = self.dismiss_others(Some(Owner::Overlay), ev);
                out.extend(self.overlay_controller.on_context_menu(ev));
                out
            }
            _ => Vec::new(),
        }
    }

    /// Double-click. Opens quick-swap when it lands on the overlay.
    pub fn on_double_click(&mut self, ev: &PointerEvent) -> Vec<Action> {
        if !self.mode.is_interactive() || self.owner.is_some() {
            return Vec::new();
        }
        if !matches!(self.target_at(ev.screen), Some(Target::Overlay(_))) {
            return Vec::new();
        }
        let Some(record) = self.overlays.get(self.size.id) else {
            return Vec::new();
        };
        let props = OverlayProps { record, canvas: self.size.size(), scale: self.scale };
        let lookup: &dyn ExpressionLookup = match &self.lookup {
            Some(l) => l,
            None => &NoExpressions,
        };
        let actions = self.overlay_controller.on_double_click(&props, ev, lookup);
        self.apply(actions)
    }

    pub fn on_key_down(&mut self, key: &Key, focus: Focus) -> Vec<Action> {
        if !self.mode.is_interactive() || self.overlays.get(self.size.id).is_none() {
            return Vec::new();
        }
        let actions = self.overlay_controller.on_key_down(key, focus);
        self.apply(actions)
    }

    // --- Secondary UI ---

    pub fn choose_z_order(&mut self, z_order: ZOrder) -> Vec<Action> {
        let Some(record) = self.overlays.get(self.size.id) else {
            return Vec::new();
        };
        let props = OverlayProps { record, canvas: self.size.size(), scale: self.scale };
        let actions = self.overlay_controller.choose_z_order(&props, z_order);
        self.apply(actions)
    }

    pub fn choose_expression(&mut self, expression_id: &str) -> Vec<Action> {
        let actions = self.overlay_controller.choose_expression(expression_id);
        self.apply(actions)
    }

    /// The Reset button of element `id`. Only the selected element shows one.
    pub fn reset_element(&mut self, id: ElementId) -> Vec<Action> {
        if self.selected != Some(id) {
            debug!(element = %id, "editor: reset ignored for unselected element");
            return Vec::new();
        }
        let layout = self.element_layout(id);
        let props = self.renderer.props(id, &layout, self.scale, self.mode, self.selected);
        let actions = self.element_controllers.entry(id).or_default().on_reset(&props);
        self.apply(actions)
    }

    // --- Render ---

    #[must_use]
    pub fn render(&self) -> EditorFrame {
        let empty = ElementOverrides::new();
        let overrides = self.elements.get(self.size.id).unwrap_or(&empty);
        let selected = if self.mode.is_interactive() { self.selected } else { None };
        let elements = self.renderer.render(overrides, &self.element_controllers, self.scale, self.mode, selected);
        let overlay = self.overlays.get(self.size.id).map(|record| {
            let props = OverlayProps { record, canvas: self.size.size(), scale: self.scale };
            let view = self.overlay_controller.view(&props);
            if self.mode.is_interactive() {
                view
            } else {
                OverlayView { chrome: None, tooltip: None, popup: None, ..view }
            }
        });
        EditorFrame { size: self.size, scale: self.scale, mode: self.mode, elements, overlay }
    }

    // --- Queries ---

    #[must_use]
    pub fn active_size(&self) -> CanvasSize {
        self.size
    }

    #[must_use]
    pub fn scale(&self) -> CanvasScale {
        self.scale
    }

    #[must_use]
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    #[must_use]
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    #[must_use]
    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    /// Effective layout of `id` at the active size.
    #[must_use]
    pub fn element_layout(&self, id: ElementId) -> ElementLayout {
        match self.elements.get(self.size.id) {
            Some(overrides) => overrides.get(id),
            None => ElementLayout::default_for(id.kind()),
        }
    }

    #[must_use]
    pub fn overrides(&self, size_id: &str) -> Option<&ElementOverrides> {
        self.elements.get(size_id)
    }

    /// Overlay of the active size.
    #[must_use]
    pub fn overlay(&self) -> Option<&OverlayRecord> {
        self.overlays.get(self.size.id)
    }

    #[must_use]
    pub fn overlay_for(&self, size_id: &str) -> Option<&OverlayRecord> {
        self.overlays.get(size_id)
    }

    #[must_use]
    pub fn overlay_controller(&self) -> &OverlayController {
        &self.overlay_controller
    }

    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.owner.is_some()
    }

    #[must_use]
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            active_size: self.size.id.to_owned(),
            selected_element: self.selected,
            element_overrides: self.elements.clone(),
            overlays: self.overlays.clone(),
        }
    }

    // --- Internals ---

    fn end_interaction(&mut self) {
        self.selected = None;
        self.owner = None;
        self.hovered = None;
        for c in self.element_controllers.values_mut() {
            c.cancel();
        }
        self.overlay_controller.clear();
    }

    fn hit_element(&self, id: ElementId, pt: Point) -> Option<HitPart> {
        let layout = self.element_layout(id);
        let frame = self.renderer.props(id, &layout, self.scale, self.mode, self.selected).placed_frame();
        let handles: &[ResizeAnchor] = if self.selected == Some(id) { handles_for(id.kind()) } else { &[] };
        hit_test(pt, frame, self.scale, handles, false)
    }

    fn hit_overlay(&self, pt: Point) -> Option<HitPart> {
        let record = self.overlays.get(self.size.id)?;
        let frame = initial_bounds(record, self.size.size());
        let c = &self.overlay_controller;
        let chrome = c.is_selected() || c.is_hovered();
        let handles: &[ResizeAnchor] = if chrome { &ResizeAnchor::CORNERS } else { &[] };
        hit_test(pt, frame, self.scale, handles, chrome)
    }

    /// Deliver an outside pointer-down to every controller except `except`.
    fn dismiss_others(&mut self, except: Option<Owner>, ev: &PointerEvent) -> Vec<Action> {
        let mut out = Vec::new();
        for id in ElementId::ALL {
            if except == Some(Owner::Element(id)) {
                continue;
            }
            let layout = self.element_layout(id);
            let props = self.renderer.props(id, &layout, self.scale, self.mode, self.selected);
            let actions = self.element_controllers.entry(id).or_default().on_outside_pointer_down(&props, ev);
            out.extend(self.apply(actions));
        }
        if except != Some(Owner::Overlay) && self.overlays.get(self.size.id).is_some() {
            let actions = self.overlay_controller.on_outside_pointer_down(ev);
            out.extend(self.apply(actions));
        }
        out
    }

    fn element_body_down(&mut self, id: ElementId, ev: &PointerEvent) -> Vec<Action> {
        let layout = self.element_layout(id);
        let props = self.renderer.props(id, &layout, self.scale, self.mode, self.selected);
        let controller = self.element_controllers.entry(id).or_default();
        let actions = controller.on_pointer_down(&props, ev);
        if !controller.gesture().is_idle() {
            self.owner = Some(Owner::Element(id));
        }
        self.apply(actions)
    }

    fn element_handle_down(&mut self, id: ElementId, anchor: ResizeAnchor, ev: &PointerEvent) -> Vec<Action> {
        let layout = self.element_layout(id);
        let props = self.renderer.props(id, &layout, self.scale, self.mode, self.selected);
        let controller = self.element_controllers.entry(id).or_default();
        let actions = controller.on_handle_pointer_down(&props, anchor, ev);
        if !controller.gesture().is_idle() {
            self.owner = Some(Owner::Element(id));
        }
        self.apply(actions)
    }

    fn element_move(&mut self, id: ElementId, ev: &PointerEvent) -> Vec<Action> {
        let layout = self.element_layout(id);
        let props = self.renderer.props(id, &layout, self.scale, self.mode, self.selected);
        let actions = self.element_controllers.entry(id).or_default().on_pointer_move(&props, ev);
        self.apply(actions)
    }

    fn overlay_down(&mut self, part: HitPart, ev: &PointerEvent) -> Vec<Action> {
        let Some(record) = self.overlays.get(self.size.id) else {
            return Vec::new();
        };
        let props = OverlayProps { record, canvas: self.size.size(), scale: self.scale };
        let actions = match part {
            HitPart::ResizeHandle(anchor) => self.overlay_controller.on_handle_pointer_down(&props, anchor, ev),
            _ => self.overlay_controller.on_body_pointer_down(&props, ev),
        };
        if !self.overlay_controller.gesture().is_idle() {
            self.owner = Some(Owner::Overlay);
        }
        self.apply(actions)
    }

    /// Track which controller is under an idle pointer and send enter/leave.
    fn update_hover(&mut self, screen: Point) -> Vec<Action> {
        let now = self.target_at(screen).map(Target::owner);
        if now == self.hovered {
            return Vec::new();
        }
        let mut out = Vec::new();
        if let Some(prev) = self.hovered {
            out.extend(self.hover(prev, false));
        }
        if let Some(next) = now {
            out.extend(self.hover(next, true));
        }
        self.hovered = now;
        out
    }

    fn hover(&mut self, who: Owner, enter: bool) -> Vec<Action> {
        match who {
            Owner::Overlay if enter => self.overlay_controller.on_pointer_enter(),
            Owner::Overlay => self.overlay_controller.on_pointer_leave(),
            Owner::Element(id) => {
                let layout = self.element_layout(id);
                let props = self.renderer.props(id, &layout, self.scale, self.mode, self.selected);
                let c = self.element_controllers.entry(id).or_default();
                if enter { c.on_pointer_enter(&props) } else { c.on_pointer_leave(&props) }
            }
        }
    }
}
