//! Document model: template element layouts, the freeform overlay record, and
//! the per-canvas-size maps that own them.
//!
//! This module defines what the editor persists in memory: a tagged
//! `ElementLayout` per named template slot (`ElementId`), the sparse
//! `LayoutPatch` the controllers emit, the `ElementOverrides` map for one
//! canvas size, the placed `OverlayRecord` with its own sparse
//! `OverlayPatch`, and `PerSize<T>` which keys any of these by canvas-size id.
//!
//! Controllers never hold these values across renders. They read a snapshot
//! and emit patches; the editor merges the patches here.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::camera::{Point, Rect};
use crate::consts::{Z_BACK, Z_FRONT};

// =============================================================
// Template elements
// =============================================================

/// Named slot in the template that the user may move and resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementId {
    HeroImage,
    Headline,
    Subtitle,
    TargetAudience,
    Badge,
    Logo,
    UspStrip,
}

impl ElementId {
    /// Every slot, in paint order.
    pub const ALL: [ElementId; 7] = [
        Self::HeroImage,
        Self::Headline,
        Self::Subtitle,
        Self::TargetAudience,
        Self::Badge,
        Self::Logo,
        Self::UspStrip,
    ];

    /// The fixed resize semantic of this slot.
    #[must_use]
    pub fn kind(self) -> ElementKind {
        match self {
            Self::HeroImage => ElementKind::Image,
            Self::Headline | Self::Subtitle | Self::TargetAudience => ElementKind::Text,
            Self::Badge | Self::Logo | Self::UspStrip => ElementKind::Badge,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HeroImage => "heroImage",
            Self::Headline => "headline",
            Self::Subtitle => "subtitle",
            Self::TargetAudience => "targetAudience",
            Self::Badge => "badge",
            Self::Logo => "logo",
            Self::UspStrip => "uspStrip",
        }
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an element responds to a resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Width/height override, eight handles.
    Image,
    /// Font-size override.
    Text,
    /// Uniform scale override (badges, logos, strips).
    Badge,
}

/// Persisted placement of one template element.
///
/// The variant is fixed by the element's kind, so a text element can never
/// carry a width or a scale. Offsets are displacement from the element's
/// default flow position, in canvas pixels. `None` means "use the default".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ElementLayout {
    Image {
        offset_x: f64,
        offset_y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<f64>,
    },
    Text {
        offset_x: f64,
        offset_y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_size: Option<f64>,
    },
    Badge {
        offset_x: f64,
        offset_y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<f64>,
    },
}

impl ElementLayout {
    /// The untouched layout for an element of `kind`: zero offset, no overrides.
    #[must_use]
    pub fn default_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Image => Self::Image { offset_x: 0.0, offset_y: 0.0, width: None, height: None },
            ElementKind::Text => Self::Text { offset_x: 0.0, offset_y: 0.0, font_size: None },
            ElementKind::Badge => Self::Badge { offset_x: 0.0, offset_y: 0.0, scale: None },
        }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Image { .. } => ElementKind::Image,
            Self::Text { .. } => ElementKind::Text,
            Self::Badge { .. } => ElementKind::Badge,
        }
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        match *self {
            Self::Image { offset_x, offset_y, .. }
            | Self::Text { offset_x, offset_y, .. }
            | Self::Badge { offset_x, offset_y, .. } => Point::new(offset_x, offset_y),
        }
    }

    #[must_use]
    pub fn width(&self) -> Option<f64> {
        match *self {
            Self::Image { width, .. } => width,
            _ => None,
        }
    }

    #[must_use]
    pub fn height(&self) -> Option<f64> {
        match *self {
            Self::Image { height, .. } => height,
            _ => None,
        }
    }

    #[must_use]
    pub fn font_size(&self) -> Option<f64> {
        match *self {
            Self::Text { font_size, .. } => font_size,
            _ => None,
        }
    }

    #[must_use]
    pub fn scale(&self) -> Option<f64> {
        match *self {
            Self::Badge { scale, .. } => scale,
            _ => None,
        }
    }

    /// True when nothing differs from [`ElementLayout::default_for`].
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default_for(self.kind())
    }

    /// Shallow-merge `patch` into this layout.
    ///
    /// Returns the names of patch fields that do not apply to this kind; those
    /// fields are dropped and the layout is otherwise updated.
    pub fn apply(&mut self, patch: &LayoutPatch) -> Vec<&'static str> {
        let mut ignored = Vec::new();
        match self {
            Self::Image { offset_x, offset_y, width, height } => {
                merge_offset(offset_x, offset_y, patch);
                if patch.width.is_some() {
                    *width = patch.width;
                }
                if patch.height.is_some() {
                    *height = patch.height;
                }
                if patch.font_size.is_some() {
                    ignored.push("fontSize");
                }
                if patch.scale.is_some() {
                    ignored.push("scale");
                }
            }
            Self::Text { offset_x, offset_y, font_size } => {
                merge_offset(offset_x, offset_y, patch);
                if patch.font_size.is_some() {
                    *font_size = patch.font_size;
                }
                if patch.width.is_some() {
                    ignored.push("width");
                }
                if patch.height.is_some() {
                    ignored.push("height");
                }
                if patch.scale.is_some() {
                    ignored.push("scale");
                }
            }
            Self::Badge { offset_x, offset_y, scale } => {
                merge_offset(offset_x, offset_y, patch);
                if patch.scale.is_some() {
                    *scale = patch.scale;
                }
                if patch.width.is_some() {
                    ignored.push("width");
                }
                if patch.height.is_some() {
                    ignored.push("height");
                }
                if patch.font_size.is_some() {
                    ignored.push("fontSize");
                }
            }
        }
        ignored
    }
}

fn merge_offset(offset_x: &mut f64, offset_y: &mut f64, patch: &LayoutPatch) {
    if let Some(x) = patch.offset_x {
        *offset_x = x;
    }
    if let Some(y) = patch.offset_y {
        *offset_y = y;
    }
}

/// Sparse update for an element layout. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl LayoutPatch {
    #[must_use]
    pub fn offset(x: f64, y: f64) -> Self {
        Self { offset_x: Some(x), offset_y: Some(y), ..Self::default() }
    }

    #[must_use]
    pub fn size(width: f64, height: f64) -> Self {
        Self { width: Some(width), height: Some(height), ..Self::default() }
    }

    #[must_use]
    pub fn font_size(font_size: f64) -> Self {
        Self { font_size: Some(font_size), ..Self::default() }
    }

    #[must_use]
    pub fn scale(scale: f64) -> Self {
        Self { scale: Some(scale), ..Self::default() }
    }

    #[must_use]
    pub fn with_offset_x(mut self, x: f64) -> Self {
        self.offset_x = Some(x);
        self
    }

    #[must_use]
    pub fn with_offset_y(mut self, y: f64) -> Self {
        self.offset_y = Some(y);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Layout overrides for every touched element of one canvas size.
///
/// Absent keys mean the default layout. Entries are created on first touch
/// and reset in place; they are never removed individually.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementOverrides {
    layouts: BTreeMap<ElementId, ElementLayout>,
}

impl ElementOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The effective layout for `id`.
    ///
    /// Missing entries, and entries whose variant does not match the
    /// element's kind, both read as the default.
    #[must_use]
    pub fn get(&self, id: ElementId) -> ElementLayout {
        match self.layouts.get(&id) {
            Some(layout) if layout.kind() == id.kind() => *layout,
            _ => ElementLayout::default_for(id.kind()),
        }
    }

    /// Shallow-merge `patch` into the layout for `id`, creating it if needed.
    pub fn apply(&mut self, id: ElementId, patch: &LayoutPatch) {
        let mut layout = self.get(id);
        let ignored = layout.apply(patch);
        if !ignored.is_empty() {
            warn!(element = %id, ?ignored, "layout patch carried fields for another element kind");
        }
        self.layouts.insert(id, layout);
    }

    /// Clear every override field of `id` back to the default.
    pub fn reset(&mut self, id: ElementId) {
        self.layouts.insert(id, ElementLayout::default_for(id.kind()));
    }

    /// Number of touched elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &ElementLayout)> {
        self.layouts.iter().map(|(id, layout)| (*id, layout))
    }
}

// =============================================================
// Freeform overlay
// =============================================================

/// Where a newly placed overlay lands before the user first moves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayPosition {
    Left,
    #[default]
    Right,
    Bottom,
}

/// Two-level stacking for the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZOrder {
    #[default]
    Front,
    Back,
}

impl ZOrder {
    #[must_use]
    pub fn z_index(self) -> i32 {
        match self {
            Self::Front => Z_FRONT,
            Self::Back => Z_BACK,
        }
    }
}

/// One placed character/founder image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayRecord {
    /// Person key the overlay was placed from.
    pub key: String,
    pub name: String,
    /// Asset path of the image currently shown.
    pub image: String,
    /// Advisory placement, used only until an explicit rectangle exists.
    #[serde(default)]
    pub position: OverlayPosition,
    /// Advisory side length, used only until an explicit rectangle exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    #[serde(default)]
    pub z_order: ZOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
}

impl OverlayRecord {
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            image: image.into(),
            position: OverlayPosition::default(),
            size: None,
            x: None,
            y: None,
            w: None,
            h: None,
            z_order: ZOrder::default(),
            expression_id: None,
            person_id: None,
        }
    }

    #[must_use]
    pub fn at(mut self, position: OverlayPosition, size: Option<f64>) -> Self {
        self.position = position;
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_person(mut self, person_id: impl Into<String>) -> Self {
        self.person_id = Some(person_id.into());
        self
    }

    /// The explicit rectangle, once all four coordinates are known.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        Some(Rect::new(self.x?, self.y?, self.w?, self.h?))
    }

    /// Manifest key for alternate expressions: `person_id`, else `key`.
    #[must_use]
    pub fn person_key(&self) -> &str {
        self.person_id.as_deref().unwrap_or(&self.key)
    }

    /// Shallow-merge `patch` into this record.
    pub fn apply(&mut self, patch: &OverlayPatch) {
        if let Some(rect) = patch.rect {
            self.x = Some(rect.x);
            self.y = Some(rect.y);
            self.w = Some(rect.w);
            self.h = Some(rect.h);
        }
        if let Some(z) = patch.z_order {
            self.z_order = z;
        }
        if let Some(ref image) = patch.image {
            self.image.clone_from(image);
        }
        if let Some(ref expression_id) = patch.expression_id {
            self.expression_id = Some(expression_id.clone());
        }
    }
}

/// Sparse update for the overlay record. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_order: Option<ZOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_id: Option<String>,
}

// =============================================================
// Per-size storage
// =============================================================

/// Values keyed by canvas-size id. Sizes never share state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerSize<T> {
    entries: BTreeMap<String, T>,
}

impl<T> Default for PerSize<T> {
    fn default() -> Self {
        Self { entries: BTreeMap::new() }
    }
}

impl<T> PerSize<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, size_id: &str) -> Option<&T> {
        self.entries.get(size_id)
    }

    pub fn get_mut(&mut self, size_id: &str) -> Option<&mut T> {
        self.entries.get_mut(size_id)
    }

    pub fn insert(&mut self, size_id: impl Into<String>, value: T) {
        self.entries.insert(size_id.into(), value);
    }

    pub fn remove(&mut self, size_id: &str) -> Option<T> {
        self.entries.remove(size_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Default> PerSize<T> {
    /// The entry for `size_id`, created empty on first access.
    pub fn entry(&mut self, size_id: &str) -> &mut T {
        self.entries.entry(size_id.to_owned()).or_default()
    }
}

impl<T: Clone> PerSize<T> {
    /// Copy the entry for `from` onto every id in `targets`.
    ///
    /// Returns the number of entries written. A missing source copies nothing.
    pub fn copy_to_all<'a>(&mut self, from: &str, targets: impl IntoIterator<Item = &'a str>) -> usize {
        let Some(source) = self.entries.get(from).cloned() else {
            return 0;
        };
        let mut written = 0;
        for target in targets {
            if target == from {
                continue;
            }
            self.entries.insert(target.to_owned(), source.clone());
            written += 1;
        }
        written
    }
}
