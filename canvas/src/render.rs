//! Host template renderer for the AI Engineering Bootcamp ad.
//!
//! Default element boxes are a pure function of the canvas dimensions and its
//! layout class. They are never written to; an override for the same element
//! shadows them. Rendering resolves each element against its override and asks
//! its controller for a view, static for export and preview, interactive for
//! the editor.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::camera::{CanvasScale, Rect, Size};
use crate::consts::TEMPLATE_BASE_SIDE;
use crate::doc::{ElementId, ElementKind, ElementLayout, ElementOverrides};
use crate::sizes::LayoutClass;
use crate::template::{ElementController, ElementProps, ElementView, ResizeDefaults};

/// Line height applied to every text block.
const LINE_HEIGHT: f64 = 1.1;

/// Where a render is headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Rasterized to PNG. Never shows hover or selection state.
    Export,
    /// Read-only live preview.
    Preview,
    #[default]
    Edit,
}

impl RenderMode {
    #[must_use]
    pub fn is_interactive(self) -> bool {
        self == Self::Edit
    }
}

/// Font sizes in canvas pixels, rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fonts {
    pub headline: f64,
    pub subtitle: f64,
    pub target_audience: f64,
    pub presents: f64,
    pub badge: f64,
    pub usp: f64,
}

/// Size-dependent measurements shared by every default box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetrics {
    pub size: Size,
    pub class: LayoutClass,
    /// `min(w, h) / 563`.
    pub scale: f64,
    pub pad: f64,
    pub hero_width: f64,
    pub fonts: Fonts,
}

impl TemplateMetrics {
    #[must_use]
    pub fn new(size: Size) -> Self {
        let class = LayoutClass::of(size);
        let scale = size.width.min(size.height) / TEMPLATE_BASE_SIDE;
        let (k_headline, k_subtitle, k_audience, hero_frac) = match class {
            LayoutClass::Tall => (0.75, 0.8, 0.6, 0.5),
            LayoutClass::Square => (0.85, 0.85, 0.7, 0.55),
            LayoutClass::Wide => (1.0, 1.0, 1.0, 0.62),
        };
        let fonts = Fonts {
            headline: (62.0 * scale * k_headline).round(),
            subtitle: (20.0 * scale * k_subtitle).round(),
            target_audience: (78.0 * scale * k_audience).round(),
            presents: (13.0 * scale).round(),
            badge: (14.0 * scale).round(),
            usp: (15.0 * scale).round(),
        };
        Self { size, class, scale, pad: (28.0 * scale).round(), hero_width: size.width * hero_frac, fonts }
    }

    /// Canvas pixels for a template-relative measurement.
    fn px(&self, v: f64) -> f64 {
        (v * self.scale).round()
    }

    fn usp_strip_height(&self) -> f64 {
        self.fonts.usp * LINE_HEIGHT + 2.0 * self.px(12.0)
    }

    /// Width of the headline column.
    fn text_column(&self) -> f64 {
        match self.class {
            LayoutClass::Tall => self.size.width - 2.0 * self.pad,
            LayoutClass::Square | LayoutClass::Wide => self.size.width - self.hero_width - self.pad,
        }
    }
}

/// Default placement of one element before any override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultLayout {
    /// Box at zero offset, in canvas pixels.
    pub frame: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl DefaultLayout {
    /// Resize fallbacks for a gesture that starts with no override.
    #[must_use]
    pub fn resize_defaults(&self) -> ResizeDefaults {
        ResizeDefaults { width: Some(self.frame.w), height: Some(self.frame.h), font_size: self.font_size }
    }
}

/// Default boxes for every element at one canvas size.
#[must_use]
pub fn default_layouts(size: Size) -> BTreeMap<ElementId, DefaultLayout> {
    let m = TemplateMetrics::new(size);
    let (w, h) = (size.width, size.height);
    let column = m.text_column();

    // Top bar: logo with PRESENTS on the left, badge on the right.
    let bar_h = m.px(32.0);
    let logo = Rect::new(m.pad, m.pad, m.px(150.0), bar_h);
    let badge_h = m.fonts.badge * LINE_HEIGHT + 2.0 * m.px(5.0);
    let badge_w = m.px(130.0);
    let badge = Rect::new(w - m.pad - badge_w, m.pad + (bar_h - badge_h) / 2.0, badge_w, badge_h);

    // Headline block stacked under the bar.
    let gap = m.px(2.0);
    let headline_y = m.pad + bar_h + m.px(20.0);
    let headline = Rect::new(m.pad, headline_y, column, 2.0 * m.fonts.headline * LINE_HEIGHT);
    let subtitle = Rect::new(m.pad, headline.bottom() + gap, column, m.fonts.subtitle * LINE_HEIGHT);
    let audience = Rect::new(m.pad, subtitle.bottom() + gap, column, 2.0 * m.fonts.target_audience * LINE_HEIGHT);

    let strip_h = m.usp_strip_height();
    let usp = Rect::new(0.0, h - strip_h, w, strip_h);

    let hero = match m.class {
        LayoutClass::Wide => {
            let top = m.px(-10.0);
            let bottom = m.px(40.0);
            Rect::new(w - m.hero_width, top, m.hero_width, h - bottom - top)
        }
        LayoutClass::Square => {
            let hh = h * 0.75;
            Rect::new(w - m.hero_width, h - m.px(40.0) - hh, m.hero_width, hh)
        }
        LayoutClass::Tall => {
            let top = audience.bottom() + m.pad;
            Rect::new((w - m.hero_width) / 2.0, top, m.hero_width, (usp.y - top).max(0.0))
        }
    };

    let text = |frame: Rect, font: f64| DefaultLayout { frame, font_size: Some(font) };
    let boxed = |frame: Rect| DefaultLayout { frame, font_size: None };
    BTreeMap::from([
        (ElementId::HeroImage, boxed(hero)),
        (ElementId::Headline, text(headline, m.fonts.headline)),
        (ElementId::Subtitle, text(subtitle, m.fonts.subtitle)),
        (ElementId::TargetAudience, text(audience, m.fonts.target_audience)),
        (ElementId::Badge, boxed(badge)),
        (ElementId::Logo, boxed(logo)),
        (ElementId::UspStrip, boxed(usp)),
    ])
}

/// One element resolved against its override.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedElement {
    pub id: ElementId,
    pub layout: ElementLayout,
    /// Box at zero offset, sized by the override when one exists.
    pub frame: Rect,
    pub font_size: Option<f64>,
    pub scale: f64,
    pub view: ElementView,
}

/// Resolves overrides against the default layout of one canvas size.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    metrics: TemplateMetrics,
    defaults: BTreeMap<ElementId, DefaultLayout>,
}

impl TemplateRenderer {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self { metrics: TemplateMetrics::new(size), defaults: default_layouts(size) }
    }

    #[must_use]
    pub fn metrics(&self) -> &TemplateMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn default_layout(&self, id: ElementId) -> DefaultLayout {
        self.defaults
            .get(&id)
            .copied()
            .unwrap_or(DefaultLayout { frame: Rect::default(), font_size: None })
    }

    /// The element's box at zero offset with size overrides applied.
    #[must_use]
    pub fn frame(&self, id: ElementId, layout: &ElementLayout) -> Rect {
        let base = self.default_layout(id).frame;
        match id.kind() {
            ElementKind::Image => Rect::new(
                base.x,
                base.y,
                layout.width().unwrap_or(base.w),
                layout.height().unwrap_or(base.h),
            ),
            ElementKind::Text => {
                let ratio = match (layout.font_size(), self.default_layout(id).font_size) {
                    (Some(f), Some(d)) if d > 0.0 => f / d,
                    _ => 1.0,
                };
                Rect::new(base.x, base.y, base.w, base.h * ratio)
            }
            ElementKind::Badge => {
                let s = layout.scale().unwrap_or(1.0);
                Rect::new(base.x, base.y, base.w * s, base.h * s)
            }
        }
    }

    /// Controller props for one element.
    #[must_use]
    pub fn props<'a>(
        &self,
        id: ElementId,
        layout: &'a ElementLayout,
        scale: CanvasScale,
        mode: RenderMode,
        selected: Option<ElementId>,
    ) -> ElementProps<'a> {
        ElementProps {
            id,
            layout,
            frame: self.frame(id, layout),
            scale,
            interactive: mode.is_interactive(),
            selected: selected == Some(id),
            defaults: self.default_layout(id).resize_defaults(),
        }
    }

    /// Resolve every element in paint order.
    ///
    /// Elements without a controller get a fresh one, which is what export
    /// and preview renders rely on.
    #[must_use]
    pub fn render(
        &self,
        overrides: &ElementOverrides,
        controllers: &BTreeMap<ElementId, ElementController>,
        scale: CanvasScale,
        mode: RenderMode,
        selected: Option<ElementId>,
    ) -> Vec<RenderedElement> {
        let idle = ElementController::new();
        ElementId::ALL
            .iter()
            .map(|&id| {
                let layout = overrides.get(id);
                let props = self.props(id, &layout, scale, mode, selected);
                let view = controllers.get(&id).unwrap_or(&idle).view(&props);
                RenderedElement {
                    id,
                    layout,
                    frame: props.frame,
                    font_size: layout.font_size().or(self.default_layout(id).font_size),
                    scale: layout.scale().unwrap_or(1.0),
                    view,
                }
            })
            .collect()
    }
}
