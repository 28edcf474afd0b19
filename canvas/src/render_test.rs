#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::LayoutPatch;
use crate::sizes::{AD_SIZES, find_size};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn size_of(id: &str) -> Size {
    find_size(id).unwrap().size()
}

// =============================================================
// Metrics
// =============================================================

#[test]
fn square_metrics() {
    let m = TemplateMetrics::new(size_of("meta-feed"));
    assert_eq!(m.class, LayoutClass::Square);
    assert!(approx_eq(m.scale, 1080.0 / 563.0));
    assert_eq!(m.pad, 54.0);
    assert!(approx_eq(m.hero_width, 594.0));
    assert_eq!(m.fonts.headline, 101.0);
    assert_eq!(m.fonts.subtitle, 33.0);
    assert_eq!(m.fonts.target_audience, 105.0);
}

#[test]
fn wide_metrics_use_full_font_factors() {
    let m = TemplateMetrics::new(size_of("youtube-thumb"));
    assert_eq!(m.class, LayoutClass::Wide);
    assert_eq!(m.fonts.headline, 79.0);
    assert_eq!(m.fonts.badge, 18.0);
    assert!(approx_eq(m.hero_width, 1280.0 * 0.62));
}

#[test]
fn tall_metrics_shrink_headline() {
    let m = TemplateMetrics::new(size_of("story"));
    assert_eq!(m.class, LayoutClass::Tall);
    assert_eq!(m.fonts.headline, (62.0 * (1080.0 / 563.0) * 0.75_f64).round());
    assert_eq!(m.hero_width, 540.0);
}

// =============================================================
// Default layouts
// =============================================================

#[test]
fn wide_hero_bleeds_above_top_edge() {
    let d = default_layouts(size_of("youtube-thumb"));
    let hero = d[&ElementId::HeroImage].frame;
    assert_eq!(hero.y, -13.0);
    assert!(approx_eq(hero.right(), 1280.0));
    assert!(approx_eq(hero.bottom(), 720.0 - 51.0));
}

#[test]
fn square_hero_sits_above_strip_margin() {
    let hero = default_layouts(size_of("meta-feed"))[&ElementId::HeroImage].frame;
    assert!(approx_eq(hero.x, 486.0) && approx_eq(hero.w, 594.0));
    assert_eq!((hero.y, hero.h), (193.0, 810.0));
}

#[test]
fn tall_hero_is_centered_between_text_and_strip() {
    let d = default_layouts(size_of("story"));
    let hero = d[&ElementId::HeroImage].frame;
    let usp = d[&ElementId::UspStrip].frame;
    assert_eq!(hero.x, 270.0);
    assert!(hero.y > d[&ElementId::TargetAudience].frame.bottom());
    assert!(approx_eq(hero.bottom(), usp.y));
}

#[test]
fn usp_strip_spans_bottom_edge_for_every_size() {
    for size in AD_SIZES {
        let s = size.size();
        let usp = default_layouts(s)[&ElementId::UspStrip].frame;
        assert_eq!(usp.x, 0.0, "{}", size.id);
        assert_eq!(usp.w, s.width, "{}", size.id);
        assert!(approx_eq(usp.bottom(), s.height), "{}", size.id);
    }
}

#[test]
fn text_blocks_stack_downwards() {
    for size in AD_SIZES {
        let d = default_layouts(size.size());
        let headline = d[&ElementId::Headline].frame;
        let subtitle = d[&ElementId::Subtitle].frame;
        let audience = d[&ElementId::TargetAudience].frame;
        assert!(headline.bottom() <= subtitle.y, "{}", size.id);
        assert!(subtitle.bottom() <= audience.y, "{}", size.id);
        assert!(d[&ElementId::Logo].frame.bottom() <= headline.y, "{}", size.id);
    }
}

#[test]
fn only_text_defaults_carry_font_size() {
    let d = default_layouts(size_of("portrait"));
    for (id, layout) in &d {
        assert_eq!(layout.font_size.is_some(), id.kind() == ElementKind::Text, "{id}");
    }
    assert_eq!(d.len(), ElementId::ALL.len());
}

#[test]
fn resize_defaults_come_from_default_frame() {
    let d = default_layouts(size_of("meta-feed"));
    let r = d[&ElementId::HeroImage].resize_defaults();
    assert!(approx_eq(r.width.unwrap(), 594.0));
    assert_eq!((r.height, r.font_size), (Some(810.0), None));
    assert_eq!(d[&ElementId::Headline].resize_defaults().font_size, Some(101.0));
}

// =============================================================
// Override shadowing
// =============================================================

#[test]
fn image_override_replaces_default_size() {
    let renderer = TemplateRenderer::new(size_of("meta-feed"));
    let mut overrides = ElementOverrides::new();
    overrides.apply(ElementId::HeroImage, &LayoutPatch::size(300.0, 400.0));
    let frame = renderer.frame(ElementId::HeroImage, &overrides.get(ElementId::HeroImage));
    assert!(approx_eq(frame.x, 486.0));
    assert_eq!((frame.y, frame.w, frame.h), (193.0, 300.0, 400.0));
    assert!(approx_eq(renderer.default_layout(ElementId::HeroImage).frame.w, 594.0));
}

#[test]
fn text_and_badge_frames_follow_their_overrides() {
    let renderer = TemplateRenderer::new(size_of("meta-feed"));
    let base = renderer.default_layout(ElementId::Headline).frame;
    let text = ElementLayout::Text { offset_x: 0.0, offset_y: 0.0, font_size: Some(202.0) };
    assert!(approx_eq(renderer.frame(ElementId::Headline, &text).h, base.h * 2.0));

    let logo = renderer.default_layout(ElementId::Logo).frame;
    let badge = ElementLayout::Badge { offset_x: 0.0, offset_y: 0.0, scale: Some(1.5) };
    let frame = renderer.frame(ElementId::Logo, &badge);
    assert!(approx_eq(frame.w, logo.w * 1.5));
    assert!(approx_eq(frame.h, logo.h * 1.5));
}

// =============================================================
// Render
// =============================================================

#[test]
fn export_render_is_static_even_when_selected() {
    let renderer = TemplateRenderer::new(size_of("landscape"));
    let mut overrides = ElementOverrides::new();
    overrides.apply(ElementId::Badge, &LayoutPatch::offset(15.0, -5.0));
    for mode in [RenderMode::Export, RenderMode::Preview] {
        let out = renderer.render(&overrides, &BTreeMap::new(), CanvasScale::default(), mode, Some(ElementId::Badge));
        assert_eq!(out.len(), 7);
        for el in &out {
            assert!(matches!(el.view, ElementView::Static { .. }), "{:?} in {mode:?}", el.id);
        }
        let badge = out.iter().find(|e| e.id == ElementId::Badge).unwrap();
        assert_eq!(badge.view.translate(), crate::camera::Point::new(15.0, -5.0));
    }
}

#[test]
fn edit_render_lifts_selected_element() {
    let renderer = TemplateRenderer::new(size_of("meta-feed"));
    let out = renderer.render(
        &ElementOverrides::new(),
        &BTreeMap::new(),
        CanvasScale::new(0.5),
        RenderMode::Edit,
        Some(ElementId::Subtitle),
    );
    for el in &out {
        let ElementView::Interactive { z_index, .. } = el.view else {
            panic!("expected interactive view for {}", el.id);
        };
        assert_eq!(z_index.is_some(), el.id == ElementId::Subtitle);
    }
}

#[test]
fn render_resolves_effective_values() {
    let renderer = TemplateRenderer::new(size_of("meta-feed"));
    let mut overrides = ElementOverrides::new();
    overrides.apply(ElementId::UspStrip, &LayoutPatch::scale(0.8));
    let out = renderer.render(&overrides, &BTreeMap::new(), CanvasScale::default(), RenderMode::Export, None);
    let usp = out.iter().find(|e| e.id == ElementId::UspStrip).unwrap();
    assert_eq!(usp.scale, 0.8);
    let headline = out.iter().find(|e| e.id == ElementId::Headline).unwrap();
    assert_eq!(headline.font_size, Some(101.0));
    assert_eq!(headline.scale, 1.0);
}

#[test]
fn only_edit_mode_is_interactive() {
    assert!(RenderMode::Edit.is_interactive());
    assert!(!RenderMode::Export.is_interactive());
    assert!(!RenderMode::Preview.is_interactive());
}
