#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn frame() -> Rect {
    Rect::new(100.0, 100.0, 200.0, 100.0)
}

// =============================================================
// ResizeAnchor
// =============================================================

#[test]
fn corners_are_corners() {
    for a in ResizeAnchor::CORNERS {
        assert!(a.is_corner());
    }
    for a in [ResizeAnchor::N, ResizeAnchor::E, ResizeAnchor::S, ResizeAnchor::W] {
        assert!(!a.is_corner());
    }
}

#[test]
fn all_contains_each_anchor_once() {
    for (i, a) in ResizeAnchor::ALL.iter().enumerate() {
        for (j, b) in ResizeAnchor::ALL.iter().enumerate() {
            assert_eq!(i == j, a == b);
        }
    }
}

#[test]
fn signs_follow_compass() {
    assert_eq!(ResizeAnchor::Se.horizontal_sign(), 1.0);
    assert_eq!(ResizeAnchor::Se.vertical_sign(), 1.0);
    assert_eq!(ResizeAnchor::Nw.horizontal_sign(), -1.0);
    assert_eq!(ResizeAnchor::Nw.vertical_sign(), -1.0);
    assert_eq!(ResizeAnchor::N.horizontal_sign(), 0.0);
    assert_eq!(ResizeAnchor::E.vertical_sign(), 0.0);
}

#[test]
fn unit_positions() {
    assert_eq!(ResizeAnchor::Nw.unit_position(), (0.0, 0.0));
    assert_eq!(ResizeAnchor::S.unit_position(), (0.5, 1.0));
    assert_eq!(ResizeAnchor::E.unit_position(), (1.0, 0.5));
}

#[test]
fn cursors() {
    assert_eq!(ResizeAnchor::Nw.cursor(), "nwse-resize");
    assert_eq!(ResizeAnchor::Se.cursor(), "nwse-resize");
    assert_eq!(ResizeAnchor::Ne.cursor(), "nesw-resize");
    assert_eq!(ResizeAnchor::Sw.cursor(), "nesw-resize");
    assert_eq!(ResizeAnchor::N.cursor(), "ns-resize");
    assert_eq!(ResizeAnchor::W.cursor(), "ew-resize");
}

#[test]
fn anchor_serde_lowercase() {
    assert_eq!(serde_json::to_string(&ResizeAnchor::Sw).unwrap(), "\"sw\"");
    let a: ResizeAnchor = serde_json::from_str("\"ne\"").unwrap();
    assert_eq!(a, ResizeAnchor::Ne);
    assert_eq!(ResizeAnchor::Ne.as_str(), "ne");
}

#[test]
fn handles_per_kind() {
    assert_eq!(handles_for(ElementKind::Image).len(), 8);
    assert_eq!(handles_for(ElementKind::Text), &ResizeAnchor::CORNERS);
    assert_eq!(handles_for(ElementKind::Badge), &ResizeAnchor::CORNERS);
}

// =============================================================
// Chrome
// =============================================================

#[test]
fn chrome_at_unit_scale_is_screen_pixels() {
    let c = Chrome::for_scale(CanvasScale::new(1.0));
    assert_eq!(c.handle, 10.0);
    assert_eq!(c.border, 2.0);
    assert_eq!(c.delete_button, 24.0);
}

#[test]
fn chrome_on_screen_size_is_scale_invariant() {
    let at_1 = CanvasScale::new(1.0);
    let at_2 = CanvasScale::new(2.0);
    let c1 = Chrome::for_scale(at_1);
    let c2 = Chrome::for_scale(at_2);
    assert!(approx_eq(c1.handle * at_1.get(), c2.handle * at_2.get()));
    assert!(approx_eq(c1.border * at_1.get(), c2.border * at_2.get()));
    assert!(approx_eq(c1.delete_button * at_1.get(), c2.delete_button * at_2.get()));
}

#[test]
fn chrome_at_floored_scale_is_bounded() {
    let c = Chrome::for_scale(CanvasScale::new(0.0));
    assert!(approx_eq(c.handle, 100.0));
}

#[test]
fn handle_rect_is_centered_on_anchor() {
    let c = Chrome::for_scale(CanvasScale::new(1.0));
    let r = c.handle_rect(frame(), ResizeAnchor::Se);
    assert_eq!(r.center(), Point::new(300.0, 200.0));
    assert_eq!(r.w, 10.0);
    let n = c.handle_rect(frame(), ResizeAnchor::N);
    assert_eq!(n.center(), Point::new(200.0, 100.0));
}

#[test]
fn delete_button_overhangs_top_right() {
    let c = Chrome::for_scale(CanvasScale::new(1.0));
    let r = c.delete_button_rect(frame());
    assert!(approx_eq(r.y, 100.0 - 14.4));
    assert!(approx_eq(r.right(), 300.0 + 14.4));
}

#[test]
fn border_rect_wraps_frame() {
    let c = Chrome::for_scale(CanvasScale::new(1.0));
    assert_eq!(c.border_rect(frame()), Rect::new(98.0, 98.0, 204.0, 104.0));
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn hit_body() {
    let hit = hit_test(Point::new(200.0, 150.0), frame(), CanvasScale::default(), &ResizeAnchor::CORNERS, false);
    assert_eq!(hit, Some(HitPart::Body));
}

#[test]
fn hit_nothing_outside() {
    let hit = hit_test(Point::new(10.0, 10.0), frame(), CanvasScale::default(), &ResizeAnchor::CORNERS, true);
    assert_eq!(hit, None);
}

#[test]
fn hit_corner_handle_beats_body() {
    let hit = hit_test(Point::new(298.0, 198.0), frame(), CanvasScale::default(), &ResizeAnchor::CORNERS, false);
    assert_eq!(hit, Some(HitPart::ResizeHandle(ResizeAnchor::Se)));
}

#[test]
fn hit_handle_just_outside_frame() {
    let hit = hit_test(Point::new(96.0, 96.0), frame(), CanvasScale::default(), &ResizeAnchor::CORNERS, false);
    assert_eq!(hit, Some(HitPart::ResizeHandle(ResizeAnchor::Nw)));
}

#[test]
fn edge_handles_only_when_offered() {
    let pt = Point::new(200.0, 100.0);
    let with_edges = hit_test(pt, frame(), CanvasScale::default(), &ResizeAnchor::ALL, false);
    assert_eq!(with_edges, Some(HitPart::ResizeHandle(ResizeAnchor::N)));
    let corners_only = hit_test(pt, frame(), CanvasScale::default(), &ResizeAnchor::CORNERS, false);
    assert_eq!(corners_only, Some(HitPart::Body));
}

#[test]
fn delete_button_beats_handles() {
    let c = Chrome::for_scale(CanvasScale::default());
    let center = c.delete_button_rect(frame()).center();
    let hit = hit_test(center, frame(), CanvasScale::default(), &ResizeAnchor::CORNERS, true);
    assert_eq!(hit, Some(HitPart::DeleteButton));
}

#[test]
fn handle_slop_shrinks_in_canvas_space_when_zoomed_in() {
    // At 4x zoom the handle is 2.5 canvas px plus 1 px slop on each side.
    let scale = CanvasScale::new(4.0);
    let near = hit_test(Point::new(302.0, 202.0), frame(), scale, &ResizeAnchor::CORNERS, false);
    assert_eq!(near, Some(HitPart::ResizeHandle(ResizeAnchor::Se)));
    let far = hit_test(Point::new(304.0, 204.0), frame(), scale, &ResizeAnchor::CORNERS, false);
    assert_eq!(far, None);
}
