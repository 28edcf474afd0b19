#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_add_and_sub() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(10.0, 20.0);
    assert_eq!(a + b, Point::new(11.0, 22.0));
    assert_eq!(b - a, Point::new(9.0, 18.0));
}

// --- Rect ---

#[test]
fn rect_edges() {
    let r = Rect::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(r.right(), 110.0);
    assert_eq!(r.bottom(), 70.0);
    assert_eq!(r.origin(), Point::new(10.0, 20.0));
    assert_eq!(r.center(), Point::new(60.0, 45.0));
}

#[test]
fn rect_contains_edges_inclusive() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(Point::new(0.0, 0.0)));
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(r.contains(Point::new(5.0, 5.0)));
    assert!(!r.contains(Point::new(10.1, 5.0)));
    assert!(!r.contains(Point::new(5.0, -0.1)));
}

#[test]
fn rect_inflate_grows_every_side() {
    let r = Rect::new(10.0, 10.0, 20.0, 20.0).inflate(5.0);
    assert_eq!(r, Rect::new(5.0, 5.0, 30.0, 30.0));
}

// --- CanvasScale ---

#[test]
fn scale_default_is_identity() {
    assert_eq!(CanvasScale::default().get(), 1.0);
}

#[test]
fn scale_zero_is_floored() {
    assert_eq!(CanvasScale::new(0.0).get(), 0.1);
}

#[test]
fn scale_negative_is_floored() {
    assert_eq!(CanvasScale::new(-3.0).get(), 0.1);
}

#[test]
fn scale_nan_is_floored() {
    assert_eq!(CanvasScale::new(f64::NAN).get(), 0.1);
}

#[test]
fn scale_above_floor_is_kept() {
    assert_eq!(CanvasScale::new(0.5).get(), 0.5);
}

#[test]
fn screen_delta_divides_by_scale() {
    let s = CanvasScale::new(0.5);
    let d = s.screen_delta_to_canvas(Point::new(100.0, 100.0), Point::new(110.0, 95.0));
    assert!(point_approx_eq(d, Point::new(20.0, -10.0)));
}

#[test]
fn screen_delta_at_zero_scale_is_finite() {
    let s = CanvasScale::new(0.0);
    let d = s.screen_delta_to_canvas(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
    assert!(d.x.is_finite());
    assert!(approx_eq(d.x, 10.0));
}

#[test]
fn ui_px_is_scale_invariant_on_screen() {
    for raw in [0.25, 0.5, 1.0, 2.0, 4.0] {
        let s = CanvasScale::new(raw);
        assert!(approx_eq(s.ui_px(10.0) * s.get(), 10.0));
    }
}

#[test]
fn scale_serde_floors_on_read() {
    let s: CanvasScale = serde_json::from_str("0").unwrap();
    assert_eq!(s.get(), 0.1);
    assert_eq!(serde_json::to_string(&CanvasScale::new(0.5)).unwrap(), "0.5");
}

// --- fit_scale ---

#[test]
fn fit_scale_limited_by_height() {
    let s = fit_scale(Size::new(1080.0, 1920.0), Size::new(800.0, 960.0));
    assert!(approx_eq(s.get(), 0.5));
}

#[test]
fn fit_scale_limited_by_width() {
    let s = fit_scale(Size::new(1280.0, 720.0), Size::new(640.0, 2000.0));
    assert!(approx_eq(s.get(), 0.5));
}

#[test]
fn fit_scale_degenerate_canvas_is_identity() {
    let s = fit_scale(Size::new(0.0, 100.0), Size::new(640.0, 480.0));
    assert_eq!(s.get(), 1.0);
}
