//! Coordinate spaces: screen pixels versus canvas pixels.
//!
//! Pointer events arrive in screen pixels. Every layout value the controllers
//! emit is in canvas (unscaled) pixels. `CanvasScale` is the single conversion
//! between the two; it also sizes editing chrome so handles keep a constant
//! on-screen size however far the preview is zoomed.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::MIN_CANVAS_SCALE;

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Whether `pt` lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }

    /// The same rectangle grown by `by` on every side.
    #[must_use]
    pub fn inflate(&self, by: f64) -> Rect {
        Rect::new(self.x - by, self.y - by, self.w + by * 2.0, self.h + by * 2.0)
    }
}

/// Ratio of on-screen render size to true canvas pixel size.
///
/// Always at least [`MIN_CANVAS_SCALE`], so dividing by it is safe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct CanvasScale(f64);

impl CanvasScale {
    /// Wrap a raw scale, flooring zero, negative and NaN values.
    #[must_use]
    pub fn new(raw: f64) -> Self {
        Self(raw.max(MIN_CANVAS_SCALE))
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Multiplier that cancels the scale for constant on-screen sizes.
    #[must_use]
    pub fn inverse(self) -> f64 {
        1.0 / self.0
    }

    /// Convert a screen-pixel delta between two pointer positions into canvas pixels.
    #[must_use]
    pub fn screen_delta_to_canvas(self, from: Point, to: Point) -> Point {
        let d = to - from;
        Point::new(d.x / self.0, d.y / self.0)
    }

    /// Canvas-space length that renders as `px` screen pixels.
    #[must_use]
    pub fn ui_px(self, px: f64) -> f64 {
        px * self.inverse()
    }
}

impl Default for CanvasScale {
    fn default() -> Self {
        Self(1.0)
    }
}

impl From<f64> for CanvasScale {
    fn from(raw: f64) -> Self {
        Self::new(raw)
    }
}

impl From<CanvasScale> for f64 {
    fn from(scale: CanvasScale) -> Self {
        scale.0
    }
}

/// Largest scale at which `canvas` fits entirely inside `viewport`.
#[must_use]
pub fn fit_scale(canvas: Size, viewport: Size) -> CanvasScale {
    if canvas.width <= 0.0 || canvas.height <= 0.0 {
        return CanvasScale::default();
    }
    CanvasScale::new((viewport.width / canvas.width).min(viewport.height / canvas.height))
}
