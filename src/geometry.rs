//! Geometry primitives shared by the viewport and drop-zone registry.
//!
//! Everything here is a pure function of its inputs. Rectangles are
//! origin + size, and containment is inclusive on all four edges.

use serde::{Deserialize, Serialize};

/// A point in either screen or logical space. The space is implied by context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when the rect has no area (or a NaN extent) and so can never be hit.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point_in_rect(point, *self)
    }

    /// Grow the rect by `pad` on every edge. A negative `pad` shrinks it; the
    /// caller is responsible for keeping the result non-degenerate.
    pub fn expand(&self, pad: f64) -> Rect {
        Rect {
            x: self.x - pad,
            y: self.y - pad,
            width: self.width + pad * 2.0,
            height: self.height + pad * 2.0,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Round `value` to the nearest multiple of `grid_size`, halves away from zero.
///
/// `grid_size` must be positive; callers validate it upstream.
#[inline]
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    debug_assert!(grid_size > 0.0, "grid size must be positive");
    (value / grid_size).round() * grid_size
}

/// Inclusive containment test. Degenerate rects never contain anything.
#[inline]
pub fn point_in_rect(point: Point, rect: Rect) -> bool {
    if rect.is_degenerate() {
        return false;
    }
    point.x >= rect.x && point.x <= rect.right() && point.y >= rect.y && point.y <= rect.bottom()
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
