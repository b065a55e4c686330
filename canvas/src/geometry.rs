//! Plane geometry on canvas coordinates.
//!
//! All coordinates use the canvas convention: x grows rightward and y grows
//! downward. Predicates that talk about orientation ("counterclockwise") are
//! phrased in the conventional y-up sense and compensate for the flipped axis
//! internally, so callers never negate anything themselves.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Bit-exact key for hashing and deduplication. `-0.0` folds into `0.0`.
    #[must_use]
    pub fn key(self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

/// Turn test for the path `p → q → r` in y-down coordinates.
///
/// Positive means a counterclockwise turn as seen on screen, negative means
/// clockwise, and zero means the three points are collinear.
#[must_use]
pub fn ccw(p: Point, q: Point, r: Point) -> f64 {
    let v1 = q.sub(p);
    let v2 = r.sub(q);
    -(v1.x * v2.y - v1.y * v2.x)
}

/// Cross product of `a - origin` and `b - origin`. Zero when the three are collinear.
#[must_use]
pub fn cross_from(origin: Point, a: Point, b: Point) -> f64 {
    let va = a.sub(origin);
    let vb = b.sub(origin);
    va.x * vb.y - va.y * vb.x
}

/// Squared Euclidean distance.
#[must_use]
pub fn dist_sq(a: Point, b: Point) -> f64 {
    let d = a.sub(b);
    d.x * d.x + d.y * d.y
}

/// Unsigned polygon area by the shoelace formula.
#[must_use]
pub fn polygon_area(polygon: &[Point]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        twice += a.x * b.y - b.x * a.y;
    }
    (twice * 0.5).abs()
}

/// Even-odd ray cast. Points exactly on an edge may land on either side.
#[must_use]
pub fn point_in_polygon(pt: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > pt.y) != (b.y > pt.y) {
            let x_cross = (b.x - a.x) * (pt.y - a.y) / (b.y - a.y) + a.x;
            if pt.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
