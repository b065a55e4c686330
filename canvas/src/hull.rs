//! Convex hull construction for plaquette outlines.
//!
//! ALGORITHM
//! =========
//! Graham scan in canvas coordinates. The anchor is the point with the largest
//! y (visually lowest), ties going to the smallest x. Remaining points are
//! ordered by descending `atan2(y - anchor.y, x - anchor.x)`, which walks
//! right → up → left on screen, i.e. counterclockwise. Points sharing a polar
//! ray with the anchor collapse to the farthest one before the scan runs.
//! The scan pops while the last turn is not strictly counterclockwise, so
//! collinear edge points never survive.
//!
//! Lattice positions are `spacing * col`, so three collinear qubits on a
//! fractional spacing give a cross product of rounding noise rather than zero.
//! Every orientation and area test compares against [`COLLINEAR_TOLERANCE`]
//! scaled by the squared extent of the input.

#[cfg(test)]
#[path = "hull_test.rs"]
mod hull_test;

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::consts::MIN_PLAQUETTE_QUBITS;
use crate::error::ErrorCode;
use crate::geometry::{Point, ccw, cross_from, dist_sq, polygon_area};

/// Relative tolerance for collinearity, as a fraction of the squared input extent.
pub const COLLINEAR_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HullError {
    #[error("Plaquette requires 3+ qubits (got {found})")]
    InsufficientPoints { found: usize },
    #[error("Selected qubits are collinear; a plaquette needs a non-zero area")]
    DegenerateHull,
}

impl ErrorCode for HullError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientPoints { .. } => "E_INSUFFICIENT_POINTS",
            Self::DegenerateHull => "E_DEGENERATE_HULL",
        }
    }
}

/// Compute the counterclockwise convex hull of `points`, starting at the anchor.
///
/// Input order does not matter and coincident points count once.
///
/// # Errors
///
/// `InsufficientPoints` when fewer than three distinct points are given,
/// `DegenerateHull` when they are all collinear.
pub fn build_hull(points: &[Point]) -> Result<Vec<Point>, HullError> {
    let distinct = dedup_points(points);
    if distinct.len() < MIN_PLAQUETTE_QUBITS {
        return Err(HullError::InsufficientPoints { found: distinct.len() });
    }

    let anchor_idx = anchor_index(&distinct);
    let anchor = distinct[anchor_idx];
    let mut rest: Vec<Point> = distinct
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != anchor_idx)
        .map(|(_, p)| *p)
        .collect();

    let eps = collinear_epsilon(&distinct);
    sort_by_polar_angle(anchor, &mut rest);
    let rays = farthest_per_ray(anchor, &rest, eps);

    let mut stack: Vec<Point> = Vec::with_capacity(rays.len() + 1);
    stack.push(anchor);
    for candidate in rays {
        while stack.len() >= 2 && ccw(stack[stack.len() - 2], stack[stack.len() - 1], candidate) <= eps {
            stack.pop();
        }
        stack.push(candidate);
    }

    if stack.len() < MIN_PLAQUETTE_QUBITS || polygon_area(&stack) <= eps {
        log::debug!("hull degenerate: {} vertices from {} points", stack.len(), distinct.len());
        return Err(HullError::DegenerateHull);
    }
    Ok(stack)
}

/// Cross products and areas at or below this are treated as zero.
fn collinear_epsilon(points: &[Point]) -> f64 {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let extent = (max_x - min_x).max(max_y - min_y);
    COLLINEAR_TOLERANCE * extent * extent
}

/// Drop exact duplicates, keeping first occurrences in input order.
fn dedup_points(points: &[Point]) -> Vec<Point> {
    let mut seen = HashSet::with_capacity(points.len());
    points.iter().copied().filter(|p| seen.insert(p.key())).collect()
}

/// Largest y, then smallest x.
#[allow(clippy::float_cmp)]
fn anchor_index(points: &[Point]) -> usize {
    let mut best = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let b = points[best];
        if p.y > b.y || (p.y == b.y && p.x < b.x) {
            best = i;
        }
    }
    best
}

/// Descending polar angle around `anchor`; equal angles put the farther point first.
fn sort_by_polar_angle(anchor: Point, points: &mut [Point]) {
    points.sort_by(|a, b| {
        let ta = (a.y - anchor.y).atan2(a.x - anchor.x);
        let tb = (b.y - anchor.y).atan2(b.x - anchor.x);
        tb.partial_cmp(&ta)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                dist_sq(anchor, *b)
                    .partial_cmp(&dist_sq(anchor, *a))
                    .unwrap_or(Ordering::Equal)
            })
    });
}

/// Collapse runs of points on the same ray from `anchor` to the farthest member.
///
/// Every point lies in the half-plane at or above the anchor, so a near-zero
/// cross product means "same ray" unless the two points sit on opposite sides.
fn farthest_per_ray(anchor: Point, sorted: &[Point], eps: f64) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in sorted {
        match out.last_mut() {
            Some(last) if same_ray(anchor, *last, p, eps) => {
                if dist_sq(anchor, p) > dist_sq(anchor, *last) {
                    *last = p;
                }
            }
            _ => out.push(p),
        }
    }
    out
}

/// Near-zero cross product with a positive dot product.
fn same_ray(anchor: Point, a: Point, b: Point, eps: f64) -> bool {
    let va = a.sub(anchor);
    let vb = b.sub(anchor);
    cross_from(anchor, a, b).abs() <= eps && va.x * vb.x + va.y * vb.y > 0.0
}
