#![allow(clippy::float_cmp)]

use super::*;
use proptest::prelude::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().map(|&(x, y)| pt(x, y)).collect()
}

// =============================================================
// Concrete scenarios
// =============================================================

#[test]
fn square_with_center_drops_interior_point() {
    let hull = build_hull(&pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (1.0, 1.0)])).unwrap();
    assert_eq!(hull, pts(&[(0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]));
}

#[test]
fn two_points_are_insufficient() {
    let err = build_hull(&pts(&[(0.0, 0.0), (1.0, 0.0)])).unwrap_err();
    assert_eq!(err, HullError::InsufficientPoints { found: 2 });
    assert_eq!(err.error_code(), "E_INSUFFICIENT_POINTS");
    assert!(err.to_string().contains("3+ qubits"));
}

#[test]
fn empty_input_is_insufficient() {
    assert_eq!(build_hull(&[]).unwrap_err(), HullError::InsufficientPoints { found: 0 });
}

#[test]
fn duplicates_do_not_count_toward_minimum() {
    let err = build_hull(&pts(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0)])).unwrap_err();
    assert_eq!(err, HullError::InsufficientPoints { found: 2 });
}

#[test]
fn three_collinear_points_are_degenerate() {
    let err = build_hull(&pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])).unwrap_err();
    assert_eq!(err, HullError::DegenerateHull);
    assert_eq!(err.error_code(), "E_DEGENERATE_HULL");
}

#[test]
fn vertical_collinear_points_are_degenerate() {
    let err = build_hull(&pts(&[(5.0, 0.0), (5.0, 10.0), (5.0, 20.0), (5.0, 30.0)])).unwrap_err();
    assert_eq!(err, HullError::DegenerateHull);
}

#[test]
fn diagonal_collinear_points_are_degenerate() {
    let err = build_hull(&pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])).unwrap_err();
    assert_eq!(err, HullError::DegenerateHull);
}

#[test]
fn triangle_kept_whole() {
    let hull = build_hull(&pts(&[(0.0, 0.0), (4.0, 4.0), (0.0, 4.0)])).unwrap();
    assert_eq!(hull, pts(&[(0.0, 4.0), (4.0, 4.0), (0.0, 0.0)]));
}

#[test]
fn anchor_ties_break_to_smallest_x() {
    let hull = build_hull(&pts(&[(4.0, 4.0), (0.0, 4.0), (2.0, 0.0)])).unwrap();
    assert_eq!(hull[0], pt(0.0, 4.0));
}

#[test]
fn collinear_edge_points_excluded() {
    // Midpoints on each side of the square must not appear.
    let hull = build_hull(&pts(&[
        (0.0, 0.0),
        (2.0, 0.0),
        (4.0, 0.0),
        (4.0, 2.0),
        (4.0, 4.0),
        (2.0, 4.0),
        (0.0, 4.0),
        (0.0, 2.0),
    ]))
    .unwrap();
    assert_eq!(hull, pts(&[(0.0, 4.0), (4.0, 4.0), (4.0, 0.0), (0.0, 0.0)]));
}

#[test]
fn shared_ray_keeps_only_farthest() {
    // (1,3) and (2,2) share a ray from the anchor (0,4); only (2,2) may survive.
    let hull = build_hull(&pts(&[(0.0, 4.0), (1.0, 3.0), (2.0, 2.0), (3.0, 4.0), (0.0, 0.0)])).unwrap();
    assert!(!hull.contains(&pt(1.0, 3.0)));
    assert!(hull.contains(&pt(2.0, 2.0)) || polygon_contains(&hull, pt(2.0, 2.0)));
}

#[test]
fn diamond_lattice_plaquette() {
    // Weight-4 plaquette on a checkerboard: data qubits around one ancilla.
    let hull = build_hull(&pts(&[(100.0, 0.0), (200.0, 100.0), (100.0, 200.0), (0.0, 100.0), (100.0, 100.0)])).unwrap();
    assert_eq!(hull, pts(&[(100.0, 200.0), (200.0, 100.0), (100.0, 0.0), (0.0, 100.0)]));
}

#[test]
fn fractional_spacing_collinear_is_degenerate() {
    // Sites (0,6), (2,4), (4,2) on a 12.7px lattice; products round off the exact line.
    let s = 12.7;
    let line = [pt(0.0 * s, 6.0 * s), pt(2.0 * s, 4.0 * s), pt(4.0 * s, 2.0 * s)];
    assert_eq!(build_hull(&line).unwrap_err(), HullError::DegenerateHull);
}

#[test]
fn tiny_spacing_collinear_is_degenerate() {
    let s = 0.1;
    let line = [pt(0.0 * s, 0.0 * s), pt(2.0 * s, 4.0 * s), pt(4.0 * s, 8.0 * s)];
    assert_eq!(build_hull(&line).unwrap_err(), HullError::DegenerateHull);
}

#[test]
fn fractional_spacing_edge_midpoints_excluded() {
    let s = 12.7;
    let raw = [(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (0.0, 4.0), (0.0, 2.0), (1.0, 3.0)];
    let cloud: Vec<Point> = raw.iter().map(|&(x, y)| pt(x * s, y * s)).collect();
    let hull = build_hull(&cloud).unwrap();
    assert_eq!(hull, vec![pt(0.0, 4.0 * s), pt(4.0 * s, 4.0 * s), pt(4.0 * s, 0.0), pt(0.0, 0.0)]);
}

#[test]
fn fractional_spacing_triangle_survives() {
    let s = 0.1;
    let hull = build_hull(&[pt(0.0, 0.0), pt(2.0 * s, 4.0 * s), pt(4.0 * s, 7.0 * s)]).unwrap();
    assert_eq!(hull.len(), 3);
}

// =============================================================
// Properties
// =============================================================

fn polygon_contains(hull: &[Point], p: Point) -> bool {
    (0..hull.len()).all(|i| ccw(hull[i], hull[(i + 1) % hull.len()], p) >= 0.0)
}

/// Integer-lattice clouds scaled by a spacing that need not be representable exactly.
fn cloud() -> impl Strategy<Value = Vec<Point>> {
    (prop::collection::vec((0i32..20, 0i32..20), 3..16), prop::sample::select(vec![1.0, 12.7, 0.1, 50.0]))
        .prop_map(|(raw, s)| raw.into_iter().map(|(x, y)| pt(f64::from(x) * s, f64::from(y) * s)).collect())
}

fn polygon_contains_within(hull: &[Point], p: Point, eps: f64) -> bool {
    (0..hull.len()).all(|i| ccw(hull[i], hull[(i + 1) % hull.len()], p) >= -eps)
}

proptest! {
    #[test]
    fn prop_hull_encloses_every_input_point(points in cloud()) {
        if let Ok(hull) = build_hull(&points) {
            let eps = collinear_epsilon(&points);
            for p in &points {
                prop_assert!(polygon_contains_within(&hull, *p, eps), "{:?} outside {:?}", p, hull);
            }
        }
    }

    #[test]
    fn prop_hull_vertices_are_input_points(points in cloud()) {
        if let Ok(hull) = build_hull(&points) {
            prop_assert!(hull.len() >= 3);
            prop_assert!(hull.len() <= points.len());
            for v in &hull {
                prop_assert!(points.contains(v));
            }
        }
    }

    #[test]
    fn prop_hull_turns_strictly_counterclockwise(points in cloud()) {
        if let Ok(hull) = build_hull(&points) {
            let eps = collinear_epsilon(&points);
            let n = hull.len();
            for i in 0..n {
                prop_assert!(ccw(hull[i], hull[(i + 1) % n], hull[(i + 2) % n]) > eps);
            }
        }
    }

    #[test]
    fn prop_hull_starts_at_anchor(points in cloud()) {
        if let Ok(hull) = build_hull(&points) {
            let max_y = points.iter().map(|p| p.y).fold(f64::MIN, f64::max);
            let min_x = points.iter().filter(|p| p.y == max_y).map(|p| p.x).fold(f64::MAX, f64::min);
            prop_assert_eq!(hull[0], pt(min_x, max_y));
        }
    }

    #[test]
    fn prop_hull_independent_of_input_order(points in cloud(), shift in 0usize..16) {
        let mut reversed = points.clone();
        reversed.reverse();
        let mut rotated = points.clone();
        rotated.rotate_left(shift % points.len());
        let a = build_hull(&points);
        prop_assert_eq!(&a, &build_hull(&reversed));
        prop_assert_eq!(&a, &build_hull(&rotated));
    }

    #[test]
    fn prop_hull_is_idempotent(points in cloud()) {
        if let Ok(hull) = build_hull(&points) {
            prop_assert_eq!(build_hull(&hull), Ok(hull));
        }
    }

    #[test]
    fn prop_collinear_sites_are_degenerate(
        start in (0i32..10, 0i32..10),
        step in (-3i32..=3, -3i32..=3),
        n in 3i32..8,
        s in prop::sample::select(vec![1.0, 12.7, 0.1, 0.3, 7.9]),
    ) {
        prop_assume!(step != (0, 0));
        let line: Vec<Point> = (0..n)
            .map(|k| pt(f64::from(start.0 + k * step.0) * s, f64::from(start.1 + k * step.1) * s))
            .collect();
        prop_assert_eq!(build_hull(&line), Err(HullError::DegenerateHull));
    }
}
