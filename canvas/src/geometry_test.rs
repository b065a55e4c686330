#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// ccw
// =============================================================

#[test]
fn ccw_positive_for_screen_counterclockwise_turn() {
    // Right along the bottom, then up the screen: a left turn on screen.
    assert!(ccw(pt(0.0, 2.0), pt(2.0, 2.0), pt(2.0, 0.0)) > 0.0);
}

#[test]
fn ccw_negative_for_screen_clockwise_turn() {
    assert!(ccw(pt(0.0, 0.0), pt(2.0, 0.0), pt(2.0, 2.0)) < 0.0);
}

#[test]
fn ccw_zero_for_collinear() {
    assert_eq!(ccw(pt(0.0, 0.0), pt(1.0, 1.0), pt(3.0, 3.0)), 0.0);
}

#[test]
fn cross_from_zero_on_shared_ray() {
    let o = pt(0.0, 4.0);
    assert_eq!(cross_from(o, pt(1.0, 3.0), pt(2.0, 2.0)), 0.0);
    assert!(cross_from(o, pt(1.0, 3.0), pt(2.0, 3.0)) != 0.0);
}

// =============================================================
// Point
// =============================================================

#[test]
fn key_folds_negative_zero() {
    assert_eq!(pt(-0.0, 1.0).key(), pt(0.0, 1.0).key());
    assert_ne!(pt(1.0, 0.0).key(), pt(0.0, 1.0).key());
}

#[test]
fn point_serde_shape() {
    let json = serde_json::to_value(pt(1.5, -2.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": -2.0 }));
}

#[test]
fn dist_sq_basic() {
    assert_eq!(dist_sq(pt(0.0, 0.0), pt(3.0, 4.0)), 25.0);
}

// =============================================================
// Polygons
// =============================================================

#[test]
fn area_of_square() {
    let square = [pt(0.0, 0.0), pt(2.0, 0.0), pt(2.0, 2.0), pt(0.0, 2.0)];
    assert_eq!(polygon_area(&square), 4.0);
}

#[test]
fn area_independent_of_winding() {
    let a = [pt(0.0, 0.0), pt(4.0, 0.0), pt(0.0, 3.0)];
    let b = [pt(0.0, 3.0), pt(4.0, 0.0), pt(0.0, 0.0)];
    assert_eq!(polygon_area(&a), 6.0);
    assert_eq!(polygon_area(&b), 6.0);
}

#[test]
fn area_of_segment_is_zero() {
    assert_eq!(polygon_area(&[pt(0.0, 0.0), pt(1.0, 0.0)]), 0.0);
    assert_eq!(polygon_area(&[pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0)]), 0.0);
}

#[test]
fn point_in_polygon_inside_and_outside() {
    let square = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)];
    assert!(point_in_polygon(pt(5.0, 5.0), &square));
    assert!(!point_in_polygon(pt(15.0, 5.0), &square));
    assert!(!point_in_polygon(pt(5.0, -1.0), &square));
}

#[test]
fn point_in_polygon_triangle() {
    let tri = [pt(0.0, 10.0), pt(10.0, 10.0), pt(0.0, 0.0)];
    assert!(point_in_polygon(pt(2.0, 8.0), &tri));
    assert!(!point_in_polygon(pt(8.0, 2.0), &tri));
}

#[test]
fn point_in_degenerate_polygon_is_false() {
    assert!(!point_in_polygon(pt(0.5, 0.0), &[pt(0.0, 0.0), pt(1.0, 0.0)]));
}
