use super::*;
use crate::lattice::{GridCoord, LatticeConfig};
use crate::plaquette::Color;

fn grid() -> GridModel {
    GridModel::checkerboard(&LatticeConfig { cols: 9, rows: 9, spacing: 50.0, origin_x: 0.0, origin_y: 0.0 }).unwrap()
}

fn q(grid: &GridModel, col: i32, row: i32) -> QubitId {
    grid.qubit_at(GridCoord::new(col, row)).unwrap()
}

/// Square plaquette with corners (col,row) .. (col+2,row+2).
fn square(grid: &GridModel, col: i32, row: i32) -> PlaquetteHull {
    let ids = [q(grid, col, row), q(grid, col + 2, row), q(grid, col + 2, row + 2), q(grid, col, row + 2)];
    PlaquetteHull::build(grid, &ids, Color::PRIMARY).unwrap()
}

// =============================================================
// Qubits
// =============================================================

#[test]
fn click_on_qubit_hits_it() {
    let g = grid();
    let cam = Camera::default();
    assert_eq!(hit_test(Point::new(100.0, 100.0), &g, &[], &cam), Some(Hit::Qubit(q(&g, 2, 2))));
    assert_eq!(hit_test(Point::new(104.0, 97.0), &g, &[], &cam), Some(Hit::Qubit(q(&g, 2, 2))));
}

#[test]
fn click_between_qubits_hits_nothing() {
    let g = grid();
    let cam = Camera::default();
    assert_eq!(hit_test(Point::new(125.0, 125.0), &g, &[], &cam), None);
}

#[test]
fn qubit_radius_is_screen_space() {
    let g = grid();
    let zoomed_in = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 4.0 };
    // 8 world units is 32 screen pixels at zoom 4, outside the radius.
    assert_eq!(hit_test(Point::new(108.0, 100.0), &g, &[], &zoomed_in), None);
    let zoomed_out = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.5 };
    // 15 world units is 7.5 screen pixels at zoom 0.5, inside the radius.
    assert_eq!(hit_test(Point::new(115.0, 100.0), &g, &[], &zoomed_out), Some(Hit::Qubit(q(&g, 2, 2))));
}

// =============================================================
// Plaquettes
// =============================================================

#[test]
fn click_inside_plaquette_hits_it() {
    let g = grid();
    let p = square(&g, 0, 0);
    let hit = hit_test(Point::new(60.0, 30.0), &g, std::slice::from_ref(&p), &Camera::default());
    assert_eq!(hit, Some(Hit::Plaquette(p.id)));
}

#[test]
fn qubit_wins_over_plaquette() {
    let g = grid();
    let p = square(&g, 0, 0);
    // The center (1,1) is a qubit inside the square.
    let hit = hit_test(Point::new(50.0, 50.0), &g, std::slice::from_ref(&p), &Camera::default());
    assert_eq!(hit, Some(Hit::Qubit(q(&g, 1, 1))));
}

#[test]
fn topmost_plaquette_wins() {
    let g = grid();
    let bottom = square(&g, 0, 0);
    let top = square(&g, 1, 1);
    let stack = [bottom.clone(), top.clone()];
    let hit = hit_test(Point::new(80.0, 80.0), &g, &stack, &Camera::default());
    assert_eq!(hit, Some(Hit::Plaquette(top.id)));
    // Only the bottom one covers this point.
    let hit = hit_test(Point::new(20.0, 30.0), &g, &stack, &Camera::default());
    assert_eq!(hit, Some(Hit::Plaquette(bottom.id)));
}

#[test]
fn click_outside_everything_hits_nothing() {
    let g = grid();
    let p = square(&g, 0, 0);
    assert_eq!(hit_test(Point::new(300.0, 330.0), &g, &[p], &Camera::default()), None);
}
