#![allow(clippy::float_cmp)]

use super::*;
use proptest::prelude::*;
use crate::lattice::{GridCoord, LatticeConfig};
use crate::plaquette::Color;

fn grid() -> GridModel {
    GridModel::checkerboard(&LatticeConfig { cols: 7, rows: 7, spacing: 50.0, origin_x: 0.0, origin_y: 0.0 }).unwrap()
}

fn q(grid: &GridModel, col: i32, row: i32) -> QubitId {
    grid.qubit_at(GridCoord::new(col, row)).unwrap()
}

fn l_shape(g: &GridModel) -> Vec<QubitId> {
    vec![q(g, 0, 0), q(g, 0, 2), q(g, 2, 2)]
}

// =============================================================
// direction_from_drag
// =============================================================

#[test]
fn drag_below_threshold_has_no_direction() {
    assert_eq!(direction_from_drag(10.0, 5.0, 30.0), None);
    assert_eq!(direction_from_drag(-30.0, 0.0, 30.0), None);
    assert_eq!(direction_from_drag(0.0, 0.0, 30.0), None);
}

#[test]
fn horizontal_drag_directions() {
    assert_eq!(direction_from_drag(31.0, 5.0, 30.0), Some(Direction::Right));
    assert_eq!(direction_from_drag(-40.0, 20.0, 30.0), Some(Direction::Left));
}

#[test]
fn vertical_drag_directions_are_y_down() {
    assert_eq!(direction_from_drag(5.0, 31.0, 30.0), Some(Direction::Down));
    assert_eq!(direction_from_drag(-5.0, -40.0, 30.0), Some(Direction::Up));
}

#[test]
fn diagonal_drag_resolves_to_vertical() {
    assert_eq!(direction_from_drag(50.0, 50.0, 30.0), Some(Direction::Down));
    assert_eq!(direction_from_drag(-50.0, -50.0, 30.0), Some(Direction::Up));
}

#[test]
fn dominant_axis_must_cross_threshold() {
    // dy is under the threshold and dominates, so nothing happens even though |dx| > 0.
    assert_eq!(direction_from_drag(20.0, 25.0, 30.0), None);
}

// =============================================================
// extreme_qubit / step_diff
// =============================================================

#[test]
fn extreme_picks_member_farthest_in_direction() {
    let g = grid();
    let ids = l_shape(&g);
    assert_eq!(extreme_qubit(&g, &ids, Direction::Right), Some(q(&g, 2, 2)));
    assert_eq!(extreme_qubit(&g, &ids, Direction::Left), Some(q(&g, 0, 0)));
    assert_eq!(extreme_qubit(&g, &ids, Direction::Up), Some(q(&g, 0, 0)));
    assert_eq!(extreme_qubit(&g, &ids, Direction::Down), Some(q(&g, 0, 2)));
    assert_eq!(extreme_qubit(&g, &[], Direction::Down), None);
}

#[test]
fn step_diff_follows_lattice_spacing() {
    let g = grid();
    assert_eq!(step_diff(&g, q(&g, 2, 2), Direction::Right).unwrap(), Point::new(100.0, 0.0));
    assert_eq!(step_diff(&g, q(&g, 2, 2), Direction::Up).unwrap(), Point::new(0.0, -100.0));
}

#[test]
fn step_diff_on_edge_fails() {
    let g = grid();
    let corner = q(&g, 6, 6);
    let err = step_diff(&g, corner, Direction::Right).unwrap_err();
    assert_eq!(err, ExtendError::NeighborNotFound { qubit: corner, direction: Direction::Right });
}

// =============================================================
// clone_qubits / clone_plaquette
// =============================================================

#[test]
fn l_shape_dragged_right_maps_each_member_to_its_right_neighbor() {
    let g = grid();
    let ids = l_shape(&g);
    let shifted = clone_qubits(&g, &ids, Direction::Right).unwrap();
    assert_eq!(shifted.len(), ids.len());
    for (orig, new) in ids.iter().zip(&shifted) {
        assert_eq!(g.neighbor(*orig, Direction::Right), Some(*new));
    }
}

#[test]
fn cloned_hull_is_translated_copy() {
    let g = grid();
    let source = PlaquetteHull::build(&g, &l_shape(&g), Color::PRIMARY).unwrap();
    let clone = clone_plaquette(&g, &source, Direction::Right).unwrap();
    assert_ne!(clone.id, source.id);
    assert_eq!(clone.color, Color::SECONDARY);
    assert_eq!(clone.boundary.len(), source.boundary.len());
    for (a, b) in source.boundary.iter().zip(&clone.boundary) {
        assert_eq!(b.x - a.x, 100.0);
        assert_eq!(b.y, a.y);
    }
}

#[test]
fn clone_then_opposite_round_trips() {
    let g = grid();
    let ids = vec![q(&g, 2, 2), q(&g, 4, 2), q(&g, 3, 3), q(&g, 2, 4)];
    for dir in Direction::ALL {
        let there = clone_qubits(&g, &ids, dir).unwrap();
        let back = clone_qubits(&g, &there, dir.opposite()).unwrap();
        assert_eq!(back, ids, "round trip failed for {dir:?}");
    }
}

#[test]
fn clone_on_fractional_spacing_matches_every_member() {
    // Pixel steps at 12.7px differ by rounding from column to column.
    let g = GridModel::checkerboard(&LatticeConfig { cols: 11, rows: 11, spacing: 12.7, origin_x: 3.3, origin_y: 0.0 }).unwrap();
    let ids = vec![q(&g, 3, 3), q(&g, 7, 3), q(&g, 5, 5), q(&g, 3, 7)];
    for dir in Direction::ALL {
        let there = clone_qubits(&g, &ids, dir).unwrap();
        assert_eq!(clone_qubits(&g, &there, dir.opposite()).unwrap(), ids, "{dir:?}");
    }
}

#[test]
fn clone_past_edge_fails_without_partial_result() {
    let g = grid();
    let ids = vec![q(&g, 4, 0), q(&g, 6, 0), q(&g, 6, 2)];
    let err = clone_qubits(&g, &ids, Direction::Right).unwrap_err();
    assert!(matches!(err, ExtendError::NeighborNotFound { direction: Direction::Right, .. }));
    assert_eq!(err.error_code(), "E_NEIGHBOR_NOT_FOUND");
}

#[test]
fn clone_with_extreme_member_on_edge_fails() {
    let g = grid();
    // The topmost member is already on row 0, so the step cannot even be measured.
    let ids = vec![q(&g, 2, 0), q(&g, 4, 2), q(&g, 2, 2)];
    let err = clone_qubits(&g, &ids, Direction::Up).unwrap_err();
    assert_eq!(err, ExtendError::NeighborNotFound { qubit: q(&g, 2, 0), direction: Direction::Up });
}

#[test]
fn clone_of_empty_set_fails() {
    let g = grid();
    assert_eq!(clone_qubits(&g, &[], Direction::Up).unwrap_err(), ExtendError::EmptyPlaquette);
}

#[test]
fn clone_leaves_source_untouched() {
    let g = grid();
    let source = PlaquetteHull::build(&g, &l_shape(&g), Color::PRIMARY).unwrap();
    let snapshot = source.clone();
    clone_plaquette(&g, &source, Direction::Down).unwrap();
    assert_eq!(source, snapshot);
}

#[test]
fn clone_on_sparse_lattice_uses_links_not_offsets() {
    // A lattice with a hole at (2,2): the member at (0,2) has no right neighbor.
    let coords = [
        GridCoord::new(0, 0),
        GridCoord::new(2, 0),
        GridCoord::new(4, 0),
        GridCoord::new(0, 2),
        GridCoord::new(4, 2),
    ];
    let g = GridModel::from_coords(coords, 10.0, Point::new(0.0, 0.0)).unwrap();
    let ids = vec![q(&g, 0, 0), q(&g, 2, 0), q(&g, 0, 2)];
    let err = clone_qubits(&g, &ids, Direction::Right).unwrap_err();
    assert_eq!(err, ExtendError::NeighborNotFound { qubit: q(&g, 0, 2), direction: Direction::Right });
}

// =============================================================
// Properties
// =============================================================

/// Distinct checkerboard sites `(2c + r % 2, r)` inside an 11x11 lattice.
fn site_set() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::btree_set((0i32..5, 0i32..11), 1..8)
        .prop_map(|set| set.into_iter().map(|(c, r)| (2 * c + r % 2, r)).collect())
}

proptest! {
    #[test]
    fn prop_clone_then_opposite_round_trips(
        sites in site_set(),
        dir in prop::sample::select(Direction::ALL.to_vec()),
        spacing in prop::sample::select(vec![50.0, 12.7, 0.1, 33.3]),
    ) {
        let g = GridModel::checkerboard(&LatticeConfig { cols: 11, rows: 11, spacing, origin_x: 0.0, origin_y: 0.0 }).unwrap();
        let ids: Vec<QubitId> = sites.iter().map(|&(c, r)| q(&g, c, r)).collect();
        if let Ok(there) = clone_qubits(&g, &ids, dir) {
            prop_assert_eq!(there.len(), ids.len());
            prop_assert_eq!(clone_qubits(&g, &there, dir.opposite()), Ok(ids));
        }
    }

    #[test]
    fn prop_clone_fails_only_at_the_edge(
        sites in site_set(),
        dir in prop::sample::select(Direction::ALL.to_vec()),
    ) {
        let g = GridModel::checkerboard(&LatticeConfig { cols: 11, rows: 11, spacing: 12.7, origin_x: 0.0, origin_y: 0.0 }).unwrap();
        let ids: Vec<QubitId> = sites.iter().map(|&(c, r)| q(&g, c, r)).collect();
        let fits = sites.iter().all(|&(c, r)| {
            let (dc, dr) = dir.offset();
            g.qubit_at(GridCoord::new(c + dc, r + dr)).is_some()
        });
        prop_assert_eq!(clone_qubits(&g, &ids, dir).is_ok(), fits);
    }
}
