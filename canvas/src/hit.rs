#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Camera;
use crate::consts::QUBIT_HIT_RADIUS_PX;
use crate::geometry::{Point, point_in_polygon};
use crate::lattice::{GridModel, QubitId};
use crate::plaquette::{PlaquetteHull, PlaquetteId};

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A qubit within the click radius.
    Qubit(QubitId),
    /// The topmost plaquette whose outline contains the point.
    Plaquette(PlaquetteId),
}

/// Test what lies under `world_pt`.
///
/// Qubits win over plaquettes since every outline vertex is a qubit. The qubit
/// radius is fixed in screen pixels, so it shrinks in world units as the camera
/// zooms in. Plaquettes are checked from the top of the draw order down.
#[must_use]
pub fn hit_test(world_pt: Point, grid: &GridModel, plaquettes: &[PlaquetteHull], camera: &Camera) -> Option<Hit> {
    let radius = camera.screen_dist_to_world(QUBIT_HIT_RADIUS_PX);
    if let Some(id) = grid.nearest_qubit(world_pt, radius) {
        return Some(Hit::Qubit(id));
    }
    plaquettes
        .iter()
        .rev()
        .find(|p| point_in_polygon(world_pt, &p.boundary))
        .map(|p| Hit::Plaquette(p.id))
}
