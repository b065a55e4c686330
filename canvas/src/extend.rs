//! Plaquette extension: clone a plaquette one lattice step in a drag direction.
//!
//! DESIGN
//! ======
//! The shifted qubit set is found by following each member's stored neighbor
//! link, never by adding a pixel offset, because neighbor links are the only
//! adjacency the lattice guarantees. The step length is measured once on the
//! extreme member in the drag direction; every other member's neighbor must
//! move by that amount along the drag axis and not at all across it, up to
//! [`STEP_TOLERANCE`] of the step length. Any member without such a neighbor
//! fails the whole extension.

#[cfg(test)]
#[path = "extend_test.rs"]
mod extend_test;

use crate::error::ErrorCode;
use crate::geometry::Point;
use crate::lattice::{Direction, GridModel, QubitId};
use crate::plaquette::{PlaquetteError, PlaquetteHull};

/// Relative slack when comparing a member's move against the measured step.
pub const STEP_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtendError {
    #[error("plaquette has no qubits")]
    EmptyPlaquette,
    #[error("qubit {} has no {direction:?} neighbor; the clone would leave the lattice", qubit.0)]
    NeighborNotFound { qubit: QubitId, direction: Direction },
    #[error(transparent)]
    Plaquette(#[from] PlaquetteError),
}

impl ErrorCode for ExtendError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPlaquette => "E_EMPTY_PLAQUETTE",
            Self::NeighborNotFound { .. } => "E_NEIGHBOR_NOT_FOUND",
            Self::Plaquette(e) => e.error_code(),
        }
    }
}

/// Pick the drag direction, or `None` while the dominant axis is within `threshold`.
///
/// Horizontal wins only when `|dx| > |dy|`; a perfect diagonal counts as vertical.
#[must_use]
pub fn direction_from_drag(dx: f64, dy: f64, threshold: f64) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        if dx.abs() <= threshold {
            return None;
        }
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        if dy.abs() <= threshold {
            return None;
        }
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

/// Member lying farthest in `dir`. Ties go to the earliest member.
#[must_use]
pub fn extreme_qubit(grid: &GridModel, qubits: &[QubitId], dir: Direction) -> Option<QubitId> {
    let mut best: Option<(QubitId, f64)> = None;
    for id in qubits {
        let Some(p) = grid.position(*id) else {
            continue;
        };
        let score = match dir {
            Direction::Right => p.x,
            Direction::Left => -p.x,
            Direction::Down => p.y,
            Direction::Up => -p.y,
        };
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((*id, score));
        }
    }
    best.map(|(id, _)| id)
}

/// Offset from `extreme` to its neighbor in `dir`.
///
/// # Errors
///
/// `NeighborNotFound` when `extreme` sits on the lattice edge.
pub fn step_diff(grid: &GridModel, extreme: QubitId, dir: Direction) -> Result<Point, ExtendError> {
    let not_found = ExtendError::NeighborNotFound { qubit: extreme, direction: dir };
    let from = grid.position(extreme).ok_or_else(|| not_found.clone())?;
    let to = grid
        .neighbor(extreme, dir)
        .and_then(|n| grid.position(n))
        .ok_or(not_found)?;
    Ok(to.sub(from))
}

/// The member-for-member shifted qubit set, same length and order as `qubits`.
///
/// # Errors
///
/// `EmptyPlaquette` for an empty input, `NeighborNotFound` when any member
/// cannot move by the measured step.
pub fn clone_qubits(grid: &GridModel, qubits: &[QubitId], dir: Direction) -> Result<Vec<QubitId>, ExtendError> {
    let extreme = extreme_qubit(grid, qubits, dir).ok_or(ExtendError::EmptyPlaquette)?;
    let diff = step_diff(grid, extreme, dir)?;

    let mut shifted = Vec::with_capacity(qubits.len());
    for id in qubits {
        let not_found = || ExtendError::NeighborNotFound { qubit: *id, direction: dir };
        let from = grid.position(*id).ok_or_else(not_found)?;
        let next = grid.neighbor(*id, dir).ok_or_else(not_found)?;
        let to = grid.position(next).ok_or_else(not_found)?;
        let moved = to.sub(from);
        let scale = diff.x.abs().max(diff.y.abs());
        let matches = if dir.is_horizontal() {
            near(moved.x, diff.x, scale) && near(moved.y, 0.0, scale)
        } else {
            near(moved.y, diff.y, scale) && near(moved.x, 0.0, scale)
        };
        if !matches {
            return Err(not_found());
        }
        shifted.push(next);
    }
    Ok(shifted)
}

/// Equal up to rounding at the lattice's pixel scale.
fn near(a: f64, b: f64, scale: f64) -> bool {
    (a - b).abs() <= STEP_TOLERANCE * scale
}

/// Build a sibling plaquette one step over in `dir`, in the alternate color.
///
/// The source plaquette is not touched.
///
/// # Errors
///
/// Any [`ExtendError`] from [`clone_qubits`] or from rebuilding the hull.
pub fn clone_plaquette(grid: &GridModel, source: &PlaquetteHull, dir: Direction) -> Result<PlaquetteHull, ExtendError> {
    let shifted = clone_qubits(grid, &source.qubits, dir)?;
    let hull = PlaquetteHull::build(grid, &shifted, source.color.alternate())?;
    log::debug!("cloned plaquette {} {dir:?} as {}", source.id, hull.id);
    Ok(hull)
}
