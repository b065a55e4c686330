//! Qubit lattice: sparse grid of qubit sites and their directional neighbors.
//!
//! DESIGN
//! ======
//! Nodes live in one flat `Vec`, addressed by [`QubitId`]. A coordinate map
//! built at construction resolves `coord ± NEIGHBOR_STRIDE` once per node, and
//! the resulting neighbor ids are stored on the node. Links are indices, never
//! references, so the graph has no ownership cycles and serializes as-is.

#[cfg(test)]
#[path = "lattice_test.rs"]
mod lattice_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_GRID_COORD, NEIGHBOR_STRIDE};
use crate::error::ErrorCode;
use crate::geometry::{Point, dist_sq};

/// Integer lattice coordinate. Pixel position is `origin + coord * spacing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub col: i32,
    pub row: i32,
}

impl GridCoord {
    #[must_use]
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Coordinate one neighbor step away in `dir`, `None` past the `i32` range.
    #[must_use]
    pub fn step(self, dir: Direction) -> Option<Self> {
        let (dc, dr) = dir.offset();
        Some(Self { col: self.col.checked_add(dc)?, row: self.row.checked_add(dr)? })
    }

    /// Both components within `±MAX_GRID_COORD`.
    #[must_use]
    pub fn in_range(self) -> bool {
        let limit = MAX_GRID_COORD.unsigned_abs();
        self.col.unsigned_abs() <= limit && self.row.unsigned_abs() <= limit
    }
}

/// Index of a qubit within its [`GridModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Logical assignment of a qubit within the layout being authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QubitRole {
    #[default]
    None,
    XData,
    ZData,
    Ancilla,
}

impl QubitRole {
    /// Next role in the click cycle used by the role tool.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::XData,
            Self::XData => Self::ZData,
            Self::ZData => Self::Ancilla,
            Self::Ancilla => Self::None,
        }
    }

    /// Label sent to the circuit backend.
    #[must_use]
    pub fn qubit_type(self) -> &'static str {
        match self {
            Self::Ancilla => "syndrome",
            Self::None | Self::XData | Self::ZData => "data",
        }
    }

    /// Whether the role marks a data qubit.
    #[must_use]
    pub fn is_data(self) -> bool {
        matches!(self, Self::XData | Self::ZData)
    }
}

/// Cardinal direction on screen (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// `(d_col, d_row)` for one neighbor step.
    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -NEIGHBOR_STRIDE),
            Self::Down => (0, NEIGHBOR_STRIDE),
            Self::Left => (-NEIGHBOR_STRIDE, 0),
            Self::Right => (NEIGHBOR_STRIDE, 0),
        }
    }

    /// Whether movement in this direction changes x.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    fn slot(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }
}

/// One lattice site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QubitNode {
    pub id: QubitId,
    pub coord: GridCoord,
    /// Fixed global position in world pixels.
    pub position: Point,
    pub role: QubitRole,
    neighbors: [Option<QubitId>; 4],
}

impl QubitNode {
    /// Neighbor link in `dir`, if that site exists.
    #[must_use]
    pub fn neighbor(&self, dir: Direction) -> Option<QubitId> {
        self.neighbors[dir.slot()]
    }
}

/// Dimensions and placement of a checkerboard lattice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeConfig {
    pub cols: u32,
    pub rows: u32,
    /// Distance in world pixels between adjacent grid intersections.
    pub spacing: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self { cols: 21, rows: 21, spacing: 50.0, origin_x: 0.0, origin_y: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LatticeError {
    #[error("lattice has no qubits")]
    EmptyLattice,
    #[error("grid spacing must be positive and finite, got {0}")]
    InvalidSpacing(f64),
    #[error("duplicate lattice coordinate ({}, {})", .0.col, .0.row)]
    DuplicateCoord(GridCoord),
    #[error("lattice too large: {0} sites")]
    TooLarge(usize),
    #[error("lattice coordinate ({}, {}) out of range", .0.col, .0.row)]
    CoordOutOfRange(GridCoord),
}

impl ErrorCode for LatticeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyLattice => "E_EMPTY_LATTICE",
            Self::InvalidSpacing(_) => "E_INVALID_SPACING",
            Self::DuplicateCoord(_) => "E_DUPLICATE_COORD",
            Self::TooLarge(_) => "E_LATTICE_TOO_LARGE",
            Self::CoordOutOfRange(_) => "E_COORD_OUT_OF_RANGE",
        }
    }
}

/// The lattice of qubit sites for one editor session.
#[derive(Debug, Clone)]
pub struct GridModel {
    nodes: Vec<QubitNode>,
    by_coord: HashMap<GridCoord, QubitId>,
    spacing: f64,
    origin: Point,
}

impl GridModel {
    /// Build a `cols × rows` grid with qubits where `col + row` is even.
    ///
    /// # Errors
    ///
    /// See [`GridModel::from_coords`].
    pub fn checkerboard(config: &LatticeConfig) -> Result<Self, LatticeError> {
        let cols = i32::try_from(config.cols).map_err(|_| LatticeError::TooLarge(config.cols as usize))?;
        let rows = i32::try_from(config.rows).map_err(|_| LatticeError::TooLarge(config.rows as usize))?;
        let coords = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| GridCoord::new(col, row)))
            .filter(|c| (c.col + c.row) % 2 == 0);
        Self::from_coords(coords, config.spacing, Point::new(config.origin_x, config.origin_y))
    }

    /// Build a lattice from an arbitrary set of occupied coordinates.
    ///
    /// # Errors
    ///
    /// Fails on non-positive spacing, an empty or oversized coordinate set,
    /// duplicates, or a coordinate beyond `±MAX_GRID_COORD`.
    pub fn from_coords(
        coords: impl IntoIterator<Item = GridCoord>,
        spacing: f64,
        origin: Point,
    ) -> Result<Self, LatticeError> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(LatticeError::InvalidSpacing(spacing));
        }

        let mut nodes = Vec::new();
        let mut by_coord = HashMap::new();
        for coord in coords {
            if !coord.in_range() {
                return Err(LatticeError::CoordOutOfRange(coord));
            }
            let id = QubitId(u32::try_from(nodes.len()).map_err(|_| LatticeError::TooLarge(nodes.len()))?);
            if by_coord.insert(coord, id).is_some() {
                return Err(LatticeError::DuplicateCoord(coord));
            }
            nodes.push(QubitNode {
                id,
                coord,
                position: Point::new(
                    origin.x + f64::from(coord.col) * spacing,
                    origin.y + f64::from(coord.row) * spacing,
                ),
                role: QubitRole::None,
                neighbors: [None; 4],
            });
        }
        if nodes.is_empty() {
            return Err(LatticeError::EmptyLattice);
        }

        for node in &mut nodes {
            for dir in Direction::ALL {
                node.neighbors[dir.slot()] = node.coord.step(dir).and_then(|c| by_coord.get(&c).copied());
            }
        }

        log::debug!("lattice built: {} qubits, spacing {spacing}", nodes.len());
        Ok(Self { nodes, by_coord, spacing, origin })
    }

    #[must_use]
    pub fn node(&self, id: QubitId) -> Option<&QubitNode> {
        self.nodes.get(id.index())
    }

    #[must_use]
    pub fn position(&self, id: QubitId) -> Option<Point> {
        self.node(id).map(|n| n.position)
    }

    #[must_use]
    pub fn role(&self, id: QubitId) -> Option<QubitRole> {
        self.node(id).map(|n| n.role)
    }

    /// Assign a role. Returns false if the qubit doesn't exist.
    pub fn set_role(&mut self, id: QubitId, role: QubitRole) -> bool {
        let Some(node) = self.nodes.get_mut(id.index()) else {
            return false;
        };
        node.role = role;
        true
    }

    #[must_use]
    pub fn qubit_at(&self, coord: GridCoord) -> Option<QubitId> {
        self.by_coord.get(&coord).copied()
    }

    /// Neighbor of `id` in `dir`, if both exist.
    #[must_use]
    pub fn neighbor(&self, id: QubitId, dir: Direction) -> Option<QubitId> {
        self.node(id).and_then(|n| n.neighbor(dir))
    }

    /// Closest qubit to `pt` within `radius` world units.
    #[must_use]
    pub fn nearest_qubit(&self, pt: Point, radius: f64) -> Option<QubitId> {
        let limit = radius * radius;
        self.nodes
            .iter()
            .map(|n| (n.id, dist_sq(n.position, pt)))
            .filter(|(_, d)| *d <= limit)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QubitNode> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
