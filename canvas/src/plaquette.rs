//! Plaquettes: a convex outline around three or more lattice qubits.
//!
//! A [`PlaquetteHull`] is immutable once built. Recoloring, rotating and
//! cloning all produce a fresh hull with a new id; the workspace swaps it in.

#[cfg(test)]
#[path = "plaquette_test.rs"]
mod plaquette_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::geometry::Point;
use crate::hull::{HullError, build_hull};
use crate::lattice::{GridCoord, GridModel, QubitId};

/// Unique identifier for a plaquette.
pub type PlaquetteId = Uuid;

/// RGB fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const PRIMARY: Color = Color::rgb(0x4A, 0x90, 0xD9);
    pub const SECONDARY: Color = Color::rgb(0xE0, 0x8E, 0x3C);

    /// Palette offered by the recolor control.
    pub const PALETTE: [Color; 6] = [
        Self::PRIMARY,
        Self::SECONDARY,
        Color::rgb(0x5C, 0xB8, 0x5C),
        Color::rgb(0xD9, 0x4B, 0x4B),
        Color::rgb(0x9B, 0x59, 0xB6),
        Color::rgb(0x7F, 0x8C, 0x8D),
    ];

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color given to a clone so it stands apart from its source.
    #[must_use]
    pub fn alternate(self) -> Self {
        if self == Self::PRIMARY {
            Self::SECONDARY
        } else if self == Self::SECONDARY {
            Self::PRIMARY
        } else {
            Self::rgb(255 - self.r, 255 - self.g, 255 - self.b)
        }
    }

    /// CSS hex string, e.g. `"#4a90d9"`.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    #[must_use]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::PRIMARY
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaquetteError {
    #[error(transparent)]
    Hull(#[from] HullError),
    #[error("qubit {} is not on the lattice", .0.0)]
    UnknownQubit(QubitId),
    #[error("no lattice site at ({}, {})", .0.col, .0.row)]
    OffLattice(GridCoord),
}

impl ErrorCode for PlaquetteError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Hull(e) => e.error_code(),
            Self::UnknownQubit(_) => "E_UNKNOWN_QUBIT",
            Self::OffLattice(_) => "E_OFF_LATTICE",
        }
    }
}

/// A built plaquette: its member qubits and their counterclockwise outline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaquetteHull {
    pub id: PlaquetteId,
    /// Member qubits in the order they were selected.
    pub qubits: Vec<QubitId>,
    /// Outline vertices, counterclockwise from the anchor; closed implicitly.
    pub boundary: Vec<Point>,
    pub color: Color,
}

impl PlaquetteHull {
    /// Build a plaquette from `qubits`, which must all exist in `grid`.
    ///
    /// # Errors
    ///
    /// `UnknownQubit` for an id not in `grid`, otherwise any [`HullError`].
    pub fn build(grid: &GridModel, qubits: &[QubitId], color: Color) -> Result<Self, PlaquetteError> {
        let mut members = Vec::with_capacity(qubits.len());
        for id in qubits {
            if members.contains(id) {
                continue;
            }
            if grid.node(*id).is_none() {
                return Err(PlaquetteError::UnknownQubit(*id));
            }
            members.push(*id);
        }
        let points: Vec<Point> = members.iter().filter_map(|id| grid.position(*id)).collect();
        let boundary = build_hull(&points)?;
        Ok(Self { id: Uuid::new_v4(), qubits: members, boundary, color })
    }

    /// Leftmost member, ties broken by the topmost.
    #[must_use]
    pub fn origin_qubit(&self, grid: &GridModel) -> Option<QubitId> {
        self.qubits
            .iter()
            .filter_map(|id| grid.node(*id))
            .min_by_key(|n| (n.coord.col, n.coord.row))
            .map(|n| n.id)
    }

    /// Members ordered along the outline first, then interior members in selection order.
    #[must_use]
    pub fn ordered_qubits(&self, grid: &GridModel) -> Vec<QubitId> {
        let by_position: HashMap<(u64, u64), QubitId> = self
            .qubits
            .iter()
            .filter_map(|id| grid.position(*id).map(|p| (p.key(), *id)))
            .collect();
        let mut ordered: Vec<QubitId> = self
            .boundary
            .iter()
            .filter_map(|p| by_position.get(&p.key()).copied())
            .collect();
        for id in &self.qubits {
            if !ordered.contains(id) {
                ordered.push(*id);
            }
        }
        ordered
    }

    /// Same members and outline under a new id and color.
    #[must_use]
    pub fn recolored(&self, color: Color) -> Self {
        Self { id: Uuid::new_v4(), qubits: self.qubits.clone(), boundary: self.boundary.clone(), color }
    }

    /// Turn the plaquette a quarter turn clockwise (on screen), keeping its origin qubit fixed.
    ///
    /// # Errors
    ///
    /// `OffLattice` if any rotated member has no lattice site.
    pub fn rotated(&self, grid: &GridModel) -> Result<Self, PlaquetteError> {
        let Some(pivot) = self.origin_qubit(grid).and_then(|id| grid.node(id)).map(|n| n.coord) else {
            return Err(PlaquetteError::Hull(HullError::InsufficientPoints { found: 0 }));
        };
        let mut turned = Vec::with_capacity(self.qubits.len());
        for id in &self.qubits {
            let node = grid.node(*id).ok_or(PlaquetteError::UnknownQubit(*id))?;
            let dc = node.coord.col - pivot.col;
            let dr = node.coord.row - pivot.row;
            turned.push((-dr, dc));
        }
        // Re-anchor so the rotated shape's origin lands back on the pivot.
        let Some(&(mc, mr)) = turned.iter().min() else {
            return Err(PlaquetteError::Hull(HullError::InsufficientPoints { found: 0 }));
        };
        let mut rotated = Vec::with_capacity(turned.len());
        for (dc, dr) in turned {
            let target = GridCoord::new(pivot.col + dc - mc, pivot.row + dr - mr);
            rotated.push(grid.qubit_at(target).ok_or(PlaquetteError::OffLattice(target))?);
        }
        Self::build(grid, &rotated, self.color)
    }

    /// Whether `id` belongs to this plaquette.
    #[must_use]
    pub fn contains(&self, id: QubitId) -> bool {
        self.qubits.contains(&id)
    }
}
