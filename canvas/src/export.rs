//! Payloads exchanged with the circuit backend, template tiling, and the
//! plain-text library dump.
//!
//! Export coordinates are relative to each plaquette's origin qubit (leftmost,
//! then topmost) and expressed in grid-spacing units, so a plaquette exports
//! identically wherever it sits on the lattice.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use serde::{Deserialize, Serialize};

use crate::circuit::PlaquetteCircuit;
use crate::error::ErrorCode;
use crate::lattice::{GridCoord, GridModel, QubitId};
use crate::plaquette::{PlaquetteError, PlaquetteHull};

// =============================================================================
// EXPORT PAYLOAD
// =============================================================================

/// Request body for plaquette-to-circuit conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub plaquettes: Vec<ExportPlaquette>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPlaquette {
    pub color: [u8; 3],
    pub qubits: Vec<ExportQubit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportQubit {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "qubitType")]
    pub qubit_type: String,
}

impl ExportPlaquette {
    /// Describe `hull` relative to its origin qubit. `None` if the hull has no resolvable members.
    #[must_use]
    pub fn from_hull(grid: &GridModel, hull: &PlaquetteHull) -> Option<Self> {
        let origin = grid.node(hull.origin_qubit(grid)?)?.coord;
        let qubits = hull
            .qubits
            .iter()
            .filter_map(|id| grid.node(*id))
            .map(|n| ExportQubit {
                x: n.coord.col - origin.col,
                y: n.coord.row - origin.row,
                qubit_type: n.role.qubit_type().to_string(),
            })
            .collect();
        Some(Self { color: hull.color.to_array(), qubits })
    }
}

impl ExportPayload {
    #[must_use]
    pub fn from_hulls<'a>(grid: &GridModel, hulls: impl IntoIterator<Item = &'a PlaquetteHull>) -> Self {
        Self {
            plaquettes: hulls
                .into_iter()
                .filter_map(|h| ExportPlaquette::from_hull(grid, h))
                .collect(),
        }
    }
}

// =============================================================================
// TEMPLATES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCorner {
    pub x: i32,
    pub y: i32,
}

/// A rectangular tiling pattern: `length × height` cells, each listed corner
/// taking plaquette type 1 or 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub height: i32,
    pub length: i32,
    #[serde(default)]
    pub tl_corners_1: Vec<CellCorner>,
    #[serde(default)]
    pub tl_corners_2: Vec<CellCorner>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template dimensions must be positive, got {length}x{height}")]
    EmptyTemplate { length: i32, height: i32 },
    #[error("template corner ({}, {}) lies outside the {length}x{height} pattern", corner.x, corner.y)]
    CornerOutOfBounds { corner: CellCorner, length: i32, height: i32 },
    #[error("template cell at ({}, {}) places a qubit off the lattice", corner.x, corner.y)]
    QubitOffLattice { corner: CellCorner },
    #[error("template prototype has no qubits")]
    EmptyPrototype,
    #[error(transparent)]
    Plaquette(#[from] PlaquetteError),
}

impl ErrorCode for TemplateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTemplate { .. } => "E_EMPTY_TEMPLATE",
            Self::CornerOutOfBounds { .. } => "E_CORNER_OUT_OF_BOUNDS",
            Self::QubitOffLattice { .. } => "E_QUBIT_OFF_LATTICE",
            Self::EmptyPrototype => "E_EMPTY_PROTOTYPE",
            Self::Plaquette(e) => e.error_code(),
        }
    }
}

impl Template {
    /// Check dimensions and that every corner lies inside the pattern.
    ///
    /// # Errors
    ///
    /// `EmptyTemplate` or `CornerOutOfBounds`.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.height <= 0 || self.length <= 0 {
            return Err(TemplateError::EmptyTemplate { length: self.length, height: self.height });
        }
        for corner in self.tl_corners_1.iter().chain(&self.tl_corners_2) {
            if corner.x < 0 || corner.y < 0 || corner.x >= self.length || corner.y >= self.height {
                return Err(TemplateError::CornerOutOfBounds {
                    corner: *corner,
                    length: self.length,
                    height: self.height,
                });
            }
        }
        Ok(())
    }

    /// Corners paired with their plaquette-type label (1 or 2).
    pub fn labelled_corners(&self) -> impl Iterator<Item = (u8, CellCorner)> + '_ {
        self.tl_corners_1
            .iter()
            .map(|c| (1, *c))
            .chain(self.tl_corners_2.iter().map(|c| (2, *c)))
    }
}

/// Stamp `prototypes[label - 1]` at every template corner.
///
/// Corner `(x, y)` maps to lattice coordinate `(2x, 2y)`; the prototype's origin
/// qubit lands there and the rest keep their offsets. Nothing is returned
/// unless every cell fits on the lattice.
///
/// # Errors
///
/// Any [`TemplateError`]; the first failing cell aborts the whole tiling.
pub fn tile_template(
    grid: &GridModel,
    template: &Template,
    prototypes: [&PlaquetteHull; 2],
) -> Result<Vec<PlaquetteHull>, TemplateError> {
    template.validate()?;

    let mut offsets: [Vec<(i32, i32)>; 2] = [Vec::new(), Vec::new()];
    for (slot, proto) in prototypes.iter().enumerate() {
        let origin = proto
            .origin_qubit(grid)
            .and_then(|id| grid.node(id))
            .ok_or(TemplateError::EmptyPrototype)?
            .coord;
        offsets[slot] = proto
            .qubits
            .iter()
            .filter_map(|id| grid.node(*id))
            .map(|n| (n.coord.col - origin.col, n.coord.row - origin.row))
            .collect();
    }

    let mut out = Vec::new();
    for (label, corner) in template.labelled_corners() {
        let slot = usize::from(label - 1);
        let off_lattice = TemplateError::QubitOffLattice { corner };
        let base = corner
            .x
            .checked_mul(2)
            .zip(corner.y.checked_mul(2))
            .ok_or_else(|| off_lattice.clone())?;
        let mut members: Vec<QubitId> = Vec::with_capacity(offsets[slot].len());
        for (dc, dr) in &offsets[slot] {
            let id = base
                .0
                .checked_add(*dc)
                .zip(base.1.checked_add(*dr))
                .and_then(|(col, row)| grid.qubit_at(GridCoord::new(col, row)))
                .ok_or_else(|| off_lattice.clone())?;
            members.push(id);
        }
        out.push(PlaquetteHull::build(grid, &members, prototypes[slot].color)?);
    }
    log::debug!("template tiled into {} plaquettes", out.len());
    Ok(out)
}

// =============================================================================
// LIBRARY DUMP
// =============================================================================

/// Render committed plaquettes as section-delimited text blocks.
#[must_use]
pub fn library_dump<'a>(grid: &GridModel, hulls: impl IntoIterator<Item = &'a PlaquetteHull>) -> String {
    let mut out = String::new();
    for (index, hull) in hulls.into_iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        write_section(&mut out, grid, index + 1, hull);
    }
    out
}

fn write_section(out: &mut String, grid: &GridModel, number: usize, hull: &PlaquetteHull) {
    out.push_str(&format!("==== plaquette {number} ====\n"));
    out.push_str(&format!("color: {}\n", hull.color.to_css()));
    if let Some(export) = ExportPlaquette::from_hull(grid, hull) {
        let listed: Vec<String> = export
            .qubits
            .iter()
            .map(|q| format!("({},{}) {}", q.x, q.y, q.qubit_type))
            .collect();
        out.push_str(&format!("qubits: {}\n", listed.join(", ")));
    }
    match PlaquetteCircuit::from_plaquette(grid, hull) {
        Ok(circuit) => out.push_str(&circuit.ascii_art()),
        Err(e) => out.push_str(&format!("(no circuit: {e})")),
    }
    out.push_str("\n==== end ====\n");
}
