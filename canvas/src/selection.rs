#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::geometry::Point;
use crate::lattice::{GridModel, QubitId};

/// Qubits picked for the plaquette being authored, in click order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    qubits: Vec<QubitId>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` unless already present. Returns true if it was added.
    pub fn insert(&mut self, id: QubitId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.qubits.push(id);
        true
    }

    /// Remove `id`, preserving the order of the rest. Returns true if it was present.
    pub fn remove(&mut self, id: QubitId) -> bool {
        let before = self.qubits.len();
        self.qubits.retain(|q| *q != id);
        self.qubits.len() != before
    }

    /// Add `id` if absent, remove it if present. Returns true when it ends up selected.
    pub fn toggle(&mut self, id: QubitId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.qubits.push(id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: QubitId) -> bool {
        self.qubits.contains(&id)
    }

    /// The qubit clicked first, if any.
    #[must_use]
    pub fn first(&self) -> Option<QubitId> {
        self.qubits.first().copied()
    }

    pub fn clear(&mut self) {
        self.qubits.clear();
    }

    #[must_use]
    pub fn as_slice(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Positions of the selected qubits that exist in `grid`.
    #[must_use]
    pub fn positions(&self, grid: &GridModel) -> Vec<Point> {
        self.qubits.iter().filter_map(|id| grid.position(*id)).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }
}
