//! Workspace controller: the single owner of editor state.
//!
//! The controller holds the lattice, the qubit selection being authored, every
//! plaquette on the canvas (in creation order, which is also draw order), the
//! explicitly selected plaquette, and the committed plaquette library. All
//! mutations go through its methods; the engine never touches the pieces
//! directly.
//!
//! SESSION STATE
//! =============
//! ```text
//! Empty ──toggle──▶ Selecting ──build──▶ HullBuilt ──extend──▶ Extended ⟲ extend
//!                                            │                    │
//!                                            └──commit / clear────┴──▶ Committed | Cleared
//! ```
//! Toggling a qubit from any state starts (or continues) a selection; toggling
//! the last qubit off returns to `Empty`.
//! Every operation either succeeds completely or returns an error with the
//! controller unchanged.

#[cfg(test)]
#[path = "workspace_test.rs"]
mod workspace_test;

use crate::circuit::{CircuitError, PlaquetteCircuit};
use crate::error::ErrorCode;
use crate::export::{self, ExportPayload, Template, TemplateError};
use crate::extend::{self, ExtendError};
use crate::lattice::{Direction, GridModel, QubitId, QubitRole};
use crate::plaquette::{Color, PlaquetteError, PlaquetteHull, PlaquetteId};
use crate::selection::SelectionSet;

/// Where the current plaquette-authoring session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing selected, nothing built.
    #[default]
    Empty,
    /// Qubits are being added to or removed from the selection.
    Selecting,
    /// A hull was built from the selection.
    HullBuilt,
    /// At least one sibling was cloned off a hull.
    Extended,
    /// The selected plaquette was added to the library.
    Committed,
    /// The session was discarded.
    Cleared,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Plaquette(#[from] PlaquetteError),
    #[error(transparent)]
    Extend(#[from] ExtendError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Circuit(#[from] CircuitError),
    #[error("unknown plaquette {0}")]
    UnknownPlaquette(PlaquetteId),
    #[error("qubit {} is not on the lattice", .0.0)]
    UnknownQubit(QubitId),
    #[error("no plaquette selected")]
    NoPlaquetteSelected,
    #[error("template needs library plaquette {0}; commit more plaquettes first")]
    MissingPrototype(u8),
}

impl ErrorCode for WorkspaceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Plaquette(e) => e.error_code(),
            Self::Extend(e) => e.error_code(),
            Self::Template(e) => e.error_code(),
            Self::Circuit(e) => e.error_code(),
            Self::UnknownPlaquette(_) => "E_UNKNOWN_PLAQUETTE",
            Self::UnknownQubit(_) => "E_UNKNOWN_QUBIT",
            Self::NoPlaquetteSelected => "E_NO_PLAQUETTE_SELECTED",
            Self::MissingPrototype(_) => "E_MISSING_PROTOTYPE",
        }
    }
}

/// Owner of the lattice, selection, plaquettes and library for one editor.
#[derive(Debug, Clone)]
pub struct WorkspaceController {
    grid: GridModel,
    selection: SelectionSet,
    plaquettes: Vec<PlaquetteHull>,
    selected: Option<PlaquetteId>,
    library: Vec<PlaquetteHull>,
    /// Plaquettes created since the last commit or clear.
    session: Vec<PlaquetteId>,
    state: SessionState,
}

impl WorkspaceController {
    #[must_use]
    pub fn new(grid: GridModel) -> Self {
        Self {
            grid,
            selection: SelectionSet::new(),
            plaquettes: Vec::new(),
            selected: None,
            library: Vec::new(),
            session: Vec::new(),
            state: SessionState::Empty,
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Plaquettes on the canvas, bottom to top.
    #[must_use]
    pub fn plaquettes(&self) -> &[PlaquetteHull] {
        &self.plaquettes
    }

    #[must_use]
    pub fn plaquette(&self, id: PlaquetteId) -> Option<&PlaquetteHull> {
        self.plaquettes.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn selected(&self) -> Option<PlaquetteId> {
        self.selected
    }

    #[must_use]
    pub fn selected_plaquette(&self) -> Option<&PlaquetteHull> {
        self.selected.and_then(|id| self.plaquette(id))
    }

    /// Committed plaquettes in commit order.
    #[must_use]
    pub fn library(&self) -> &[PlaquetteHull] {
        &self.library
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    // --- Qubits ---

    /// Add or remove a qubit from the selection. Returns true when it ends up selected.
    ///
    /// # Errors
    ///
    /// `UnknownQubit` if `id` is not on the lattice.
    pub fn toggle_qubit(&mut self, id: QubitId) -> Result<bool, WorkspaceError> {
        self.require_qubit(id)?;
        let selected = self.selection.toggle(id);
        self.state = if self.selection.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Selecting
        };
        Ok(selected)
    }

    /// Advance a qubit to its next role. Returns the new role.
    ///
    /// # Errors
    ///
    /// `UnknownQubit` if `id` is not on the lattice.
    pub fn cycle_role(&mut self, id: QubitId) -> Result<QubitRole, WorkspaceError> {
        let next = self.grid.role(id).ok_or(WorkspaceError::UnknownQubit(id))?.next();
        self.set_role(id, next)?;
        Ok(next)
    }

    /// # Errors
    ///
    /// `UnknownQubit` if `id` is not on the lattice.
    pub fn set_role(&mut self, id: QubitId, role: QubitRole) -> Result<(), WorkspaceError> {
        if !self.grid.set_role(id, role) {
            return Err(WorkspaceError::UnknownQubit(id));
        }
        Ok(())
    }

    // --- Plaquettes ---

    /// Build a plaquette from the current selection, select it, and start a fresh selection.
    ///
    /// # Errors
    ///
    /// Any [`PlaquetteError`]; the selection is kept so the user can fix it.
    pub fn build_plaquette(&mut self) -> Result<PlaquetteId, WorkspaceError> {
        let hull = PlaquetteHull::build(&self.grid, self.selection.as_slice(), Color::PRIMARY)?;
        let id = hull.id;
        log::debug!("built plaquette {id} from {} qubits", hull.qubits.len());
        self.plaquettes.push(hull);
        self.session.push(id);
        self.selected = Some(id);
        self.selection.clear();
        self.state = SessionState::HullBuilt;
        Ok(id)
    }

    /// Clone plaquette `id` one lattice step in `dir`. The clone is selected.
    ///
    /// # Errors
    ///
    /// `UnknownPlaquette`, or any [`ExtendError`].
    pub fn extend_plaquette(&mut self, id: PlaquetteId, dir: Direction) -> Result<PlaquetteId, WorkspaceError> {
        let source = self.plaquette(id).ok_or(WorkspaceError::UnknownPlaquette(id))?;
        let clone = extend::clone_plaquette(&self.grid, source, dir)?;
        let clone_id = clone.id;
        self.plaquettes.push(clone);
        self.session.push(clone_id);
        self.selected = Some(clone_id);
        self.state = SessionState::Extended;
        Ok(clone_id)
    }

    /// Replace plaquette `id` with a recolored copy. Returns the new id.
    ///
    /// # Errors
    ///
    /// `UnknownPlaquette`.
    pub fn recolor_plaquette(&mut self, id: PlaquetteId, color: Color) -> Result<PlaquetteId, WorkspaceError> {
        let index = self.index_of(id)?;
        let replacement = self.plaquettes[index].recolored(color);
        Ok(self.replace_at(index, replacement))
    }

    /// Replace plaquette `id` with a copy turned a quarter clockwise. Returns the new id.
    ///
    /// # Errors
    ///
    /// `UnknownPlaquette`, or `OffLattice` when the turned shape leaves the lattice.
    pub fn rotate_plaquette(&mut self, id: PlaquetteId) -> Result<PlaquetteId, WorkspaceError> {
        let index = self.index_of(id)?;
        let replacement = self.plaquettes[index].rotated(&self.grid)?;
        Ok(self.replace_at(index, replacement))
    }

    /// Remove plaquette `id` from the canvas. Library copies are unaffected.
    ///
    /// # Errors
    ///
    /// `UnknownPlaquette`.
    pub fn remove_plaquette(&mut self, id: PlaquetteId) -> Result<PlaquetteHull, WorkspaceError> {
        let index = self.index_of(id)?;
        let removed = self.plaquettes.remove(index);
        self.session.retain(|s| *s != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(removed)
    }

    /// Set or clear the explicitly selected plaquette.
    ///
    /// # Errors
    ///
    /// `UnknownPlaquette`.
    pub fn select_plaquette(&mut self, id: Option<PlaquetteId>) -> Result<(), WorkspaceError> {
        if let Some(id) = id {
            self.index_of(id)?;
        }
        self.selected = id;
        Ok(())
    }

    /// Add the selected plaquette to the library and close the session.
    ///
    /// Committing a plaquette that is already in the library replaces that entry.
    ///
    /// # Errors
    ///
    /// `NoPlaquetteSelected`.
    pub fn commit_plaquette(&mut self) -> Result<PlaquetteId, WorkspaceError> {
        let hull = self.selected_plaquette().ok_or(WorkspaceError::NoPlaquetteSelected)?.clone();
        let id = hull.id;
        match self.library.iter_mut().find(|p| p.id == id) {
            Some(entry) => *entry = hull,
            None => self.library.push(hull),
        }
        self.session.clear();
        self.selection.clear();
        self.state = SessionState::Committed;
        log::debug!("committed plaquette {id}; library holds {}", self.library.len());
        Ok(id)
    }

    /// Discard the selection and every uncommitted plaquette built in this session.
    pub fn clear_session(&mut self) {
        let discard: Vec<PlaquetteId> = self
            .session
            .drain(..)
            .filter(|id| !self.library.iter().any(|p| p.id == *id))
            .collect();
        self.plaquettes.retain(|p| !discard.contains(&p.id));
        if self.selected.is_some_and(|id| discard.contains(&id)) {
            self.selected = None;
        }
        self.selection.clear();
        self.state = SessionState::Cleared;
    }

    /// Tile the canvas with library plaquettes 1 and 2 following `template`.
    ///
    /// # Errors
    ///
    /// `MissingPrototype` when the library lacks a plaquette the template uses,
    /// or any [`TemplateError`]. Nothing is added unless every cell fits.
    pub fn apply_template(&mut self, template: &Template) -> Result<Vec<PlaquetteId>, WorkspaceError> {
        let first = self.library.first().ok_or(WorkspaceError::MissingPrototype(1))?;
        let second = if template.tl_corners_2.is_empty() {
            first
        } else {
            self.library.get(1).ok_or(WorkspaceError::MissingPrototype(2))?
        };
        let tiles = export::tile_template(&self.grid, template, [first, second])?;
        let ids: Vec<PlaquetteId> = tiles.iter().map(|t| t.id).collect();
        self.plaquettes.extend(tiles);
        Ok(ids)
    }

    /// Circuit for plaquette `id` under the current qubit roles.
    ///
    /// # Errors
    ///
    /// `UnknownPlaquette`, or any [`CircuitError`].
    pub fn plaquette_circuit(&self, id: PlaquetteId) -> Result<PlaquetteCircuit, WorkspaceError> {
        let hull = self.plaquette(id).ok_or(WorkspaceError::UnknownPlaquette(id))?;
        Ok(PlaquetteCircuit::from_plaquette(&self.grid, hull)?)
    }

    /// Payload describing every plaquette on the canvas.
    #[must_use]
    pub fn export_payload(&self) -> ExportPayload {
        ExportPayload::from_hulls(&self.grid, &self.plaquettes)
    }

    /// Plain-text dump of the committed library.
    #[must_use]
    pub fn library_dump(&self) -> String {
        export::library_dump(&self.grid, &self.library)
    }

    // --- Internals ---

    fn require_qubit(&self, id: QubitId) -> Result<(), WorkspaceError> {
        self.grid.node(id).map(|_| ()).ok_or(WorkspaceError::UnknownQubit(id))
    }

    fn index_of(&self, id: PlaquetteId) -> Result<usize, WorkspaceError> {
        self.plaquettes
            .iter()
            .position(|p| p.id == id)
            .ok_or(WorkspaceError::UnknownPlaquette(id))
    }

    /// Swap in `replacement` at `index`, carrying selection and session membership over.
    fn replace_at(&mut self, index: usize, replacement: PlaquetteHull) -> PlaquetteId {
        let old = std::mem::replace(&mut self.plaquettes[index], replacement);
        let new = self.plaquettes[index].id;
        if self.selected == Some(old.id) {
            self.selected = Some(new);
        }
        for s in &mut self.session {
            if *s == old.id {
                *s = new;
            }
        }
        new
    }
}
