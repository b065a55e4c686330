//! Host workflows that move workspace state across the backend boundary.
//!
//! Every workflow finishes its network round-trip before touching local
//! state, so a failed call leaves the workspace and the filesystem as they
//! were. Nothing is retried here; the caller decides from
//! [`ErrorCode::retryable`] whether to offer it.

use std::path::Path;

use canvas::error::ErrorCode;
use canvas::export::{ExportPayload, ExportPlaquette};
use canvas::lattice::{GridCoord, GridModel, LatticeConfig, LatticeError};
use canvas::plaquette::{Color, PlaquetteError, PlaquetteHull};
use canvas::workspace::{WorkspaceController, WorkspaceError};
use tracing::{info, warn};
use uuid::Uuid;

use crate::backend::{Backend, BackendError};

/// File the circuit is written to when the host does not pick one.
pub const DEFAULT_CIRCUIT_FILE: &str = "circuit.stim";

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("no plaquettes to export")]
    NothingToExport,
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error(transparent)]
    Lattice(#[from] LatticeError),
    #[error("plaquette {index} does not fit a {cols}x{rows} lattice")]
    PlaquetteOffLattice { index: usize, cols: u32, rows: u32 },
    #[error("plaquette {index}: {source}")]
    InvalidPlaquette { index: usize, source: PlaquetteError },
    #[error("failed to write {path}: {source}")]
    Write { path: String, source: std::io::Error },
}

impl ErrorCode for WorkflowError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NothingToExport => "E_NOTHING_TO_EXPORT",
            Self::Backend(e) => e.error_code(),
            Self::Workspace(e) => e.error_code(),
            Self::Lattice(e) => e.error_code(),
            Self::PlaquetteOffLattice { .. } => "E_PLAQUETTE_OFF_LATTICE",
            Self::InvalidPlaquette { source, .. } => source.error_code(),
            Self::Write { .. } => "E_WRITE_FAILED",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Backend(e) => e.retryable(),
            _ => false,
        }
    }
}

/// Send every plaquette on the canvas to the backend and write the circuit to `path`.
///
/// # Errors
///
/// `NothingToExport` for an empty canvas, otherwise backend or write failures.
pub async fn export_workspace<B>(backend: &B, workspace: &WorkspaceController, path: &Path) -> Result<usize, WorkflowError>
where
    B: Backend + ?Sized,
{
    export_payload(backend, &workspace.export_payload(), path).await
}

/// Convert a prepared payload and write the resulting circuit to `path`.
/// Returns the number of bytes written.
///
/// # Errors
///
/// `NothingToExport` for an empty payload, otherwise backend or write failures.
pub async fn export_payload<B>(backend: &B, payload: &ExportPayload, path: &Path) -> Result<usize, WorkflowError>
where
    B: Backend + ?Sized,
{
    if payload.plaquettes.is_empty() {
        return Err(WorkflowError::NothingToExport);
    }

    let bytes = backend.export_circuit(payload).await?;
    tokio::fs::write(path, &bytes).await.map_err(|source| {
        warn!(path = %path.display(), error = %source, "export: write failed");
        WorkflowError::Write { path: path.display().to_string(), source }
    })?;

    info!(path = %path.display(), bytes = bytes.len(), plaquettes = payload.plaquettes.len(), "export: circuit written");
    Ok(bytes.len())
}

/// Replay every plaquette of `payload` on a fresh lattice built from `config`.
///
/// Each shape is shifted to the lattice's top-left corner, keeping checkerboard
/// parity, and must land on real sites and form a valid hull there.
///
/// # Errors
///
/// `Lattice` for an unbuildable config, `PlaquetteOffLattice` when a shape
/// needs more room than the lattice has, `InvalidPlaquette` when its hull is
/// rejected.
pub fn validate_payload(payload: &ExportPayload, config: &LatticeConfig) -> Result<(), WorkflowError> {
    let grid = GridModel::checkerboard(config)?;
    for (index, plaquette) in payload.plaquettes.iter().enumerate() {
        let off_lattice = || WorkflowError::PlaquetteOffLattice { index, cols: config.cols, rows: config.rows };
        let sites = placed_sites(plaquette).ok_or_else(off_lattice)?;
        let members = sites
            .into_iter()
            .map(|coord| grid.qubit_at(coord))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(off_lattice)?;
        let [r, g, b] = plaquette.color;
        PlaquetteHull::build(&grid, &members, Color::rgb(r, g, b))
            .map_err(|source| WorkflowError::InvalidPlaquette { index, source })?;
    }
    info!(plaquettes = payload.plaquettes.len(), cols = config.cols, rows = config.rows, "payload fits lattice");
    Ok(())
}

/// Member coordinates shifted so the bounding box starts at `(0, 0)` or `(1, 0)`.
/// `None` when a shift leaves the `i32` range.
fn placed_sites(plaquette: &ExportPlaquette) -> Option<Vec<GridCoord>> {
    let (Some(min_x), Some(min_y)) =
        (plaquette.qubits.iter().map(|q| q.x).min(), plaquette.qubits.iter().map(|q| q.y).min())
    else {
        return Some(Vec::new());
    };
    let parity = i32::from((i64::from(min_x) + i64::from(min_y)).rem_euclid(2) == 1);
    plaquette
        .qubits
        .iter()
        .map(|q| {
            let col = q.x.checked_sub(min_x)?.checked_add(parity)?;
            let row = q.y.checked_sub(min_y)?;
            Some(GridCoord::new(col, row))
        })
        .collect()
}

/// Fetch template `name` and tile it over the lattice with the first two
/// committed plaquettes as prototypes. Returns the ids of the placed plaquettes.
///
/// # Errors
///
/// Backend failures, or any [`WorkspaceError`] from tiling. On error no
/// plaquette is added.
pub async fn import_template<B>(
    backend: &B,
    workspace: &mut WorkspaceController,
    name: &str,
) -> Result<Vec<Uuid>, WorkflowError>
where
    B: Backend + ?Sized,
{
    let template = backend.fetch_template(name).await?;
    let placed = workspace.apply_template(&template).map_err(|e| {
        warn!(template = name, code = e.error_code(), error = %e, "import: template rejected");
        e
    })?;
    info!(template = name, placed = placed.len(), "import: template applied");
    Ok(placed)
}

#[cfg(test)]
#[path = "workflow_test.rs"]
mod tests;
