//! Shared numeric constants for the canvas crate.

// ── Lattice ─────────────────────────────────────────────────────

/// Neighbor links span two grid units; only every other intersection hosts a qubit.
pub const NEIGHBOR_STRIDE: i32 = 2;

/// Largest absolute lattice coordinate; keeps coordinate differences and rotations inside `i32`.
pub const MAX_GRID_COORD: i32 = 1 << 20;

/// Minimum number of distinct qubits that form a plaquette.
pub const MIN_PLAQUETTE_QUBITS: usize = 3;

// ── Camera ──────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.1;

/// Largest allowed zoom factor.
pub const ZOOM_MAX: f64 = 10.0;

/// Zoom multiplier per wheel notch (100 px of delta).
pub const ZOOM_STEP: f64 = 1.1;

// ── Hit-testing / gestures ──────────────────────────────────────

/// Screen-space radius in pixels within which a click lands on a qubit.
pub const QUBIT_HIT_RADIUS_PX: f64 = 10.0;

/// Screen-space drag distance past which a plaquette is cloned.
pub const DRAG_THRESHOLD_PX: f64 = 30.0;

// ── Rendering ───────────────────────────────────────────────────

/// Drawn qubit radius in world units.
pub const QUBIT_RADIUS: f64 = 6.0;

/// Plaquette fill opacity.
pub const PLAQUETTE_ALPHA: f64 = 0.55;

/// Selection dash segment length in screen pixels.
pub const SELECTION_DASH_PX: f64 = 4.0;
