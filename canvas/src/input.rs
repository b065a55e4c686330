//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the gesture tracked between pointer-down and
//! pointer-up; one dispatcher in [`crate::engine::EngineCore`] matches on it,
//! so no handler is ever swapped in or out as the session state changes.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;
use crate::lattice::QubitId;
use crate::plaquette::PlaquetteId;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Click qubits to select them, drag plaquettes to clone them (default).
    #[default]
    Select,
    /// Click qubits to cycle their role.
    AssignRole,
}

/// Modifier keys held when the event fired.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    /// Ctrl or Meta turns the wheel into zoom.
    pub ctrl: bool,
    /// Alt with the primary button pans instead of selecting.
    pub alt: bool,
    pub meta: bool,
}

/// Pointer button. Anything but `Primary` pans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// Key name with single characters lowercased, so `"R"` and `"r"` compare equal.
    #[must_use]
    pub fn normalized(&self) -> String {
        if self.0.chars().count() == 1 {
            self.0.to_lowercase()
        } else {
            self.0.clone()
        }
    }
}

/// Wheel or trackpad delta in CSS pixels.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f64,
    /// Positive scrolls down.
    pub dy: f64,
}

/// Tool and hover state shared with the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub tool: Tool,
    /// Qubit under the pointer, if any.
    pub hover_qubit: Option<QubitId>,
}

/// Gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    #[default]
    Idle,
    Panning {
        /// Pointer position at the previous move event.
        last_screen: Point,
    },
    /// Dragging a plaquette; each threshold crossing clones it one lattice step.
    DraggingPlaquette {
        /// Plaquette the drag currently measures from; replaced by each clone.
        id: PlaquetteId,
        /// Screen-space position where the current step started.
        origin_screen: Point,
        /// Number of clones made during this drag.
        clones: u32,
    },
}
