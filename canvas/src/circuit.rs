//! Stabilizer-measurement circuits for a single plaquette.
//!
//! A plaquette with one ancilla and a set of data qubits measures the product
//! of `X` on its `XData` members and `Z` on its `ZData` members. The circuit is
//! exposed two ways: a textual instruction list (one gate per line, qubits
//! numbered by their position in the plaquette) and ASCII art with one wire
//! per qubit and one column per instruction.

#[cfg(test)]
#[path = "circuit_test.rs"]
mod circuit_test;

use std::fmt;

use crate::error::ErrorCode;
use crate::lattice::{GridModel, QubitId, QubitRole};
use crate::plaquette::PlaquetteHull;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CircuitError {
    #[error("plaquette has no ancilla qubit")]
    NoAncilla,
    #[error("plaquette has {0} ancilla qubits; exactly one is required")]
    MultipleAncillas(usize),
    #[error("qubit {} has no data role assigned", .0.0)]
    UnassignedQubit(QubitId),
}

impl ErrorCode for CircuitError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoAncilla => "E_NO_ANCILLA",
            Self::MultipleAncillas(_) => "E_MULTIPLE_ANCILLAS",
            Self::UnassignedQubit(_) => "E_UNASSIGNED_QUBIT",
        }
    }
}

/// One gate, addressing qubits by their index within the plaquette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Reset(usize),
    H(usize),
    Cx { control: usize, target: usize },
    Cz { a: usize, b: usize },
    Measure(usize),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset(q) => write!(f, "R {q}"),
            Self::H(q) => write!(f, "H {q}"),
            Self::Cx { control, target } => write!(f, "CX {control} {target}"),
            Self::Cz { a, b } => write!(f, "CZ {a} {b}"),
            Self::Measure(q) => write!(f, "M {q}"),
        }
    }
}

/// A plaquette's qubits in circuit order together with their roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaquetteCircuit {
    qubits: Vec<(QubitId, QubitRole)>,
    ancilla: usize,
}

impl PlaquetteCircuit {
    /// Order the plaquette's qubits (outline first) and validate their roles.
    ///
    /// # Errors
    ///
    /// Fails unless there is exactly one ancilla and every other member is a data qubit.
    pub fn from_plaquette(grid: &GridModel, hull: &PlaquetteHull) -> Result<Self, CircuitError> {
        let qubits: Vec<(QubitId, QubitRole)> = hull
            .ordered_qubits(grid)
            .into_iter()
            .map(|id| (id, grid.role(id).unwrap_or_default()))
            .collect();

        let ancillas: Vec<usize> = qubits
            .iter()
            .enumerate()
            .filter(|(_, (_, role))| *role == QubitRole::Ancilla)
            .map(|(i, _)| i)
            .collect();
        let ancilla = match ancillas.as_slice() {
            [] => return Err(CircuitError::NoAncilla),
            [one] => *one,
            many => return Err(CircuitError::MultipleAncillas(many.len())),
        };
        if let Some((id, _)) = qubits.iter().find(|(_, role)| *role == QubitRole::None) {
            return Err(CircuitError::UnassignedQubit(*id));
        }
        Ok(Self { qubits, ancilla })
    }

    #[must_use]
    pub fn qubits(&self) -> &[(QubitId, QubitRole)] {
        &self.qubits
    }

    #[must_use]
    pub fn ancilla_index(&self) -> usize {
        self.ancilla
    }

    /// Gate sequence measuring the plaquette's stabilizer onto the ancilla.
    #[must_use]
    pub fn instructions(&self) -> Vec<Instruction> {
        let anc = self.ancilla;
        let x_basis = self.qubits.iter().any(|(_, role)| *role == QubitRole::XData);

        let mut out = vec![Instruction::Reset(anc)];
        if x_basis {
            out.push(Instruction::H(anc));
        }
        for (i, (_, role)) in self.qubits.iter().enumerate() {
            match role {
                QubitRole::XData => out.push(Instruction::Cx { control: anc, target: i }),
                QubitRole::ZData if x_basis => out.push(Instruction::Cz { a: anc, b: i }),
                QubitRole::ZData => out.push(Instruction::Cx { control: i, target: anc }),
                QubitRole::None | QubitRole::Ancilla => {}
            }
        }
        if x_basis {
            out.push(Instruction::H(anc));
        }
        out.push(Instruction::Measure(anc));
        out
    }

    /// Instruction list, one per line.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.instructions()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Wire diagram. Control `@`, target `X`, wires crossed by a two-qubit gate `|`.
    #[must_use]
    pub fn ascii_art(&self) -> String {
        let instructions = self.instructions();
        let width = self.qubits.len().saturating_sub(1).to_string().len();

        let mut lines = Vec::with_capacity(self.qubits.len());
        for (wire, (_, role)) in self.qubits.iter().enumerate() {
            let mut line = format!("q{wire:<width$} {}: ", role_tag(*role));
            for inst in &instructions {
                line.push('-');
                line.push(cell(*inst, wire));
                line.push('-');
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

fn role_tag(role: QubitRole) -> char {
    match role {
        QubitRole::XData => 'X',
        QubitRole::ZData => 'Z',
        QubitRole::Ancilla => 'A',
        QubitRole::None => '?',
    }
}

fn cell(inst: Instruction, wire: usize) -> char {
    let span = |a: usize, b: usize, a_sym: char, b_sym: char| {
        if wire == a {
            a_sym
        } else if wire == b {
            b_sym
        } else if wire > a.min(b) && wire < a.max(b) {
            '|'
        } else {
            '-'
        }
    };
    match inst {
        Instruction::Reset(q) if q == wire => 'R',
        Instruction::H(q) if q == wire => 'H',
        Instruction::Measure(q) if q == wire => 'M',
        Instruction::Cx { control, target } => span(control, target, '@', 'X'),
        Instruction::Cz { a, b } => span(a, b, '@', '@'),
        Instruction::Reset(_) | Instruction::H(_) | Instruction::Measure(_) => '-',
    }
}
