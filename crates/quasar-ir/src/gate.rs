//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IrError;

/// Gates the circuit library knows how to record and draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Controlled-X (CNOT) gate. Operands are `[control, target]`.
    CX,
}

impl StandardGate {
    /// Every supported gate, in the order they are listed to users.
    pub const ALL: [StandardGate; 5] = [
        StandardGate::H,
        StandardGate::X,
        StandardGate::Y,
        StandardGate::Z,
        StandardGate::CX,
    ];

    /// Get the lowercase name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::CX => "cx",
        }
    }

    /// Human-readable name used in status messages.
    pub fn display_name(self) -> &'static str {
        match self {
            StandardGate::H => "Hadamard",
            StandardGate::X => "Pauli-X",
            StandardGate::Y => "Pauli-Y",
            StandardGate::Z => "Pauli-Z",
            StandardGate::CX => "CNOT",
        }
    }

    /// Symbol drawn inside the gate box on the target wire.
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            StandardGate::H => 'H',
            StandardGate::X | StandardGate::CX => 'X',
            StandardGate::Y => 'Y',
            StandardGate::Z => 'Z',
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        match self {
            StandardGate::H | StandardGate::X | StandardGate::Y | StandardGate::Z => 1,
            StandardGate::CX => 2,
        }
    }

    /// Check whether the gate has a control operand.
    #[inline]
    pub fn is_controlled(self) -> bool {
        matches!(self, StandardGate::CX)
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StandardGate {
    type Err = IrError;

    /// Parse a gate name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        StandardGate::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| IrError::UnknownGate(name.to_string()))
    }
}
