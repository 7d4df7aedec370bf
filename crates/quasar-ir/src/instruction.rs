//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// A gate together with the qubits it acts on.
///
/// For controlled gates the operand order is `[control, target]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate being applied.
    pub gate: StandardGate,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// The control qubit, if this is a controlled gate.
    pub fn control(&self) -> Option<QubitId> {
        if self.gate.is_controlled() {
            self.qubits.first().copied()
        } else {
            None
        }
    }

    /// The qubit the gate's action lands on (the last operand).
    pub fn target(&self) -> Option<QubitId> {
        self.qubits.last().copied()
    }

    /// Lowest and highest wire touched by this instruction.
    pub fn span(&self) -> Option<(QubitId, QubitId)> {
        let lo = self.qubits.iter().min()?;
        let hi = self.qubits.iter().max()?;
        Some((*lo, *hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_qubit_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(2));
        assert_eq!(inst.control(), None);
        assert_eq!(inst.target(), Some(QubitId(2)));
        assert_eq!(inst.span(), Some((QubitId(2), QubitId(2))));
    }

    #[test]
    fn test_cx_operand_roles() {
        let inst = Instruction::two_qubit_gate(StandardGate::CX, QubitId(2), QubitId(0));
        assert_eq!(inst.control(), Some(QubitId(2)));
        assert_eq!(inst.target(), Some(QubitId(0)));
        assert_eq!(inst.span(), Some((QubitId(0), QubitId(2))));
    }

    #[test]
    fn test_instruction_serde() {
        let inst = Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1));
        let json = serde_json::to_value(&inst).unwrap();
        assert_eq!(json, serde_json::json!({ "gate": "CX", "qubits": [0, 1] }));

        let back: Instruction = serde_json::from_value(json).unwrap();
        assert_eq!(back, inst);
    }
}
