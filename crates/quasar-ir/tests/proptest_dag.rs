//! Property-based tests for the circuit DAG and its text diagram.

use proptest::prelude::*;
use quasar_ir::{Circuit, DiagramLayout, QubitId};

/// Gate operations that can be applied to a circuit.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    Y(u32),
    Z(u32),
    CX(u32, u32),
}

impl GateOp {
    fn apply(self, circuit: &mut Circuit) -> bool {
        let result = match self {
            GateOp::H(q) => circuit.h(QubitId(q)).map(|_| ()),
            GateOp::X(q) => circuit.x(QubitId(q)).map(|_| ()),
            GateOp::Y(q) => circuit.y(QubitId(q)).map(|_| ()),
            GateOp::Z(q) => circuit.z(QubitId(q)).map(|_| ()),
            GateOp::CX(c, t) => circuit.cx(QubitId(c), QubitId(t)).map(|_| ()),
        };
        result.is_ok()
    }
}

/// Operands may fall one past the last qubit, and CX may repeat a qubit.
fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    prop_oneof![
        (0..=num_qubits).prop_map(GateOp::H),
        (0..=num_qubits).prop_map(GateOp::X),
        (0..=num_qubits).prop_map(GateOp::Y),
        (0..=num_qubits).prop_map(GateOp::Z),
        (0..=num_qubits, 0..=num_qubits).prop_map(|(c, t)| GateOp::CX(c, t)),
    ]
}

fn arb_ops() -> impl Strategy<Value = (u32, Vec<GateOp>)> {
    (1_u32..=6).prop_flat_map(|num_qubits| {
        (
            Just(num_qubits),
            prop::collection::vec(arb_gate_op(num_qubits), 0..=16),
        )
    })
}

proptest! {
    #[test]
    fn only_accepted_gates_are_counted((num_qubits, ops) in arb_ops()) {
        let mut circuit = Circuit::with_size("prop", num_qubits);
        let mut accepted = 0;
        for op in ops {
            if op.apply(&mut circuit) {
                accepted += 1;
            }
        }

        prop_assert_eq!(circuit.num_ops(), accepted);
        prop_assert_eq!(circuit.num_qubits(), num_qubits as usize);
        prop_assert!(circuit.depth() <= circuit.num_ops());
        prop_assert!(circuit.dag().verify_integrity().is_ok());
    }

    #[test]
    fn diagram_has_three_rows_per_qubit((num_qubits, ops) in arb_ops()) {
        let mut circuit = Circuit::with_size("prop", num_qubits);
        for op in ops {
            op.apply(&mut circuit);
        }

        let text = circuit.to_string();
        let rows: Vec<&str> = text.split('\n').collect();
        prop_assert_eq!(rows.len(), 3 * num_qubits as usize);
        for q in 0..num_qubits {
            let label = format!("q_{q}: ");
            prop_assert!(rows[3 * q as usize + 1].trim_start().starts_with(&label));
        }
    }

    #[test]
    fn layout_places_every_gate_once((num_qubits, ops) in arb_ops()) {
        let mut circuit = Circuit::with_size("prop", num_qubits);
        for op in ops {
            op.apply(&mut circuit);
        }

        let layout = DiagramLayout::of(&circuit);
        let placed: usize = layout.columns().iter().map(Vec::len).sum();
        prop_assert_eq!(placed, circuit.num_ops());
        prop_assert!(layout.num_columns() >= circuit.depth());
    }
}
