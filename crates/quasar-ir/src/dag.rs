//! DAG-based circuit representation.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// A node in the circuit DAG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DagNode {
    /// Input node for a qubit wire.
    In(QubitId),
    /// Output node for a qubit wire.
    Out(QubitId),
    /// Operation node containing an instruction.
    Op(Instruction),
}

impl DagNode {
    /// Check if this is an operation node.
    #[inline]
    pub fn is_op(&self) -> bool {
        matches!(self, DagNode::Op(_))
    }

    /// Get the instruction if this is an operation node.
    #[inline]
    pub fn instruction(&self) -> Option<&Instruction> {
        match self {
            DagNode::Op(inst) => Some(inst),
            _ => None,
        }
    }
}

/// An edge in the circuit DAG, carrying the qubit wire it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DagEdge {
    /// The wire this edge represents.
    pub wire: QubitId,
}

/// DAG-based circuit representation.
///
/// - Nodes are input nodes, output nodes, or operation nodes
/// - Edges are qubit wires
/// - Each wire runs from exactly one `In` node to exactly one `Out` node
///
/// Operations are only ever appended, so node insertion order is a valid
/// topological order of the operation nodes.
///
/// The DAG keeps a `wire_front` index mapping each wire to the node just
/// before its output node, so `apply()` finds predecessors in O(1).
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    graph: DiGraph<DagNode, DagEdge, u32>,
    qubit_inputs: FxHashMap<QubitId, NodeIndex>,
    qubit_outputs: FxHashMap<QubitId, NodeIndex>,
    wire_front: FxHashMap<QubitId, NodeIndex>,
}

impl CircuitDag {
    /// Create a new empty circuit DAG.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a qubit wire. Adding an existing qubit is a no-op.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        if self.qubit_inputs.contains_key(&qubit) {
            return;
        }
        let in_node = self.graph.add_node(DagNode::In(qubit));
        let out_node = self.graph.add_node(DagNode::Out(qubit));
        self.graph.add_edge(in_node, out_node, DagEdge { wire: qubit });
        self.qubit_inputs.insert(qubit, in_node);
        self.qubit_outputs.insert(qubit, out_node);
        self.wire_front.insert(qubit, in_node);
    }

    /// Validate an instruction against this DAG without modifying it.
    pub fn check(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = instruction.gate.name();

        let expected = instruction.gate.num_qubits() as usize;
        let got = instruction.qubits.len();
        if expected != got {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate_name.to_string(),
                expected: expected as u32,
                got: got as u32,
            });
        }

        for &qubit in &instruction.qubits {
            if !self.contains_qubit(qubit) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    num_qubits: self.num_qubits(),
                    gate_name: Some(gate_name.to_string()),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(gate_name.to_string()),
                });
            }
        }

        Ok(())
    }

    /// Append an instruction to the circuit.
    ///
    /// The instruction is fully validated before the graph is touched, so a
    /// failed call leaves the DAG unchanged.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        self.check(&instruction)?;

        // Look every edge up before mutating anything.
        let mut splices = Vec::with_capacity(instruction.qubits.len());
        for &qubit in &instruction.qubits {
            let out_node = self.qubit_outputs[&qubit];
            let prev_node = self.wire_front[&qubit];
            let edge = self
                .graph
                .edges_directed(prev_node, Direction::Outgoing)
                .find(|e| e.weight().wire == qubit && e.target() == out_node)
                .map(|e| e.id())
                .ok_or_else(|| {
                    IrError::InvalidDag(format!(
                        "Missing edge from predecessor to output for wire {qubit}"
                    ))
                })?;
            splices.push((qubit, prev_node, out_node, edge));
        }

        let op_node = self.graph.add_node(DagNode::Op(instruction));

        // Edge removal swaps the last edge into the removed slot, so remove
        // in descending index order to keep the remaining ids valid.
        let mut stale: Vec<_> = splices.iter().map(|s| s.3).collect();
        stale.sort_unstable_by(|a, b| b.cmp(a));
        for edge in stale {
            self.graph.remove_edge(edge);
        }

        for (wire, prev_node, out_node, _) in splices {
            self.graph.add_edge(prev_node, op_node, DagEdge { wire });
            self.graph.add_edge(op_node, out_node, DagEdge { wire });
            self.wire_front.insert(wire, op_node);
        }

        Ok(op_node)
    }

    /// Iterate over operations in the order they were applied.
    pub fn ops(&self) -> impl Iterator<Item = &Instruction> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph[idx].instruction())
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.qubit_inputs.len()
    }

    /// Get the number of operations.
    ///
    /// Computed as total nodes minus the two I/O nodes of each wire.
    #[inline]
    pub fn num_ops(&self) -> usize {
        let io_nodes = 2 * self.qubit_inputs.len();
        self.graph.node_count().saturating_sub(io_nodes)
    }

    /// Calculate the circuit depth: the longest chain of operations along
    /// any path through the wires.
    pub fn depth(&self) -> usize {
        let mut depths: FxHashMap<NodeIndex, usize> =
            FxHashMap::with_capacity_and_hasher(self.graph.node_count(), Default::default());
        let mut max_depth = 0usize;

        // Insertion order is topological for op nodes; In nodes count as 0.
        for node in self.graph.node_indices() {
            if !self.graph[node].is_op() {
                continue;
            }
            let node_depth = self
                .graph
                .edges_directed(node, Direction::Incoming)
                .map(|e| depths.get(&e.source()).copied().unwrap_or(0))
                .max()
                .unwrap_or(0)
                + 1;
            max_depth = max_depth.max(node_depth);
            depths.insert(node, node_depth);
        }

        max_depth
    }

    /// Iterate over qubits in index order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        let mut qubits: Vec<_> = self.qubit_inputs.keys().copied().collect();
        qubits.sort_unstable();
        qubits.into_iter()
    }

    /// Check whether `qubit` is a wire of this DAG.
    #[inline]
    pub fn contains_qubit(&self, qubit: QubitId) -> bool {
        self.qubit_inputs.contains_key(&qubit)
    }

    /// Get a reference to the underlying graph.
    pub fn graph(&self) -> &DiGraph<DagNode, DagEdge, u32> {
        &self.graph
    }

    /// Verify the structural integrity of the DAG.
    ///
    /// Every wire must form a single path from its `In` node to its `Out`
    /// node, and the graph must be acyclic.
    pub fn verify_integrity(&self) -> IrResult<()> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(IrError::InvalidDag("Graph contains a cycle".into()));
        }

        for (&qubit, &in_node) in &self.qubit_inputs {
            let out_node = self.qubit_outputs.get(&qubit).copied().ok_or_else(|| {
                IrError::InvalidDag(format!("Wire {qubit} has no output node"))
            })?;

            let mut current = in_node;
            let mut steps = 0usize;
            while current != out_node {
                let mut next = self
                    .graph
                    .edges_directed(current, Direction::Outgoing)
                    .filter(|e| e.weight().wire == qubit)
                    .map(|e| e.target());
                current = match (next.next(), next.next()) {
                    (Some(n), None) => n,
                    (None, _) => {
                        return Err(IrError::InvalidDag(format!(
                            "Wire {qubit} ends before its output node"
                        )));
                    }
                    (Some(_), Some(_)) => {
                        return Err(IrError::InvalidDag(format!(
                            "Wire {qubit} branches at node {}",
                            current.index()
                        )));
                    }
                };
                steps += 1;
                if steps > self.graph.node_count() {
                    return Err(IrError::InvalidDag(format!("Wire {qubit} does not terminate")));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;

    fn dag_with(n: u32) -> CircuitDag {
        let mut dag = CircuitDag::new();
        for q in 0..n {
            dag.add_qubit(QubitId(q));
        }
        dag
    }

    #[test]
    fn test_empty_dag() {
        let dag = CircuitDag::new();
        assert_eq!(dag.num_qubits(), 0);
        assert_eq!(dag.num_ops(), 0);
        assert_eq!(dag.depth(), 0);
    }

    #[test]
    fn test_add_qubit_is_idempotent() {
        let mut dag = dag_with(2);
        dag.add_qubit(QubitId(1));
        assert_eq!(dag.num_qubits(), 2);
    }

    #[test]
    fn test_bell_state_depth() {
        let mut dag = dag_with(2);
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::two_qubit_gate(
            StandardGate::CX,
            QubitId(0),
            QubitId(1),
        ))
        .unwrap();

        assert_eq!(dag.num_ops(), 2);
        assert_eq!(dag.depth(), 2);
        dag.verify_integrity().unwrap();
    }

    #[test]
    fn test_parallel_gates_depth() {
        let mut dag = dag_with(2);
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::X, QubitId(1)))
            .unwrap();

        assert_eq!(dag.num_ops(), 2);
        assert_eq!(dag.depth(), 1);
    }

    #[test]
    fn test_gate_arity_mismatch() {
        let mut dag = dag_with(2);
        let result = dag.apply(Instruction::gate(StandardGate::CX, [QubitId(0)]));

        match result {
            Err(IrError::QubitCountMismatch {
                gate_name,
                expected,
                got,
            }) => {
                assert_eq!(gate_name, "cx");
                assert_eq!(expected, 2);
                assert_eq!(got, 1);
            }
            other => panic!("Expected QubitCountMismatch error, got {other:?}"),
        }
        assert_eq!(dag.num_ops(), 0);
    }

    #[test]
    fn test_qubit_not_found_leaves_dag_untouched() {
        let mut dag = dag_with(1);
        let inst = Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(99));

        match dag.apply(inst) {
            Err(IrError::QubitNotFound {
                qubit,
                num_qubits,
                gate_name,
            }) => {
                assert_eq!(qubit, QubitId(99));
                assert_eq!(num_qubits, 1);
                assert_eq!(gate_name.as_deref(), Some("cx"));
            }
            other => panic!("Expected QubitNotFound error, got {other:?}"),
        }
        assert_eq!(dag.num_ops(), 0);
        assert_eq!(dag.graph().edge_count(), 1);
        dag.verify_integrity().unwrap();
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        let mut dag = dag_with(2);
        let inst = Instruction::two_qubit_gate(StandardGate::CX, QubitId(1), QubitId(1));
        assert!(matches!(
            dag.apply(inst),
            Err(IrError::DuplicateQubit { qubit: QubitId(1), .. })
        ));
        assert_eq!(dag.num_ops(), 0);
    }

    #[test]
    fn test_ops_in_application_order() {
        let mut dag = dag_with(3);
        dag.apply(Instruction::single_qubit_gate(StandardGate::Z, QubitId(2)))
            .unwrap();
        dag.apply(Instruction::two_qubit_gate(
            StandardGate::CX,
            QubitId(2),
            QubitId(0),
        ))
        .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::Y, QubitId(1)))
            .unwrap();

        let names: Vec<_> = dag.ops().map(|i| i.gate.name()).collect();
        assert_eq!(names, ["z", "cx", "y"]);
        assert_eq!(dag.depth(), 2);
        dag.verify_integrity().unwrap();
    }

    #[test]
    fn test_contains_qubit_matches_check() {
        let dag = dag_with(2);
        assert!(dag.contains_qubit(QubitId(1)));
        assert!(!dag.contains_qubit(QubitId(2)));
        assert!(dag.check(&Instruction::single_qubit_gate(StandardGate::H, QubitId(1))).is_ok());
        assert!(matches!(
            dag.check(&Instruction::single_qubit_gate(StandardGate::H, QubitId(2))),
            Err(IrError::QubitNotFound { qubit: QubitId(2), .. })
        ));
    }

    #[test]
    fn test_qubits_sorted() {
        let dag = dag_with(4);
        let qubits: Vec<_> = dag.qubits().collect();
        assert_eq!(qubits, [QubitId(0), QubitId(1), QubitId(2), QubitId(3)]);
    }
}
