//! QUASAR circuit representation
//!
//! This crate holds the circuit model the QUASAR engine builds on: qubit
//! identifiers, the supported gate set, instructions, and a DAG that tracks
//! gate count and depth. A [`Circuit`] also knows how to draw itself as a
//! text diagram through its [`Display`](std::fmt::Display) implementation.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use quasar_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2);
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_ops(), 2);
//! assert_eq!(circuit.depth(), 2);
//! println!("{circuit}");
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |

pub mod circuit;
pub mod dag;
pub mod diagram;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex};
pub use diagram::{DiagramLayout, draw_text};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::Instruction;
pub use qubit::{QubitId, wire_label};
