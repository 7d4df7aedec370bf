//! Error types for the engine.

use quasar_ir::{IrError, StandardGate};
use thiserror::Error;

/// Errors surfaced by circuit creation, gate dispatch, configuration, and
/// the tool session.
///
/// Every variant is recoverable. The dispatcher guarantees the circuit is
/// unchanged whenever it returns one of these.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// A caller-supplied value is outside what the engine accepts.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The gate tag does not name a supported gate.
    #[error("Unknown gate: {name}. Supported gates: {}", supported_gates())]
    UnknownGate {
        /// The tag as given, trimmed.
        name: String,
    },

    /// A qubit operand is not a wire of the circuit.
    #[error("Qubit {qubit} is out of range for gate '{gate}' on a {num_qubits}-qubit circuit")]
    OperandOutOfRange {
        /// Gate being applied.
        gate: String,
        /// Offending index as requested.
        qubit: i64,
        /// Size of the circuit.
        num_qubits: usize,
    },

    /// The same qubit was used as both control and target.
    #[error("Gate '{gate}' uses qubit {qubit} as both control and target")]
    DuplicateOperand {
        /// Gate being applied.
        gate: String,
        /// The repeated qubit.
        qubit: u32,
    },

    /// A tool call needs a circuit but none has been created.
    #[error("No active quantum circuit. Please create a circuit first using create_quantum_circuit.")]
    NoActiveCircuit,

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other circuit library failure.
    #[error("Circuit error: {0}")]
    Circuit(String),
}

/// Comma-separated list of the supported gate tags.
pub fn supported_gates() -> String {
    StandardGate::ALL
        .iter()
        .map(|g| g.name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<IrError> for EngineError {
    fn from(err: IrError) -> Self {
        match err {
            IrError::QubitNotFound {
                qubit,
                num_qubits,
                gate_name,
            } => EngineError::OperandOutOfRange {
                gate: gate_name.unwrap_or_default(),
                qubit: i64::from(qubit.0),
                num_qubits,
            },
            IrError::DuplicateQubit { qubit, gate_name } => EngineError::DuplicateOperand {
                gate: gate_name.unwrap_or_default(),
                qubit: qubit.0,
            },
            IrError::UnknownGate(name) => EngineError::UnknownGate { name },
            other => EngineError::Circuit(other.to_string()),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Failures inside the rich-image tier.
///
/// These never reach callers of the visualizer: each one moves the pipeline
/// on to the text-as-HTML tier.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The raster backend cannot be used in this process.
    #[error("Render backend '{backend}' is unavailable: {reason}")]
    BackendUnavailable {
        /// Backend name.
        backend: String,
        /// Why it is unavailable.
        reason: String,
    },

    /// The drawing surface could not be allocated.
    #[error("Cannot allocate a {width}x{height} canvas")]
    Canvas {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// A shape could not be built from the layout.
    #[error("Invalid drawing geometry: {0}")]
    Geometry(String),

    /// The finished image could not be encoded.
    #[error("Image encoding failed: {0}")]
    Encode(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use quasar_ir::QubitId;

    #[test]
    fn test_unknown_gate_lists_supported() {
        let err = EngineError::UnknownGate { name: "swap".into() };
        assert_eq!(
            err.to_string(),
            "Unknown gate: swap. Supported gates: h, x, y, z, cx"
        );
    }

    #[test]
    fn test_ir_errors_map_to_engine_kinds() {
        let err: EngineError = IrError::QubitNotFound {
            qubit: QubitId(4),
            num_qubits: 2,
            gate_name: Some("h".into()),
        }
        .into();
        assert!(matches!(
            err,
            EngineError::OperandOutOfRange { qubit: 4, num_qubits: 2, ref gate } if gate == "h"
        ));

        let err: EngineError = IrError::DuplicateQubit {
            qubit: QubitId(1),
            gate_name: Some("cx".into()),
        }
        .into();
        assert!(matches!(err, EngineError::DuplicateOperand { qubit: 1, .. }));

        let err: EngineError = IrError::InvalidDag("broken".into()).into();
        assert!(matches!(err, EngineError::Circuit(_)));
    }
}
