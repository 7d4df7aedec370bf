//! Circuit creation.

use quasar_ir::Circuit;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};

/// Creates empty circuits after checking the requested size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CircuitFactory {
    max_qubits: Option<u32>,
}

impl CircuitFactory {
    /// Create a factory that accepts any positive qubit count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory that rejects circuits larger than `max_qubits`.
    pub fn with_limit(max_qubits: u32) -> Self {
        Self {
            max_qubits: Some(max_qubits),
        }
    }

    /// Create a factory from the engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            max_qubits: config.max_qubits,
        }
    }

    /// Create a circuit with `num_qubits` qubits and no gates.
    pub fn create(&self, num_qubits: i64) -> EngineResult<Circuit> {
        match self.check(num_qubits) {
            Ok(n) => {
                let circuit = Circuit::with_size("quasar", n);
                info!(num_qubits = n, "Created quantum circuit with {n} qubit(s)");
                Ok(circuit)
            }
            Err(e) => {
                warn!(num_qubits, error = %e, "Error creating circuit");
                Err(e)
            }
        }
    }

    fn check(&self, num_qubits: i64) -> EngineResult<u32> {
        if num_qubits <= 0 {
            return Err(EngineError::InvalidArgument(format!(
                "Number of qubits must be positive, got {num_qubits}"
            )));
        }
        let n = u32::try_from(num_qubits).map_err(|_| {
            EngineError::InvalidArgument(format!(
                "Number of qubits {num_qubits} does not fit a qubit index"
            ))
        })?;
        match self.max_qubits {
            Some(limit) if n > limit => Err(EngineError::InvalidArgument(format!(
                "Number of qubits {num_qubits} exceeds the limit of {limit}"
            ))),
            _ => Ok(n),
        }
    }
}

/// Create a circuit with no qubit ceiling.
pub fn create_circuit(num_qubits: i64) -> EngineResult<Circuit> {
    CircuitFactory::new().create(num_qubits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_positive() {
        let circuit = create_circuit(3).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_ops(), 0);
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_create_rejects_non_positive() {
        for n in [0, -1, i64::MIN] {
            let err = create_circuit(n).unwrap_err();
            assert!(matches!(err, EngineError::InvalidArgument(_)), "{n}");
        }
    }

    #[test]
    fn test_default_has_no_ceiling() {
        for n in [64, 65, 100, 1000] {
            assert_eq!(create_circuit(n).unwrap().num_qubits(), n as usize);
        }
        let from_defaults = CircuitFactory::from_config(&EngineConfig::default());
        assert_eq!(from_defaults, CircuitFactory::new());
        assert_eq!(from_defaults.create(100).unwrap().num_qubits(), 100);
    }

    #[test]
    fn test_create_rejects_unrepresentable_count() {
        let err = create_circuit(i64::MAX).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(msg) if msg.contains("qubit index")));
    }

    #[test]
    fn test_create_respects_configured_ceiling() {
        let factory = CircuitFactory::with_limit(4);
        assert_eq!(factory.create(4).unwrap().num_qubits(), 4);
        assert!(matches!(
            factory.create(5),
            Err(EngineError::InvalidArgument(msg)) if msg.contains("limit of 4")
        ));
    }
}
