//! String-in, string-out tool entry points for agent frameworks.
//!
//! A [`ToolSession`] owns at most one active circuit. Each tool returns a
//! human-readable message; failures are reported in the message and never
//! as a panic or an `Err`.

use quasar_ir::{Circuit, QubitId};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::dispatch::{AppliedGate, apply_named_gate};
use crate::error::{EngineError, EngineResult};
use crate::factory::CircuitFactory;
use crate::render::Visualizer;

/// Tool that creates the active circuit.
pub const CREATE_TOOL: &str = "create_quantum_circuit";
/// Tool that applies a gate to the active circuit.
pub const APPLY_TOOL: &str = "apply_quantum_gate";
/// Tool that renders the active circuit.
pub const VISUALIZE_TOOL: &str = "visualize_quantum_circuit";

/// Message returned by the visualize tool when no circuit exists.
pub const NOTHING_TO_VISUALIZE: &str =
    "No active quantum circuit to visualize. Please create a circuit first.";

/// Holds the active circuit between tool calls.
#[derive(Debug)]
pub struct ToolSession {
    factory: CircuitFactory,
    visualizer: Visualizer,
    circuit: Option<Circuit>,
}

impl ToolSession {
    /// Create a session with no active circuit.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            factory: CircuitFactory::from_config(config),
            visualizer: Visualizer::new(config.render.clone()),
            circuit: None,
        }
    }

    /// The active circuit, if any.
    pub fn circuit(&self) -> Option<&Circuit> {
        self.circuit.as_ref()
    }

    /// Replace the active circuit with a new one of `num_qubits` qubits.
    ///
    /// On failure the session is left without an active circuit.
    pub fn create_quantum_circuit(&mut self, num_qubits: i64) -> String {
        match self.factory.create(num_qubits) {
            Ok(circuit) => {
                self.circuit = Some(circuit);
                format!(
                    "Successfully created quantum circuit with {num_qubits} qubits. Ready for gate operations."
                )
            }
            Err(e) => {
                self.circuit = None;
                format!("Failed to create quantum circuit with {num_qubits} qubits: {e}")
            }
        }
    }

    /// Apply `gate` to the active circuit.
    pub fn apply_quantum_gate(&mut self, gate: &str, target: i64, control: Option<i64>) -> String {
        match self.try_apply(gate, target, control) {
            Ok(applied) => describe(&applied),
            Err(e) => format!("Failed to apply gate '{}': {e}", gate.trim()),
        }
    }

    fn try_apply(
        &mut self,
        gate: &str,
        target: i64,
        control: Option<i64>,
    ) -> EngineResult<AppliedGate> {
        let circuit = self.circuit.as_mut().ok_or(EngineError::NoActiveCircuit)?;
        let num_qubits = circuit.num_qubits();
        let qubit = |raw: i64| {
            QubitId::try_from(raw).map_err(|_| EngineError::OperandOutOfRange {
                gate: gate.trim().to_ascii_lowercase(),
                qubit: raw,
                num_qubits,
            })
        };
        let target = qubit(target)?;
        let control = control.map(qubit).transpose()?;
        apply_named_gate(circuit, gate, target, control)
    }

    /// Render the active circuit.
    pub fn visualize_quantum_circuit(&self) -> String {
        match &self.circuit {
            Some(circuit) => self.visualizer.render(Some(circuit)).into_string(),
            None => NOTHING_TO_VISUALIZE.to_string(),
        }
    }

    /// Dispatch a tool call by name with JSON arguments.
    pub fn invoke(&mut self, name: &str, args: &Value) -> String {
        debug!(tool = name, %args, "Tool call");
        let result = match name {
            CREATE_TOOL => int_arg(args, "num_qubits").map(|n| self.create_quantum_circuit(n)),
            APPLY_TOOL => self.invoke_apply(args),
            VISUALIZE_TOOL => Ok(self.visualize_quantum_circuit()),
            other => Err(EngineError::InvalidArgument(format!(
                "unknown tool '{other}'. Available tools: {CREATE_TOOL}, {APPLY_TOOL}, {VISUALIZE_TOOL}"
            ))),
        };
        result.unwrap_or_else(|e| {
            warn!(tool = name, error = %e, "Tool call rejected");
            format!("Tool call failed: {e}")
        })
    }

    fn invoke_apply(&mut self, args: &Value) -> EngineResult<String> {
        let gate = str_arg(args, "gate_type")?;
        let target = int_arg(args, "target_qubit")?;
        let control = opt_int_arg(args, "control_qubit")?;
        Ok(self.apply_quantum_gate(gate, target, control))
    }
}

impl Default for ToolSession {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

fn describe(applied: &AppliedGate) -> String {
    match applied.control {
        Some(control) => format!(
            "Applied {} gate with control qubit {} and target qubit {}",
            applied.tag.display_name(),
            control.0,
            applied.target.0
        ),
        None => format!(
            "Applied {} gate to qubit {}",
            applied.tag.display_name(),
            applied.target.0
        ),
    }
}

fn int_arg(args: &Value, key: &str) -> EngineResult<i64> {
    opt_int_arg(args, key)?
        .ok_or_else(|| EngineError::InvalidArgument(format!("missing required argument '{key}'")))
}

fn opt_int_arg(args: &Value, key: &str) -> EngineResult<Option<i64>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_i64().map(Some).ok_or_else(|| {
            EngineError::InvalidArgument(format!("argument '{key}' must be an integer, got {v}"))
        }),
    }
}

fn str_arg<'a>(args: &'a Value, key: &str) -> EngineResult<&'a str> {
    match args.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(v) => Err(EngineError::InvalidArgument(format!(
            "argument '{key}' must be a string, got {v}"
        ))),
        None => Err(EngineError::InvalidArgument(format!(
            "missing required argument '{key}'"
        ))),
    }
}

/// JSON descriptions of the three tools, in the function-calling format
/// agent frameworks expect.
pub fn tool_definitions() -> Value {
    json!([
        {
            "name": CREATE_TOOL,
            "description": "Create a new quantum circuit with specified number of qubits.",
            "parameters": {
                "type": "object",
                "properties": {
                    "num_qubits": {
                        "type": "integer",
                        "minimum": 1,
                        "description": "Number of qubits in the circuit"
                    }
                },
                "required": ["num_qubits"]
            }
        },
        {
            "name": APPLY_TOOL,
            "description": "Apply a quantum gate to a specific qubit.",
            "parameters": {
                "type": "object",
                "properties": {
                    "gate_type": {
                        "type": "string",
                        "enum": ["h", "x", "y", "z", "cx"],
                        "description": "Gate to apply"
                    },
                    "target_qubit": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Target qubit index"
                    },
                    "control_qubit": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Control qubit index, for cx only"
                    }
                },
                "required": ["gate_type", "target_qubit"]
            }
        },
        {
            "name": VISUALIZE_TOOL,
            "description": "Generate visualization of the current quantum circuit.",
            "parameters": {
                "type": "object",
                "properties": {}
            }
        }
    ])
}
