//! Gate dispatch.
//!
//! Maps a gate tag plus qubit operands onto a mutation of a circuit. Every
//! failure is reported as an [`EngineError`] with the circuit left exactly as
//! it was, so callers can log and carry on with the unchanged circuit.
//!
//! # Default CNOT wiring
//!
//! When `cx` is applied without a control qubit, the operands are wired as
//! follows:
//!
//! | `target` | control | target |
//! |----------|---------|--------|
//! | `k < last` | `k` | `k + 1` |
//! | `last` | `last` | `0` |
//!
//! The wrap to qubit 0 is a convenience default kept for compatibility with
//! existing tool callers, not a layout rule with physical meaning.

use std::fmt;
use std::str::FromStr;

use quasar_ir::{Circuit, Instruction, QubitId, StandardGate};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

/// Gate tags accepted by the dispatcher.
pub type GateTag = StandardGate;

/// A gate that was successfully appended, with its resolved operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedGate {
    /// The gate applied.
    pub tag: GateTag,
    /// Control qubit, for controlled gates.
    pub control: Option<QubitId>,
    /// Target qubit.
    pub target: QubitId,
}

impl fmt::Display for AppliedGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.control {
            Some(control) => write!(
                f,
                "Applied {} gate: control={}, target={}",
                self.tag.display_name(),
                control.0,
                self.target.0
            ),
            None => write!(
                f,
                "Applied {} gate to qubit {}",
                self.tag.display_name(),
                self.target.0
            ),
        }
    }
}

/// Resolve the `(control, target)` pair for a CNOT.
///
/// An explicit control is used as given. Otherwise the default wiring from
/// the module docs applies.
pub fn resolve_cx(
    circuit: &Circuit,
    target: QubitId,
    control: Option<QubitId>,
) -> EngineResult<(QubitId, QubitId)> {
    if let Some(control) = control {
        return Ok((control, target));
    }

    match circuit.last_qubit() {
        Some(last) if target < last => Ok((target, QubitId(target.0 + 1))),
        Some(last) if target == last => Ok((target, QubitId(0))),
        _ => Err(EngineError::OperandOutOfRange {
            gate: GateTag::CX.name().to_string(),
            qubit: i64::from(target.0),
            num_qubits: circuit.num_qubits(),
        }),
    }
}

/// Apply `tag` to `circuit`.
///
/// Single-qubit gates act on `target` and ignore `control`.
pub fn apply_gate(
    circuit: &mut Circuit,
    tag: GateTag,
    target: QubitId,
    control: Option<QubitId>,
) -> EngineResult<AppliedGate> {
    let result = build(circuit, tag, target, control).and_then(|(instruction, applied)| {
        circuit.append(instruction)?;
        Ok(applied)
    });

    match &result {
        Ok(applied) => info!(gate = %tag, "{applied}"),
        Err(e) => warn!(gate = %tag, target = target.0, error = %e, "Error applying gate"),
    }
    result
}

fn build(
    circuit: &Circuit,
    tag: GateTag,
    target: QubitId,
    control: Option<QubitId>,
) -> EngineResult<(Instruction, AppliedGate)> {
    if tag.is_controlled() {
        let (control, target) = resolve_cx(circuit, target, control)?;
        Ok((
            Instruction::two_qubit_gate(tag, control, target),
            AppliedGate {
                tag,
                control: Some(control),
                target,
            },
        ))
    } else {
        Ok((
            Instruction::single_qubit_gate(tag, target),
            AppliedGate {
                tag,
                control: None,
                target,
            },
        ))
    }
}

/// Parse `name` as a gate tag and apply it.
///
/// Unknown names yield [`EngineError::UnknownGate`] and leave the circuit
/// unchanged.
pub fn apply_named_gate(
    circuit: &mut Circuit,
    name: &str,
    target: QubitId,
    control: Option<QubitId>,
) -> EngineResult<AppliedGate> {
    match name.parse::<GateTag>() {
        Ok(tag) => apply_gate(circuit, tag, target, control),
        Err(e) => {
            let err = EngineError::from(e);
            warn!(gate = name.trim(), "{err}");
            Err(err)
        }
    }
}

/// A gate request written as `tag:target[:control]`, e.g. `h:0` or `cx:1:0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateCall {
    /// Gate tag as written. Not validated until dispatch.
    pub name: String,
    /// Target qubit.
    pub target: u32,
    /// Optional control qubit.
    pub control: Option<u32>,
}

impl GateCall {
    /// Dispatch this call against `circuit`.
    pub fn apply(&self, circuit: &mut Circuit) -> EngineResult<AppliedGate> {
        apply_named_gate(
            circuit,
            &self.name,
            QubitId(self.target),
            self.control.map(QubitId),
        )
    }
}

impl fmt::Display for GateCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.target)?;
        if let Some(control) = self.control {
            write!(f, ":{control}")?;
        }
        Ok(())
    }
}

impl FromStr for GateCall {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |why: &str| {
            EngineError::InvalidArgument(format!(
                "invalid gate spec '{s}': {why} (expected tag:target[:control])"
            ))
        };
        let parse_qubit = |raw: &str| -> Result<u32, EngineError> {
            raw.trim()
                .parse()
                .map_err(|_| invalid(&format!("'{}' is not a qubit index", raw.trim())))
        };

        let mut parts = s.split(':');
        let name = parts.next().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(invalid("missing gate tag"));
        }
        let target = parts
            .next()
            .ok_or_else(|| invalid("missing target qubit"))
            .and_then(parse_qubit)?;
        let control = parts.next().map(parse_qubit).transpose()?;
        if parts.next().is_some() {
            return Err(invalid("too many fields"));
        }

        Ok(Self {
            name: name.to_string(),
            target,
            control,
        })
    }
}
