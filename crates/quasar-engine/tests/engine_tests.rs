//! End-to-end scenarios across the factory, dispatcher, visualizer, and
//! tool session.

use quasar_engine::render::NO_CIRCUIT;
use quasar_engine::session::{APPLY_TOOL, CREATE_TOOL, VISUALIZE_TOOL};
use quasar_engine::{
    Artifact, EngineConfig, GateCall, GateTag, RenderConfig, Tier, ToolSession,
    UnavailableBackend, Visualizer, apply_gate, create_circuit,
};
use quasar_ir::QubitId;
use serde_json::json;

#[test]
fn test_bell_scenario() {
    let mut circuit = create_circuit(2).unwrap();
    apply_gate(&mut circuit, GateTag::H, QubitId(0), None).unwrap();
    apply_gate(&mut circuit, GateTag::CX, QubitId(1), Some(QubitId(0))).unwrap();

    let artifact = Visualizer::default().render(Some(&circuit));
    assert_eq!(artifact.tier(), Some(Tier::RichImage));
    let html = artifact.as_str();
    assert!(html.contains("<strong>Qubits:</strong> 2"));
    assert!(html.contains("<strong>Gates:</strong> 2"));
    assert!(html.contains("<strong>Depth:</strong> 2"));
}

#[test]
fn test_self_test_sequence() {
    let mut circuit = create_circuit(3).unwrap();
    apply_gate(&mut circuit, GateTag::H, QubitId(0), None).unwrap();
    apply_gate(&mut circuit, GateTag::X, QubitId(1), None).unwrap();
    let cx = apply_gate(&mut circuit, GateTag::CX, QubitId(2), Some(QubitId(1))).unwrap();
    apply_gate(&mut circuit, GateTag::Y, QubitId(0), None).unwrap();

    assert_eq!(cx.control, Some(QubitId(1)));
    assert_eq!(cx.target, QubitId(2));

    assert_eq!(circuit.num_qubits(), 3);
    assert_eq!(circuit.num_ops(), 4);
    assert_eq!(circuit.depth(), 2);
}

#[test]
fn test_render_none() {
    let artifact = Visualizer::default().render(None);
    assert!(matches!(artifact, Artifact::Error(ref msg) if msg == NO_CIRCUIT));
}

#[test]
fn test_forced_fallback_keeps_diagram() {
    let mut circuit = create_circuit(2).unwrap();
    for call in ["h:0", "cx:0"] {
        call.parse::<GateCall>().unwrap().apply(&mut circuit).unwrap();
    }

    let visualizer = Visualizer::with_backend(
        RenderConfig::default(),
        Box::new(UnavailableBackend::new("no display")),
    );
    let artifact = visualizer.render(Some(&circuit));
    assert_eq!(artifact.tier(), Some(Tier::TextHtml));
    assert!(artifact.as_str().contains("Quantum Circuit (Text View)"));
    assert!(artifact.as_str().contains("q_0: ─┤ H ├───■───"));
}

#[test]
fn test_config_disables_rich_image() {
    let config = EngineConfig::from_yaml_str("render:\n  rich_image: false\n").unwrap();
    let mut session = ToolSession::new(&config);
    session.create_quantum_circuit(1);
    let html = session.visualize_quantum_circuit();
    assert!(html.contains("#ff9800"));
    assert!(!html.contains("data:image/png"));
}

#[test]
fn test_default_session_creates_wide_circuits() {
    let mut session = ToolSession::default();
    assert_eq!(
        session.create_quantum_circuit(100),
        "Successfully created quantum circuit with 100 qubits. Ready for gate operations."
    );
    assert_eq!(session.circuit().unwrap().num_qubits(), 100);
    assert_eq!(
        session.apply_quantum_gate("cx", 99, None),
        "Applied CNOT gate with control qubit 99 and target qubit 0"
    );
    assert!(session.visualize_quantum_circuit().contains("<strong>Qubits:</strong> 100"));
}

#[test]
fn test_session_ceiling_from_config() {
    let config = EngineConfig::from_yaml_str("max_qubits: 2\n").unwrap();
    let mut session = ToolSession::new(&config);
    assert!(session.create_quantum_circuit(3).contains("exceeds the limit of 2"));
    assert!(session.circuit().is_none());
}

#[test]
fn test_tool_round_trip() {
    let mut session = ToolSession::default();
    let results: Vec<String> = [
        (CREATE_TOOL, json!({"num_qubits": 2})),
        (APPLY_TOOL, json!({"gate_type": "h", "target_qubit": 0})),
        (APPLY_TOOL, json!({"gate_type": "x", "target_qubit": 1})),
        (APPLY_TOOL, json!({"gate_type": "cx", "target_qubit": 1, "control_qubit": 0})),
    ]
    .iter()
    .map(|(name, args)| session.invoke(name, args))
    .collect();

    assert_eq!(
        results,
        [
            "Successfully created quantum circuit with 2 qubits. Ready for gate operations.",
            "Applied Hadamard gate to qubit 0",
            "Applied Pauli-X gate to qubit 1",
            "Applied CNOT gate with control qubit 0 and target qubit 1",
        ]
    );

    let html = session.invoke(VISUALIZE_TOOL, &json!({}));
    assert!(html.contains("<strong>Gates:</strong> 3"));
}
