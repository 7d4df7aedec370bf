//! Self-test command implementation.

use anyhow::{Result, ensure};
use console::style;
use quasar_engine::{
    CircuitFactory, CircuitSummary, EngineConfig, GateTag, ToolSession, Visualizer, apply_gate,
};
use quasar_ir::QubitId;

use super::common::{banner, print_summary, print_tier};

/// Run the scripted checks and report each stage.
pub fn execute(config: &EngineConfig) -> Result<()> {
    banner("1. Circuit creation");
    let mut circuit = CircuitFactory::from_config(config).create(3)?;

    banner("2. Gate applications");
    apply_gate(&mut circuit, GateTag::H, QubitId(0), None)?;
    apply_gate(&mut circuit, GateTag::X, QubitId(1), None)?;
    apply_gate(&mut circuit, GateTag::CX, QubitId(2), Some(QubitId(1)))?;
    apply_gate(&mut circuit, GateTag::Y, QubitId(0), None)?;

    banner("3. Visualization");
    let artifact = Visualizer::new(config.render.clone()).render(Some(&circuit));
    print_tier(&artifact);
    ensure!(!artifact.is_error(), "visualization failed: {artifact}");

    banner("4. Circuit information");
    let summary = CircuitSummary::of(&circuit);
    print_summary(&summary);
    ensure!(summary.num_ops == 4, "expected 4 gates, found {}", summary.num_ops);

    banner("5. Tool session");
    let mut session = ToolSession::new(config);
    let results = [
        session.create_quantum_circuit(2),
        session.apply_quantum_gate("h", 0, None),
        session.apply_quantum_gate("x", 1, None),
        session.apply_quantum_gate("cx", 1, Some(0)),
    ];
    for (i, result) in results.iter().enumerate() {
        println!("  Tool {}: {result}", i + 1);
    }

    println!();
    println!("{} Self-test completed", style("✓").green().bold());
    Ok(())
}
