//! Demo command implementation.

use anyhow::Result;
use console::style;
use quasar_engine::{
    CircuitFactory, CircuitSummary, EngineConfig, GateTag, Visualizer, apply_gate,
};
use quasar_ir::QubitId;

use super::common::{banner, print_summary, print_tier};

/// Build the Bell state H(0), CNOT(0 → 1) and render it.
pub fn execute(config: &EngineConfig) -> Result<()> {
    banner("Demo: 2-qubit entanglement circuit");

    let mut circuit = CircuitFactory::from_config(config).create(2)?;
    apply_gate(&mut circuit, GateTag::H, QubitId(0), None)?;
    apply_gate(&mut circuit, GateTag::CX, QubitId(1), Some(QubitId(0)))?;

    println!("  Bell state |Φ⁺⟩: H(0) → CNOT(0,1)");
    println!();
    println!("{circuit}");

    let artifact = Visualizer::new(config.render.clone()).render(Some(&circuit));
    print_tier(&artifact);
    print_summary(&CircuitSummary::of(&circuit));
    println!("{} Demo complete", style("✓").green().bold());
    Ok(())
}
