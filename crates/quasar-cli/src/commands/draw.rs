//! Draw command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use quasar_engine::{CircuitFactory, CircuitSummary, EngineConfig, GateCall, Tier, Visualizer};
use serde::Serialize;

/// Output formats for `draw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text diagram
    Text,
    /// HTML artifact from the fallback pipeline
    Html,
    /// JSON object with summary, tier, and artifact
    Json,
}

#[derive(Serialize)]
struct DrawReport<'a> {
    summary: CircuitSummary,
    tier: Option<Tier>,
    artifact: &'a str,
}

/// Execute the draw command.
pub fn execute(
    config: &EngineConfig,
    qubits: i64,
    gates: &[GateCall],
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let mut circuit = CircuitFactory::from_config(config).create(qubits)?;
    for call in gates {
        call.apply(&mut circuit)
            .with_context(|| format!("Gate spec '{call}' rejected"))?;
    }

    let summary = CircuitSummary::of(&circuit);
    let rendered = match format {
        OutputFormat::Text => circuit.to_string(),
        OutputFormat::Html => Visualizer::new(config.render.clone())
            .render(Some(&circuit))
            .into_string(),
        OutputFormat::Json => {
            let artifact = Visualizer::new(config.render.clone()).render(Some(&circuit));
            let report = DrawReport {
                summary,
                tier: artifact.tier(),
                artifact: artifact.as_str(),
            };
            serde_json::to_string_pretty(&report)?
        }
    };

    match output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} Wrote {} ({})",
                style("✓").green().bold(),
                style(path.display()).green(),
                summary
            );
        }
        None => println!("{}", rendered.trim_end()),
    }
    Ok(())
}
