//! Shared helpers for CLI commands.

use console::style;
use quasar_engine::{Artifact, CircuitSummary};

/// Print a section banner.
pub fn banner(title: &str) {
    println!();
    println!("{} {}", style("→").cyan().bold(), style(title).bold());
    println!("{}", style("-".repeat(40)).dim());
}

/// Print the qubit, gate, and depth counts.
pub fn print_summary(summary: &CircuitSummary) {
    println!("  Qubits:        {}", style(summary.num_qubits).yellow());
    println!("  Total gates:   {}", style(summary.num_ops).yellow());
    println!("  Circuit depth: {}", style(summary.depth).yellow());
}

/// Print which tier produced `artifact`.
pub fn print_tier(artifact: &Artifact) {
    match artifact.tier() {
        Some(tier) => println!(
            "{} Rendered with tier {} ({} bytes)",
            style("✓").green().bold(),
            style(tier).cyan(),
            artifact.as_str().len()
        ),
        None => println!("{} {}", style("✗").red().bold(), artifact),
    }
}
