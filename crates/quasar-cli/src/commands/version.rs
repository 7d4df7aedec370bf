//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum circuit engine",
        style("QUASAR").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  quasar-ir      Circuit representation and text diagrams");
    println!("  quasar-engine  Factory, gate dispatch, and tiered rendering");
    println!("  quasar-cli     Command-line interface");
    println!();
    println!("Gates:      {}", quasar_engine::error::supported_gates());
    println!("License:    {}", style("Apache-2.0").dim());
}
