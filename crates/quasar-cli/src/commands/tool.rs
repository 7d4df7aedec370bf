//! Tool command implementation.

use anyhow::{Context, Result};
use quasar_engine::{EngineConfig, ToolSession, tool_definitions};
use serde_json::Value;

/// Invoke `name` with JSON `args` on a fresh session and print the result.
pub fn execute(config: &EngineConfig, name: &str, args: &str) -> Result<()> {
    if name == "list" {
        println!("{}", serde_json::to_string_pretty(&tool_definitions())?);
        return Ok(());
    }

    let args: Value =
        serde_json::from_str(args).with_context(|| format!("Invalid JSON arguments: {args}"))?;
    anyhow::ensure!(args.is_object(), "Tool arguments must be a JSON object, got {args}");

    let mut session = ToolSession::new(config);
    println!("{}", session.invoke(name, &args));
    Ok(())
}
