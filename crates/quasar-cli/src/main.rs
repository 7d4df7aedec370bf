//! QUASAR Command-Line Interface
//!
//! Smoke-test harness and front end for the QUASAR circuit engine.
//!
//! ```text
//!       ┌───┐
//! q_0: ─┤ H ├───■───
//!       └───┘   │
//!             ┌─┴─┐
//! q_1: ───────┤ X ├─
//!             └───┘
//!
//!            Q U A S A R
//!      Quantum circuit engine
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use quasar_engine::{EngineConfig, GateCall};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::draw::OutputFormat;
use commands::{demo, draw, selftest, tool, version};

/// QUASAR - build, dispatch, and render small quantum circuits
#[derive(Parser)]
#[command(name = "quasar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(long, global = true, env = "QUASAR_CONFIG")]
    config: Option<PathBuf>,

    /// Runs `demo` then `self-test` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and render a Bell-state circuit
    Demo,

    /// Exercise the factory, dispatcher, visualizer, and tool session
    SelfTest,

    /// Build a circuit from gate specs and render it
    Draw {
        /// Number of qubits
        #[arg(short, long)]
        qubits: i64,

        /// Gate spec tag:target[:control], repeatable (e.g. -g h:0 -g cx:1:0)
        #[arg(short, long = "gate")]
        gates: Vec<GateCall>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },

    /// Invoke one agent tool against a fresh session
    Tool {
        /// Tool name, or `list` to print the tool definitions
        name: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = run(cli);

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = EngineConfig::load(cli.config.as_deref())?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        None => {
            demo::execute(&config)?;
            selftest::execute(&config)
        }
        Some(Commands::Demo) => demo::execute(&config),
        Some(Commands::SelfTest) => selftest::execute(&config),
        Some(Commands::Draw {
            qubits,
            gates,
            output,
            format,
        }) => draw::execute(&config, qubits, &gates, output.as_deref(), format),
        Some(Commands::Tool { name, args }) => tool::execute(&config, &name, &args),
        Some(Commands::Version) => {
            version::execute();
            Ok(())
        }
    }
}
