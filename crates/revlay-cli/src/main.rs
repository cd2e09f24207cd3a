//! Revlay Command-Line Interface
//!
//! The main entry point for the `revlay` tool.
//!
//! ```text
//!   a ──●──────●──
//!   b ──●──┬───┼──
//!   c ──⊕──●───⊕──
//!   d ─────⊕──────
//!
//!        R E V L A Y
//!   line ordering for reversible
//!        circuit layouts
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{cost, inspect, order, version};

/// Revlay - line ordering for reversible circuit layouts
#[derive(Parser)]
#[command(name = "revlay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a low-cost line ordering for a circuit
    Order {
        /// Input circuit file
        #[arg(short, long)]
        input: String,

        /// Search strategy (auto, exhaustive, greedy)
        #[arg(short, long)]
        strategy: Option<String>,

        /// Largest line count searched exhaustively
        #[arg(long)]
        exhaustive_limit: Option<usize>,

        /// Stop after this many cost evaluations
        #[arg(long)]
        max_evaluations: Option<u64>,

        /// Stop after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Optimizer config file (YAML)
        #[arg(short, long, env = "REVLAY_CONFIG")]
        config: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Compute the layout cost of an ordering
    Cost {
        /// Input circuit file
        #[arg(short, long)]
        input: String,

        /// Comma-separated ordering (defaults to the initial order)
        #[arg(short, long)]
        order: Option<String>,
    },

    /// Show what a circuit file contains
    Inspect {
        /// Input circuit file
        #[arg(short, long)]
        input: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Order {
            input,
            strategy,
            exhaustive_limit,
            max_evaluations,
            timeout_ms,
            config,
            format,
        } => {
            let overrides = order::Overrides {
                strategy,
                exhaustive_limit,
                max_evaluations,
                timeout_ms,
            };
            order::execute(&input, config.as_deref(), &overrides, &format)
        }

        Commands::Cost {
            input,
            order: ordering,
        } => cost::execute(&input, ordering.as_deref(), cli.verbose > 0),

        Commands::Inspect { input, format } => inspect::execute(&input, &format),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
