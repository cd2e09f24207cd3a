//! Order command implementation.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use revlay_order::{OptimizedOrdering, OptimizerBuilder, OptimizerConfig, Strategy, circuit_cost};

use super::common::{OutputFormat, load_circuit, load_config};

/// Command-line values that override the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--strategy`
    pub strategy: Option<String>,
    /// `--exhaustive-limit`
    pub exhaustive_limit: Option<usize>,
    /// `--max-evaluations`
    pub max_evaluations: Option<u64>,
    /// `--timeout-ms`
    pub timeout_ms: Option<u64>,
}

impl Overrides {
    /// Apply the flags that were given on top of `config`.
    pub fn apply(&self, mut config: OptimizerConfig) -> Result<OptimizerConfig> {
        if let Some(strategy) = &self.strategy {
            config.strategy = strategy.parse::<Strategy>()?;
        }
        if let Some(limit) = self.exhaustive_limit {
            config.exhaustive_limit = limit;
        }
        if let Some(max) = self.max_evaluations {
            config.max_evaluations = Some(max);
        }
        if let Some(ms) = self.timeout_ms {
            config.timeout_ms = Some(ms);
        }
        Ok(config)
    }
}

#[derive(Serialize)]
struct OrderReport<'a> {
    circuit: &'a str,
    lines: usize,
    initial_order: &'a [String],
    initial_cost: u64,
    #[serde(flatten)]
    result: &'a OptimizedOrdering,
}

/// Execute the order command.
pub fn execute(
    input: &str,
    config_path: Option<&str>,
    overrides: &Overrides,
    format: &str,
) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let config = overrides.apply(load_config(config_path)?)?;

    let parsed = load_circuit(input)?;
    let circuit = &parsed.circuit;
    let initial_cost = circuit_cost(circuit, circuit.initial_order())
        .with_context(|| format!("Failed to price {input}"))?;

    if format == OutputFormat::Text {
        println!(
            "{} Ordering {} ({} lines, {} gates) with {} search",
            style("→").cyan().bold(),
            style(input).green(),
            circuit.num_variables(),
            circuit.num_gates(),
            style(config.strategy).yellow()
        );
    }

    let result = OptimizerBuilder::new()
        .with_config(config)
        .build()
        .optimize(circuit)?;

    match format {
        OutputFormat::Json => {
            let report = OrderReport {
                circuit: circuit.name(),
                lines: circuit.num_variables(),
                initial_order: circuit.initial_order(),
                initial_cost,
                result: &result,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!(
                "{} Found ordering with {} search",
                style("✓").green().bold(),
                result.strategy
            );
            println!("  Ordering:    {}", style(result.variables.join(" ")).green());
            println!("  Cost:        {}", style(result.cost).yellow().bold());
            println!("  Initial:     {} ({})", initial_cost, circuit.initial_order().join(" "));
            println!("  Evaluations: {}", result.evaluations);
        }
    }

    Ok(())
}
