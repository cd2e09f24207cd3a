//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use revlay_order::OptimizerConfig;
use revlay_real::{Parsed, parse_file};

/// How a command prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable, styled.
    Text,
    /// Pretty-printed JSON on stdout.
    Json,
}

impl OutputFormat {
    /// Parse a `--format` value.
    pub fn parse(format: &str) -> Result<Self> {
        match format.to_lowercase().as_str() {
            "text" | "table" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown format: '{other}'. Available: text, json"),
        }
    }
}

/// Load and parse a circuit file.
pub fn load_circuit(path: &str) -> Result<Parsed> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let parsed = parse_file(path).with_context(|| format!("Failed to parse {path}"))?;
    debug!(
        "Loaded {path}: {} lines, {} gates, {} diagnostics",
        parsed.circuit.num_variables(),
        parsed.circuit.num_gates(),
        parsed.diagnostics.len()
    );
    Ok(parsed)
}

/// Load an optimizer config file, or the defaults when no path is given.
pub fn load_config(path: Option<&str>) -> Result<OptimizerConfig> {
    let Some(path) = path else {
        return Ok(OptimizerConfig::default());
    };

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read config: {path}"))?;
    let config: OptimizerConfig = serde_yaml_ng::from_str(&source)
        .with_context(|| format!("Invalid optimizer config: {path}"))?;
    debug!("Loaded optimizer config from {path}: {config:?}");
    Ok(config)
}

/// Split a comma-separated ordering, dropping blanks.
pub fn parse_order(order: &str) -> Vec<String> {
    order
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
