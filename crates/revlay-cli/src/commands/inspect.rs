//! Inspect command implementation.

use anyhow::Result;
use console::style;
use serde::Serialize;

use revlay_ir::{BusKind, Circuit};
use revlay_real::{Diagnostic, Severity};

use super::common::{OutputFormat, load_circuit};

#[derive(Serialize)]
struct InspectReport<'a> {
    circuit: &'a Circuit,
    flattened_gates: usize,
    diagnostics: &'a [Diagnostic],
}

/// Execute the inspect command.
pub fn execute(input: &str, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let parsed = load_circuit(input)?;
    let circuit = &parsed.circuit;
    let flattened = circuit.flattened_gates()?.len();

    if format == OutputFormat::Json {
        let report = InspectReport {
            circuit,
            flattened_gates: flattened,
            diagnostics: &parsed.diagnostics,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", style("Circuit").cyan().bold(), style(input).green());
    println!(
        "  {} lines, {} gates ({} after expanding instances)",
        circuit.num_variables(),
        circuit.num_gates(),
        flattened
    );

    println!();
    println!("{}", style("Lines").bold());
    for name in circuit.initial_order() {
        let mut flags = vec![];
        if let Some(value) = circuit.constant(name) {
            flags.push(format!("constant {value}"));
        }
        if circuit.is_garbage(name) {
            flags.push("garbage".to_owned());
        }
        for bus in circuit.buses_of(name) {
            let dir = match bus.kind {
                BusKind::Input => "in",
                BusKind::Output => "out",
            };
            flags.push(format!("{dir}:{}", bus.name));
        }
        if flags.is_empty() {
            println!("  {name}");
        } else {
            println!("  {name}  {}", style(flags.join(", ")).dim());
        }
    }

    print_templates(circuit, 0);

    if !circuit.instances().is_empty() {
        println!();
        println!("{}", style("Instances").bold());
        for instance in circuit.instances() {
            println!(
                "  {} {}  (after gate {})",
                instance.template,
                instance.actuals.join(" "),
                instance.anchor
            );
        }
    }

    if !parsed.diagnostics.is_empty() {
        println!();
        println!("{}", style("Diagnostics").bold());
        for diagnostic in &parsed.diagnostics {
            match diagnostic.severity {
                Severity::Warning => println!("  {}", style(diagnostic).yellow()),
                Severity::Note => println!("  {}", style(diagnostic).dim()),
            }
        }
    }

    Ok(())
}

fn print_templates(circuit: &Circuit, depth: usize) {
    if circuit.templates().is_empty() {
        return;
    }
    let indent = "  ".repeat(depth + 1);
    if depth == 0 {
        println!();
        println!("{}", style("Modules").bold());
    }
    for template in circuit.templates() {
        println!(
            "{indent}{} ({})  {} gates",
            style(&template.name).green(),
            template.circuit.initial_order().join(" "),
            template.circuit.num_gates()
        );
        print_templates(&template.circuit, depth + 1);
    }
}
