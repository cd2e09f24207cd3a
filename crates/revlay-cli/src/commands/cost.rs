//! Cost command implementation.

use anyhow::Result;
use console::style;

use revlay_order::gate_costs;

use super::common::{load_circuit, parse_order};

/// Execute the cost command.
///
/// With `breakdown`, every flattened gate is listed with its own cost.
pub fn execute(input: &str, order: Option<&str>, breakdown: bool) -> Result<()> {
    let parsed = load_circuit(input)?;
    let circuit = &parsed.circuit;

    let ordering = match order {
        Some(order) => {
            let ordering = parse_order(order);
            let registry = circuit.variables();
            if let Some(unknown) = ordering.iter().find(|name| !registry.contains(name)) {
                anyhow::bail!("Unknown line '{unknown}' in ordering");
            }
            if ordering.len() < circuit.num_variables() {
                println!(
                    "{} Partial ordering: {} of {} lines placed",
                    style("!").yellow().bold(),
                    ordering.len(),
                    circuit.num_variables()
                );
            }
            ordering
        }
        None => circuit.initial_order().to_vec(),
    };

    let costs = gate_costs(circuit, &ordering)?;
    let total: u64 = costs.iter().sum();

    println!(
        "{} {} under {}",
        style("Cost").cyan().bold(),
        style(total).yellow().bold(),
        style(ordering.join(" ")).green()
    );

    if breakdown {
        let gates = circuit.flattened_gates()?;
        println!();
        println!("  {:>5}  {:>6}  Gate", "#", "Cost");
        for (i, (gate, cost)) in gates.iter().zip(&costs).enumerate() {
            println!("  {i:>5}  {cost:>6}  {gate}");
        }
    }

    Ok(())
}
