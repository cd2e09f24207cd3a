//! Layout cost of a gate sequence under a line ordering.
//!
//! The cost of a gate is the span its lines cover in the ordering plus a
//! penalty for every control placed below (after) the target:
//!
//! - `span = max - min` over the positions of the gate's lines when every
//!   line is placed, otherwise `(n - min) + missing`.
//! - A placed control at distance `d` after the target adds `2 * d`.
//! - Each control missing from the ordering adds `2 * offset`, where `offset`
//!   continues past the end of the ordering (`n - target`, or `1` when the
//!   target itself is missing) and grows by one per missing control.
//!
//! Orderings may be partial: the greedy search prices prefixes.

use rustc_hash::FxHashMap;

use revlay_ir::{Circuit, Gate, IrError};

use crate::error::OrderResult;

/// Cost of one gate under `ordering`.
pub fn gate_cost(gate: &Gate, ordering: &[String]) -> u64 {
    let positions = positions_of(ordering);
    gate_cost_at(gate, &positions, ordering.len())
}

/// Sum of [`gate_cost`] over the circuit's flattened gate sequence.
pub fn circuit_cost(circuit: &Circuit, ordering: &[String]) -> OrderResult<u64> {
    Ok(gate_costs(circuit, ordering)?.into_iter().sum())
}

/// Per-gate costs over the circuit's flattened gate sequence, in program order.
pub fn gate_costs(circuit: &Circuit, ordering: &[String]) -> OrderResult<Vec<u64>> {
    let positions = positions_of(ordering);
    let gates = circuit.flattened_gates()?;
    Ok(gates
        .iter()
        .map(|gate| gate_cost_at(gate, &positions, ordering.len()))
        .collect())
}

fn positions_of(ordering: &[String]) -> FxHashMap<&str, usize> {
    ordering
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect()
}

fn gate_cost_at(gate: &Gate, positions: &FxHashMap<&str, usize>, n: usize) -> u64 {
    price(
        gate.controls().iter().map(|c| positions.get(c.as_str()).copied()),
        positions.get(gate.target()).copied(),
        n,
    )
}

/// Price a gate from the positions of its controls and target.
///
/// `None` marks a line absent from the ordering of length `n`.
fn price<I>(controls: I, target: Option<usize>, n: usize) -> u64
where
    I: Iterator<Item = Option<usize>> + Clone,
{
    let mut min = usize::MAX;
    let mut max = 0;
    let mut missing = 0_u64;
    for position in controls.clone().chain(std::iter::once(target)) {
        match position {
            Some(p) => {
                min = min.min(p);
                max = max.max(p);
            }
            None => missing += 1,
        }
    }
    if min == usize::MAX {
        min = 0;
    }

    let span = if missing == 0 {
        (max - min) as u64
    } else {
        (n - min) as u64 + missing
    };

    let mut penalty = 0;
    let mut offset = target.map_or(1, |t| (n - t) as u64);
    for control in controls {
        match (control, target) {
            (Some(c), Some(t)) if c > t => penalty += 2 * (c - t) as u64,
            (Some(_), _) => {}
            (None, _) => {
                penalty += 2 * offset;
                offset += 1;
            }
        }
    }

    span + penalty
}

/// A gate with its lines replaced by registry indices.
#[derive(Debug, Clone)]
struct IndexedGate {
    controls: Vec<usize>,
    target: usize,
}

/// Index-based cost evaluator used by the search strategies.
///
/// Lines are numbered by their position in the circuit's initial order, and
/// instances are flattened once up front.
#[derive(Debug, Clone)]
pub struct CostModel {
    gates: Vec<IndexedGate>,
    num_lines: usize,
}

impl CostModel {
    /// Build a model from a circuit's flattened gate sequence.
    pub fn new(circuit: &Circuit) -> OrderResult<Self> {
        let registry = circuit.variables();
        let index = |name: &str| {
            registry
                .get(name)
                .map(|id| id.index())
                .ok_or_else(|| IrError::UnknownVariable(name.to_owned()))
        };

        let gates = circuit
            .flattened_gates()?
            .iter()
            .map(|gate| -> Result<IndexedGate, IrError> {
                Ok(IndexedGate {
                    controls: gate
                        .controls()
                        .iter()
                        .map(|c| index(c))
                        .collect::<Result<_, IrError>>()?,
                    target: index(gate.target())?,
                })
            })
            .collect::<Result<_, IrError>>()?;

        Ok(Self {
            gates,
            num_lines: registry.len(),
        })
    }

    /// Number of lines being ordered.
    pub fn num_lines(&self) -> usize {
        self.num_lines
    }

    /// Number of gates after flattening.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Cost of a (possibly partial) ordering of line indices.
    pub fn cost(&self, order: &[usize]) -> u64 {
        let mut scratch = Scratch::new(self.num_lines);
        self.cost_with(order, &mut scratch)
    }

    /// Same as [`CostModel::cost`], reusing `scratch` between calls.
    pub(crate) fn cost_with(&self, order: &[usize], scratch: &mut Scratch) -> u64 {
        scratch.load(order);
        let positions = &scratch.positions;
        let n = order.len();
        self.gates
            .iter()
            .map(|gate| {
                price(
                    gate.controls.iter().map(|&c| positions[c]),
                    positions[gate.target],
                    n,
                )
            })
            .sum()
    }
}

/// Reusable position table for [`CostModel::cost_with`].
#[derive(Debug, Clone)]
pub(crate) struct Scratch {
    positions: Vec<Option<usize>>,
    loaded: Vec<usize>,
}

impl Scratch {
    pub(crate) fn new(num_lines: usize) -> Self {
        Self {
            positions: vec![None; num_lines],
            loaded: Vec::with_capacity(num_lines),
        }
    }

    fn load(&mut self, order: &[usize]) {
        for &line in &self.loaded {
            self.positions[line] = None;
        }
        self.loaded.clear();
        for (position, &line) in order.iter().enumerate() {
            self.positions[line] = Some(position);
            self.loaded.push(line);
        }
    }
}
