//! Gate slack within a gate sequence.

use crate::gate::{Gate, Mobility};

/// Compute the slack of every gate in `gates`.
///
/// A gate can slide past a neighbour only if the two share no line, so the
/// slack in each direction is the length of the run of disjoint neighbours.
pub(crate) fn compute(gates: &[Gate]) -> Vec<Mobility> {
    (0..gates.len())
        .map(|i| {
            let gate = &gates[i];
            let left = gates[..i]
                .iter()
                .rev()
                .take_while(|other| !gate.shares_line_with(other))
                .count();
            let right = gates[i + 1..]
                .iter()
                .take_while(|other| !gate.shares_line_with(other))
                .count();
            Mobility { left, right }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(controls: &[&str], target: &str) -> Gate {
        Gate::with_controls(controls.iter().copied(), target).unwrap()
    }

    #[test]
    fn test_disjoint_gates_slide_freely() {
        let gates = vec![gate(&[], "a"), gate(&[], "b"), gate(&[], "c")];
        let m = compute(&gates);
        assert_eq!(m[0], Mobility { left: 0, right: 2 });
        assert_eq!(m[1], Mobility { left: 1, right: 1 });
        assert_eq!(m[2], Mobility { left: 2, right: 0 });
    }

    #[test]
    fn test_shared_line_blocks() {
        let gates = vec![gate(&["a"], "b"), gate(&[], "c"), gate(&["c"], "a")];
        let m = compute(&gates);
        // gate 2 touches c (gate 1) immediately to its left
        assert_eq!(m[2], Mobility { left: 0, right: 0 });
        // gate 0 slides past gate 1 but not gate 2
        assert_eq!(m[0], Mobility { left: 0, right: 1 });
    }

    #[test]
    fn test_empty() {
        assert!(compute(&[]).is_empty());
    }
}
