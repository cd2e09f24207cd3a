//! Nearest-neighbour style greedy search.

use tracing::trace;

use super::{Candidate, SearchStrategy, keep_best};
use crate::budget::SearchBudget;
use crate::cost::{CostModel, Scratch};
use crate::error::OrderResult;

const NAME: &str = "greedy";

/// Greedy construction from every possible first line.
///
/// From each start line the ordering grows one line at a time, appending the
/// unplaced line that gives the cheapest prefix (first found on ties). The
/// cheapest of the `n` complete orderings is returned.
///
/// This is a heuristic: it runs in `O(n^3 * g)` cost work but is not
/// guaranteed to find the optimum that [`super::ExhaustiveSearch`] finds.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySearch;

impl GreedySearch {
    /// Create a greedy search.
    pub fn new() -> Self {
        Self
    }

    /// Grow one ordering starting from `start`.
    fn grow(
        model: &CostModel,
        budget: &SearchBudget,
        scratch: &mut Scratch,
        start: usize,
    ) -> OrderResult<Candidate> {
        let n = model.num_lines();
        let mut order = Vec::with_capacity(n);
        let mut placed = vec![false; n];
        order.push(start);
        placed[start] = true;

        let mut cost = None;
        while order.len() < n {
            let mut step: Option<(usize, u64)> = None;
            for line in (0..n).filter(|&l| !placed[l]) {
                budget.charge(NAME)?;
                order.push(line);
                let c = model.cost_with(&order, scratch);
                order.pop();
                if step.is_none_or(|(_, best)| c < best) {
                    step = Some((line, c));
                }
            }
            let Some((line, c)) = step else { break };
            order.push(line);
            placed[line] = true;
            cost = Some(c);
        }

        let cost = match cost {
            Some(c) => c,
            None => {
                budget.charge(NAME)?;
                model.cost_with(&order, scratch)
            }
        };
        Ok(Candidate { order, cost })
    }
}

impl SearchStrategy for GreedySearch {
    fn name(&self) -> &'static str {
        NAME
    }

    fn search(&self, model: &CostModel, budget: &SearchBudget) -> OrderResult<Candidate> {
        let n = model.num_lines();
        if n == 0 {
            return Ok(Candidate::empty());
        }

        let mut scratch = Scratch::new(n);
        let mut best = None;
        for start in 0..n {
            let candidate = Self::grow(model, budget, &mut scratch, start)?;
            trace!("Greedy start {start}: cost {}", candidate.cost);
            keep_best(&mut best, candidate);
        }
        Ok(best.unwrap_or_else(Candidate::empty))
    }
}
