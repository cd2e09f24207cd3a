//! Exhaustive search over every permutation.

use tracing::debug;

use super::{Candidate, SearchStrategy, improves};
use crate::budget::SearchBudget;
use crate::cost::{CostModel, Scratch};
use crate::error::{OrderError, OrderResult};

/// Hard upper bound on lines: the remaining set is a 64-bit mask.
pub const MAX_EXHAUSTIVE_LINES: usize = 64;

const NAME: &str = "exhaustive";

/// Backtracking search over all `n!` orderings.
///
/// Lines are placed one at a time in registry order; every complete ordering
/// is priced and the first cheapest one is kept. Each recursive call gets its
/// own copy of the remaining-line mask, so sibling branches see the same
/// candidates.
#[derive(Debug, Clone)]
pub struct ExhaustiveSearch {
    limit: usize,
    parallel: bool,
}

impl ExhaustiveSearch {
    /// Create a search that refuses circuits with more than `limit` lines.
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.min(MAX_EXHAUSTIVE_LINES),
            parallel: false,
        }
    }

    /// Run top-level branches on the rayon pool.
    ///
    /// Only has an effect when built with the `parallel` feature. The result
    /// is identical to the sequential search.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Largest line count this search accepts.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl SearchStrategy for ExhaustiveSearch {
    fn name(&self) -> &'static str {
        NAME
    }

    fn accepts(&self, model: &CostModel) -> bool {
        model.num_lines() <= self.limit
    }

    fn search(&self, model: &CostModel, budget: &SearchBudget) -> OrderResult<Candidate> {
        let n = model.num_lines();
        if !self.accepts(model) {
            return Err(OrderError::InfeasibleSize {
                variables: n,
                limit: self.limit,
            });
        }
        if n == 0 {
            return Ok(Candidate::empty());
        }
        let all = u64::MAX >> (MAX_EXHAUSTIVE_LINES - n);

        if self.parallel {
            #[cfg(feature = "parallel")]
            return search_parallel(model, budget, all);
            #[cfg(not(feature = "parallel"))]
            debug!("Parallel search requested without the `parallel` feature, running sequentially");
        }

        let mut walk = Walk::new(model, budget);
        walk.descend(&mut Vec::with_capacity(n), all)?;
        debug!("Exhaustive search priced {} orderings", budget.evaluations());
        Ok(walk.best.unwrap_or_else(Candidate::empty))
    }
}

#[cfg(feature = "parallel")]
fn search_parallel(model: &CostModel, budget: &SearchBudget, all: u64) -> OrderResult<Candidate> {
    use rayon::prelude::*;

    use super::keep_best;

    let n = model.num_lines();
    debug!("Exhaustive search over {n} top-level branches in parallel");

    // collect() keeps branch order, so the reduction below breaks ties the
    // same way the sequential walk does.
    let branches = (0..n)
        .into_par_iter()
        .map(|first| {
            let mut walk = Walk::new(model, budget);
            let mut prefix = Vec::with_capacity(n);
            prefix.push(first);
            walk.descend(&mut prefix, all & !(1 << first))?;
            Ok(walk.best)
        })
        .collect::<OrderResult<Vec<_>>>()?;

    let mut best = None;
    for candidate in branches.into_iter().flatten() {
        keep_best(&mut best, candidate);
    }
    Ok(best.unwrap_or_else(Candidate::empty))
}

/// State of one backtracking walk.
struct Walk<'a> {
    model: &'a CostModel,
    budget: &'a SearchBudget,
    scratch: Scratch,
    best: Option<Candidate>,
}

impl<'a> Walk<'a> {
    fn new(model: &'a CostModel, budget: &'a SearchBudget) -> Self {
        Self {
            model,
            budget,
            scratch: Scratch::new(model.num_lines()),
            best: None,
        }
    }

    fn descend(&mut self, prefix: &mut Vec<usize>, remaining: u64) -> OrderResult<()> {
        if remaining == 0 {
            self.budget.charge(NAME)?;
            let cost = self.model.cost_with(prefix, &mut self.scratch);
            if improves(self.best.as_ref(), cost) {
                self.best = Some(Candidate {
                    order: prefix.clone(),
                    cost,
                });
            }
            return Ok(());
        }

        let mut choices = remaining;
        while choices != 0 {
            let line = choices.trailing_zeros() as usize;
            choices &= choices - 1;

            prefix.push(line);
            self.descend(prefix, remaining & !(1 << line))?;
            prefix.pop();
        }
        Ok(())
    }
}
