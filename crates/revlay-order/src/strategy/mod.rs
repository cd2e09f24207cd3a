//! Search strategies over line permutations.

mod exhaustive;
mod greedy;

pub use exhaustive::{ExhaustiveSearch, MAX_EXHAUSTIVE_LINES};
pub use greedy::GreedySearch;

use crate::budget::SearchBudget;
use crate::cost::CostModel;
use crate::error::OrderResult;

/// A complete ordering of line indices and its cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Line indices (positions in the circuit's initial order), top first.
    pub order: Vec<usize>,
    /// Cost of `order` under the model it was found with.
    pub cost: u64,
}

impl Candidate {
    /// The ordering of a circuit with no lines.
    pub fn empty() -> Self {
        Self {
            order: vec![],
            cost: 0,
        }
    }
}

/// A strategy that searches for a low-cost ordering.
///
/// Strategies only read the cost model; installing the result on a circuit
/// is left to the caller.
pub trait SearchStrategy: Send + Sync {
    /// Get the name of this strategy.
    fn name(&self) -> &str;

    /// Search for an ordering of every line in `model`.
    ///
    /// Implementations charge `budget` once per cost evaluation and stop
    /// with [`crate::OrderError::BudgetExceeded`] when it runs out.
    fn search(&self, model: &CostModel, budget: &SearchBudget) -> OrderResult<Candidate>;

    /// Check if this strategy can handle a model of this size.
    fn accepts(&self, _model: &CostModel) -> bool {
        true
    }
}

/// Whether `cost` beats `best`. Only a strictly lower cost does, so the first
/// candidate found wins ties.
fn improves(best: Option<&Candidate>, cost: u64) -> bool {
    best.is_none_or(|b| cost < b.cost)
}

/// Replace `best` if `candidate` improves on it.
fn keep_best(best: &mut Option<Candidate>, candidate: Candidate) {
    if improves(best.as_ref(), candidate.cost) {
        *best = Some(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;

    impl SearchStrategy for Identity {
        fn name(&self) -> &'static str {
            "identity"
        }

        fn search(&self, model: &CostModel, budget: &SearchBudget) -> OrderResult<Candidate> {
            budget.charge(self.name())?;
            let order: Vec<usize> = (0..model.num_lines()).collect();
            let cost = model.cost(&order);
            Ok(Candidate { order, cost })
        }
    }

    #[test]
    fn test_custom_strategy() {
        let mut circuit = revlay_ir::Circuit::new("c");
        circuit.toffoli("a", "b", "c").unwrap();
        let model = CostModel::new(&circuit).unwrap();

        let strategy = Identity;
        assert!(strategy.accepts(&model));
        let found = strategy.search(&model, &SearchBudget::unlimited()).unwrap();
        assert_eq!(found.order, vec![0, 1, 2]);
        assert_eq!(found.cost, 2);
    }

    #[test]
    fn test_keep_best_prefers_first_on_tie() {
        let mut best = None;
        keep_best(&mut best, Candidate { order: vec![0, 1], cost: 3 });
        keep_best(&mut best, Candidate { order: vec![1, 0], cost: 3 });
        assert_eq!(best.as_ref().unwrap().order, vec![0, 1]);

        keep_best(&mut best, Candidate { order: vec![1, 0], cost: 2 });
        assert_eq!(best.unwrap().order, vec![1, 0]);
    }

    #[test]
    fn test_improves() {
        let best = Candidate { order: vec![0], cost: 5 };
        assert!(improves(None, u64::MAX));
        assert!(improves(Some(&best), 4));
        assert!(!improves(Some(&best), 5));
        assert!(!improves(Some(&best), 6));
    }
}
