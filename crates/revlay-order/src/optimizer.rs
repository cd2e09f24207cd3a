//! Optimizer front end: strategy selection, budgets and fallback.

use std::time::Duration;

use serde::Serialize;
use tracing::{info, instrument, warn};

use revlay_ir::Circuit;

use crate::budget::SearchBudget;
use crate::config::{OptimizerConfig, Strategy};
use crate::cost::CostModel;
use crate::error::OrderResult;
use crate::strategy::{Candidate, ExhaustiveSearch, GreedySearch, SearchStrategy};

/// Compute a minimal-cost ordering with default settings.
///
/// Returns the line names top first. The circuit is not modified; install the
/// result with [`Circuit::set_ordering`].
pub fn optimize(circuit: &Circuit, strategy: Strategy) -> OrderResult<Vec<String>> {
    OptimizerBuilder::new()
        .with_strategy(strategy)
        .build()
        .optimize(circuit)
        .map(|found| found.variables)
}

/// An ordering found by the optimizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizedOrdering {
    /// Line names, top first.
    pub variables: Vec<String>,
    /// Cost of `variables`.
    pub cost: u64,
    /// Strategy that produced the ordering (never `Auto`).
    pub strategy: Strategy,
    /// Cost evaluations spent, including any abandoned attempt.
    pub evaluations: u64,
}

impl OptimizedOrdering {
    /// Install this ordering as the circuit's active ordering.
    pub fn install(&self, circuit: &mut Circuit) -> OrderResult<()> {
        circuit.set_ordering(self.variables.clone())?;
        Ok(())
    }
}

/// Runs the configured search on circuits.
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    /// Create an optimizer from a configuration.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Search for a minimal-cost ordering of `circuit`'s lines.
    ///
    /// With [`Strategy::Auto`], circuits up to the exhaustive limit are
    /// searched exhaustively and larger ones greedily. If the exhaustive run
    /// hits its budget and fallback is enabled, the greedy search runs with a
    /// fresh budget. Explicit strategies never fall back.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn optimize(&self, circuit: &Circuit) -> OrderResult<OptimizedOrdering> {
        let model = CostModel::new(circuit)?;
        let n = model.num_lines();
        let exhaustive =
            ExhaustiveSearch::new(self.config.exhaustive_limit).with_parallel(self.config.parallel);

        let chosen = match self.config.strategy {
            Strategy::Auto if exhaustive.accepts(&model) => Strategy::Exhaustive,
            Strategy::Auto => Strategy::Greedy,
            explicit => explicit,
        };
        info!(
            "Ordering {n} lines over {} gates with {chosen} search",
            model.num_gates()
        );

        let budget = self.budget();
        let outcome = match chosen {
            Strategy::Exhaustive => exhaustive.search(&model, &budget),
            _ => GreedySearch.search(&model, &budget),
        };

        let (candidate, strategy, evaluations) = match outcome {
            Ok(found) => (found, chosen, budget.evaluations()),
            Err(e)
                if e.is_recoverable()
                    && chosen == Strategy::Exhaustive
                    && self.config.strategy == Strategy::Auto
                    && self.config.fallback_to_greedy =>
            {
                warn!("{e}; falling back to greedy search");
                let retry = self.budget();
                let found = GreedySearch.search(&model, &retry)?;
                (
                    found,
                    Strategy::Greedy,
                    budget.evaluations() + retry.evaluations(),
                )
            }
            Err(e) => return Err(e),
        };

        let result = Self::resolve(circuit, candidate, strategy, evaluations);
        info!(
            "Found ordering with cost {} after {} evaluations",
            result.cost, result.evaluations
        );
        Ok(result)
    }

    fn budget(&self) -> SearchBudget {
        SearchBudget::new(self.config.timeout(), self.config.max_evaluations)
    }

    fn resolve(
        circuit: &Circuit,
        candidate: Candidate,
        strategy: Strategy,
        evaluations: u64,
    ) -> OptimizedOrdering {
        let lines = circuit.initial_order();
        OptimizedOrdering {
            variables: candidate.order.iter().map(|&i| lines[i].clone()).collect(),
            cost: candidate.cost,
            strategy,
            evaluations,
        }
    }
}

/// Builder for [`Optimizer`].
#[derive(Debug, Clone, Default)]
pub struct OptimizerBuilder {
    config: OptimizerConfig,
}

impl OptimizerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    #[must_use]
    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the search strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Set the largest line count searched exhaustively.
    #[must_use]
    pub fn with_exhaustive_limit(mut self, limit: usize) -> Self {
        self.config.exhaustive_limit = limit;
        self
    }

    /// Cap the number of cost evaluations per search.
    #[must_use]
    pub fn with_max_evaluations(mut self, max: u64) -> Self {
        self.config.max_evaluations = Some(max);
        self
    }

    /// Limit the wall-clock time per search.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Enable or disable the greedy fallback for `auto`.
    #[must_use]
    pub fn with_fallback_to_greedy(mut self, fallback: bool) -> Self {
        self.config.fallback_to_greedy = fallback;
        self
    }

    /// Split exhaustive search over threads.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Build the optimizer.
    pub fn build(self) -> Optimizer {
        Optimizer::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrderError;

    fn ladder(n: usize) -> Circuit {
        let mut c = Circuit::new("ladder");
        for i in 2..n {
            c.toffoli(&format!("x{}", i - 2), &format!("x{}", i - 1), &format!("x{i}"))
                .unwrap();
        }
        c
    }

    #[test]
    fn test_optimize_toffoli() {
        let mut c = Circuit::new("t");
        c.toffoli("c", "b", "a").unwrap();
        let order = optimize(&c, Strategy::Exhaustive).unwrap();
        assert_eq!(order, vec!["c", "b", "a"]);
        assert!(!c.has_custom_ordering());
    }

    #[test]
    fn test_auto_picks_exhaustive_for_small() {
        let found = Optimizer::default().optimize(&ladder(5)).unwrap();
        assert_eq!(found.strategy, Strategy::Exhaustive);
        assert_eq!(found.evaluations, 120);
    }

    #[test]
    fn test_auto_picks_greedy_above_limit() {
        let found = OptimizerBuilder::new()
            .with_exhaustive_limit(4)
            .build()
            .optimize(&ladder(6))
            .unwrap();
        assert_eq!(found.strategy, Strategy::Greedy);
        assert_eq!(found.variables.len(), 6);
    }

    #[test]
    fn test_explicit_exhaustive_is_infeasible() {
        let err = OptimizerBuilder::new()
            .with_strategy(Strategy::Exhaustive)
            .with_exhaustive_limit(4)
            .build()
            .optimize(&ladder(6))
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::InfeasibleSize {
                variables: 6,
                limit: 4
            }
        );
    }

    #[test]
    fn test_budget_fallback() {
        let found = OptimizerBuilder::new()
            .with_max_evaluations(200)
            .build()
            .optimize(&ladder(6))
            .unwrap();
        // 720 permutations do not fit; greedy needs 6 * 15 = 90.
        assert_eq!(found.strategy, Strategy::Greedy);
        assert_eq!(found.evaluations, 200 + 90);
    }

    #[test]
    fn test_budget_without_fallback() {
        let err = OptimizerBuilder::new()
            .with_max_evaluations(200)
            .with_fallback_to_greedy(false)
            .build()
            .optimize(&ladder(6))
            .unwrap_err();
        assert!(matches!(err, OrderError::BudgetExceeded { .. }));
    }

    #[test]
    fn test_empty_circuit() {
        let found = Optimizer::default().optimize(&Circuit::new("empty")).unwrap();
        assert!(found.variables.is_empty());
        assert_eq!(found.cost, 0);
    }

    #[test]
    fn test_install() {
        let mut c = Circuit::new("t");
        c.toffoli("c", "b", "a").unwrap();
        c.cnot("a", "d").unwrap();
        let found = Optimizer::default().optimize(&c).unwrap();
        found.install(&mut c).unwrap();
        assert_eq!(c.ordering(), found.variables.as_slice());
        assert_eq!(c.initial_order(), &["c", "b", "a", "d"]);
    }

    #[test]
    fn test_builder_with_config() {
        let config = OptimizerConfig {
            exhaustive_limit: 3,
            ..OptimizerConfig::default()
        };
        let optimizer = OptimizerBuilder::new()
            .with_config(config)
            .with_timeout(Duration::from_secs(2))
            .with_parallel(true)
            .build();
        assert_eq!(optimizer.config().exhaustive_limit, 3);
        assert_eq!(optimizer.config().timeout_ms, Some(2000));
        assert!(optimizer.config().parallel);
    }
}
