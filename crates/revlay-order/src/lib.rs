//! Revlay Line-Ordering Optimizer
//!
//! This crate searches the permutations of a reversible circuit's lines for
//! the vertical layout with the lowest gate-distance cost. The result is a
//! plain list of line names; installing it on the circuit is up to the caller.
//!
//! # Overview
//!
//! ```text
//! Circuit ──► CostModel (flattened, index-based)
//!                 │
//!                 ├── ExhaustiveSearch   n! orderings, optimal
//!                 └── GreedySearch       n starts × O(n²) steps, heuristic
//!                 │
//!                 ▼
//!         OptimizedOrdering { variables, cost, strategy, evaluations }
//! ```
//!
//! # Cost Function
//!
//! See [`cost`] for the exact definition. In short, a gate pays for the
//! distance its lines span plus twice the distance of each control placed
//! below its target.
//!
//! # Example: Ordering a Circuit
//!
//! ```rust
//! use revlay_ir::Circuit;
//! use revlay_order::{OptimizerBuilder, Strategy, circuit_cost};
//!
//! let mut circuit = Circuit::new("example");
//! circuit.toffoli("c", "b", "a").unwrap();
//! circuit.cnot("a", "d").unwrap();
//!
//! let optimizer = OptimizerBuilder::new()
//!     .with_strategy(Strategy::Auto)
//!     .build();
//! let found = optimizer.optimize(&circuit).unwrap();
//!
//! let initial = circuit_cost(&circuit, circuit.initial_order()).unwrap();
//! assert!(found.cost <= initial);
//!
//! found.install(&mut circuit).unwrap();
//! assert_eq!(circuit.ordering(), found.variables.as_slice());
//! ```
//!
//! # Strategies
//!
//! | Strategy | When | Result |
//! |----------|------|--------|
//! | `exhaustive` | up to `exhaustive_limit` lines (default 10) | optimal |
//! | `greedy` | any size | heuristic, never better than exhaustive |
//! | `auto` | default | exhaustive if small enough, else greedy |
//!
//! Both searches accept a [`SearchBudget`] (deadline and evaluation cap).
//! With the `parallel` feature the exhaustive search can split its top-level
//! branches over the rayon thread pool.
//!
//! # Custom Strategies
//!
//! Implement [`SearchStrategy`] to plug in another search:
//!
//! ```rust
//! use revlay_order::{Candidate, CostModel, OrderResult, SearchBudget, SearchStrategy};
//!
//! struct Identity;
//!
//! impl SearchStrategy for Identity {
//!     fn name(&self) -> &str { "identity" }
//!
//!     fn search(&self, model: &CostModel, budget: &SearchBudget) -> OrderResult<Candidate> {
//!         budget.charge(self.name())?;
//!         let order: Vec<usize> = (0..model.num_lines()).collect();
//!         let cost = model.cost(&order);
//!         Ok(Candidate { order, cost })
//!     }
//! }
//! ```

pub mod budget;
pub mod config;
pub mod cost;
pub mod error;
pub mod optimizer;
pub mod strategy;

pub use budget::SearchBudget;
pub use config::{DEFAULT_EXHAUSTIVE_LIMIT, OptimizerConfig, Strategy};
pub use cost::{CostModel, circuit_cost, gate_cost, gate_costs};
pub use error::{OrderError, OrderResult};
pub use optimizer::{OptimizedOrdering, Optimizer, OptimizerBuilder, optimize};
pub use strategy::{
    Candidate, ExhaustiveSearch, GreedySearch, MAX_EXHAUSTIVE_LINES, SearchStrategy,
};
