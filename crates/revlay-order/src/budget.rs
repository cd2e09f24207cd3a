//! Limits on how long a search may run.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::error::{OrderError, OrderResult};

/// A wall-clock deadline and/or a cap on cost evaluations.
///
/// Both strategies charge the budget once per cost evaluation. The counter
/// is atomic so parallel branches can share one budget.
#[derive(Debug)]
pub struct SearchBudget {
    deadline: Option<Instant>,
    max_evaluations: Option<u64>,
    evaluations: AtomicU64,
}

impl SearchBudget {
    /// A budget that never runs out.
    pub fn unlimited() -> Self {
        Self {
            deadline: None,
            max_evaluations: None,
            evaluations: AtomicU64::new(0),
        }
    }

    /// A budget with an optional timeout (from now) and evaluation cap.
    pub fn new(timeout: Option<Duration>, max_evaluations: Option<u64>) -> Self {
        Self {
            deadline: timeout.map(|t| Instant::now() + t),
            max_evaluations,
            evaluations: AtomicU64::new(0),
        }
    }

    /// Set the deadline to `timeout` from now.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Cap the number of cost evaluations.
    #[must_use]
    pub fn with_max_evaluations(mut self, max: u64) -> Self {
        self.max_evaluations = Some(max);
        self
    }

    /// Record one cost evaluation by `strategy`.
    ///
    /// Fails once the cap would be exceeded or the deadline has passed; a
    /// refused evaluation is not counted.
    pub fn charge(&self, strategy: &str) -> OrderResult<()> {
        let done = self.evaluations.fetch_add(1, Ordering::Relaxed) + 1;
        let over_cap = self.max_evaluations.is_some_and(|max| done > max);
        let late = self.deadline.is_some_and(|d| Instant::now() >= d);
        if over_cap || late {
            self.evaluations.fetch_sub(1, Ordering::Relaxed);
            return Err(OrderError::BudgetExceeded {
                strategy: strategy.to_owned(),
                evaluations: done - 1,
            });
        }
        Ok(())
    }

    /// Evaluations charged so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }

    /// Check whether the budget has any limit at all.
    pub fn is_limited(&self) -> bool {
        self.deadline.is_some() || self.max_evaluations.is_some()
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::unlimited()
    }
}
