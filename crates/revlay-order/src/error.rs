//! Error types for the ordering optimizer.

use thiserror::Error;

use revlay_ir::IrError;

/// Errors that can occur while searching for a line ordering.
///
/// None of these leave the circuit modified: the optimizer only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum OrderError {
    /// Exhaustive search was requested on too many lines.
    #[error("Exhaustive search over {variables} lines exceeds the limit of {limit}")]
    InfeasibleSize {
        /// Number of lines in the circuit.
        variables: usize,
        /// Largest line count exhaustive search accepts.
        limit: usize,
    },

    /// The deadline or evaluation cap was hit before the search finished.
    #[error("{strategy} search stopped after {evaluations} cost evaluations: budget exhausted")]
    BudgetExceeded {
        /// Strategy that was running.
        strategy: String,
        /// Evaluations performed before stopping.
        evaluations: u64,
    },

    /// A strategy name was not recognised.
    #[error("Unknown strategy '{0}'. Available: auto, exhaustive, greedy")]
    UnknownStrategy(String),

    /// The circuit could not be read.
    #[error(transparent)]
    Ir(#[from] IrError),
}

impl OrderError {
    /// Check whether a different strategy could still succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InfeasibleSize { .. } | Self::BudgetExceeded { .. })
    }
}

/// Result type for ordering operations.
pub type OrderResult<T> = Result<T, OrderError>;
