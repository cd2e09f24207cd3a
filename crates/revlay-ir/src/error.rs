//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while building or querying a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Variable is not registered in the circuit.
    #[error("Variable '{0}' is not registered in the circuit")]
    UnknownVariable(String),

    /// A gate names its target line as one of its controls.
    #[error("Gate target '{target}' is also listed as a control")]
    TargetIsControl {
        /// The offending line.
        target: String,
    },

    /// A variable appears more than once where a set is required.
    #[error("Variable '{0}' is listed more than once")]
    DuplicateVariable(String),

    /// An ordering is not a permutation of the registered variables.
    #[error("Invalid ordering: {0}")]
    InvalidOrdering(String),

    /// Sub-circuit template is not registered.
    #[error("Unknown sub-circuit template '{0}'")]
    UnknownTemplate(String),

    /// A template with this name is already registered.
    #[error("Sub-circuit template '{0}' is already defined")]
    DuplicateTemplate(String),

    /// Instance passes the wrong number of actual variables.
    #[error("Template '{template}' expects {expected} variables, got {got}")]
    ArityMismatch {
        /// Name of the template.
        template: String,
        /// Number of formal variables.
        expected: usize,
        /// Number of actual variables provided.
        got: usize,
    },

    /// Gate index is out of range.
    #[error("Gate index {index} out of range for circuit with {len} gates")]
    InvalidGateIndex {
        /// Requested index.
        index: usize,
        /// Number of gates in the circuit.
        len: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
