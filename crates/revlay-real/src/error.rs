//! Error and diagnostic types for the circuit text format.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use revlay_ir::IrError;

/// Fatal errors that abort a parse.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Input could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A required token is missing on a gate or directive line.
    #[error("Missing {expected} at line {line}")]
    MissingToken {
        /// Line of the offending directive.
        line: usize,
        /// What was expected.
        expected: String,
    },

    /// A `.module` body ran to the end of input.
    #[error("Module '{name}' opened at line {line} has no matching .end")]
    UnterminatedModule {
        /// Module name.
        name: String,
        /// Line of the `.module` directive.
        line: usize,
    },

    /// The circuit model rejected a line.
    #[error("Invalid circuit at line {line}: {source}")]
    Circuit {
        /// Line that was being applied.
        line: usize,
        /// Underlying model error.
        #[source]
        source: IrError,
    },

    /// The circuit cannot be written in the text format.
    #[error("Cannot emit circuit: {0}")]
    Unrepresentable(String),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Part of a directive was skipped.
    Warning,
    /// A line was ignored.
    Note,
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A single `.constants` / `.garbage` entry was skipped.
    FieldParse,
    /// A line that is neither a gate, a directive nor a known instance.
    UnknownLine,
    /// A `.`-prefixed line naming no supported directive.
    UnknownDirective,
    /// An instance line whose actual lines do not fit its template.
    InvalidInstance,
}

/// A non-fatal problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Category.
    pub kind: DiagnosticKind,
    /// 1-based source line.
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn field(line: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind: DiagnosticKind::FieldParse,
            line,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_instance(line: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind: DiagnosticKind::InvalidInstance,
            line,
            message: message.into(),
        }
    }

    pub(crate) fn ignored(line: usize, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Note,
            kind,
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Note => "note",
        };
        write!(f, "{level}: line {}: {}", self.line, self.message)
    }
}
