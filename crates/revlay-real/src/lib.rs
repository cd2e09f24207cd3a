//! Reader and Writer for the Reversible Circuit Text Format
//!
//! This crate reads the line-oriented `.real`-style description of a
//! reversible circuit into a [`revlay_ir::Circuit`] and writes circuits back
//! out in the same format.
//!
//! # Supported Lines
//!
//! | Line | Example |
//! |------|---------|
//! | Gate | `t3 a b c` (controls `a b`, target `c`) |
//! | Variables | `.variables a b c d` |
//! | Constant inputs | `.constants -1--` |
//! | Garbage outputs | `.garbage --1-` |
//! | Buses | `.inputbus busA a b`, `.outputbus busB c` |
//! | Modules | `.module sub` ... `.end` |
//! | Instances | `sub x y` |
//! | Comments | `# trailing comment` |
//!
//! Lines that match none of these are ignored. Use
//! [`parse_with_diagnostics`] to find out which.
//!
//! # Example: Parsing
//!
//! ```rust
//! use revlay_real::parse;
//!
//! let source = "\
//! .variables a b c
//! .garbage -1-
//! t3 a b c   # Toffoli
//! ";
//!
//! let circuit = parse(source).unwrap();
//! assert_eq!(circuit.initial_order(), &["a", "b", "c"]);
//! assert!(circuit.is_garbage("b"));
//! assert_eq!(circuit.num_gates(), 1);
//! ```
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use revlay_real::{emit, parse};
//!
//! let circuit = parse(".module sub\nt a b\n.end\nsub x y\n").unwrap();
//! let text = emit(&circuit).unwrap();
//! assert_eq!(parse(&text).unwrap(), circuit);
//! ```

mod emitter;
mod error;
mod lexer;
mod parser;

pub use emitter::emit;
pub use error::{Diagnostic, DiagnosticKind, ParseError, ParseResult, Severity};
pub use parser::{
    TOP_LEVEL_NAME, Parsed, parse, parse_file, parse_fragment, parse_with_diagnostics,
};
