//! Revlay Reversible Circuit Model
//!
//! This crate provides the data structures shared by the Revlay parser and
//! line-ordering optimizer: named signal lines, multi-control single-target
//! gates, per-line metadata and reusable sub-circuit templates.
//!
//! # Core Components
//!
//! - **Lines**: [`VariableRegistry`] keeps unique line names in first-seen order;
//!   that order is the circuit's initial layout
//! - **Gates**: [`Gate`] has an ordered control set and one target
//! - **Circuit**: [`Circuit`] owns the gate sequence, constant/garbage flags,
//!   I/O [`Bus`]es, [`Template`]s and their [`Instance`]s, and the active ordering
//!
//! # Example: Building a Toffoli Cascade
//!
//! ```rust
//! use revlay_ir::Circuit;
//!
//! let mut circuit = Circuit::new("cascade");
//! circuit.toffoli("a", "b", "c").unwrap();
//! circuit.cnot("c", "d").unwrap();
//!
//! assert_eq!(circuit.initial_order(), &["a", "b", "c", "d"]);
//! assert_eq!(circuit.num_gates(), 2);
//! ```
//!
//! # Example: Sub-circuit Instances
//!
//! Instances are recorded by reference and only expanded on demand.
//!
//! ```rust
//! use revlay_ir::Circuit;
//!
//! let mut adder = Circuit::new("adder");
//! adder.cnot("x", "y").unwrap();
//!
//! let mut top = Circuit::new("top");
//! top.add_template("adder", adder).unwrap();
//! top.instantiate("adder", vec!["p".into(), "q".into()]).unwrap();
//!
//! assert_eq!(top.num_gates(), 0);
//! let flat = top.flattened_gates().unwrap();
//! assert_eq!(flat[0].to_string(), "t2 p q");
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
mod mobility;
pub mod variable;

pub use circuit::{Bus, BusKind, Circuit, Instance, Template};
pub use error::{IrError, IrResult};
pub use gate::{Gate, Mobility};
pub use variable::{VariableId, VariableRegistry};
