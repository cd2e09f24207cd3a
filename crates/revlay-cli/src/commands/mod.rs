//! CLI command implementations.

pub mod common;
pub mod cost;
pub mod inspect;
pub mod order;
pub mod version;
