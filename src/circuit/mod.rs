//! Circuit graph representation, evaluation and validation.
//!
//! This module provides the [`Circuit`] registry, which owns every component,
//! applies wiring changes and raises change notifications, and the
//! [`Netlist`] view through which outputs are evaluated.

mod eval;
mod events;
mod graph;
mod netlist;
mod types;
mod validate;

pub use eval::EvalConfig;
pub use graph::Circuit;
pub use netlist::Netlist;
pub use types::*;
pub use validate::{unwired_inputs, validate_circuit};
