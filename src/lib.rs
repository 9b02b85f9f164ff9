//! # Gatesim Core
//!
//! A lazily evaluated logic gate circuit engine.
//!
//! This library provides:
//! - A mutable, possibly cyclic graph of logic components (sources, buffers,
//!   NOT, AND, OR)
//! - A wiring protocol with last-writer-wins connects, idempotent disconnects
//!   and two-phase change notifications
//! - On-demand output evaluation that terminates on feedback loops
//! - A completeness check reporting whether a component's whole fan-in is wired
//!
//! ## Architecture
//!
//! - [`components`] - Component kinds, their behaviour table and the node type
//! - [`circuit`] - The [`Circuit`] registry, evaluation and validation
//! - [`error`] - The unified [`GateSimError`] type
//! - `report` - Truth tables and scenario reports (CLI only)
//!
//! ## Usage
//!
//! ```
//! use gatesim_core::{Circuit, ComponentKind};
//!
//! let mut circuit = Circuit::new();
//! let a = circuit.add_source(true);
//! let b = circuit.add_source(false);
//! let or = circuit.add_component(ComponentKind::Or);
//! circuit.connect(or, 0, (a, 0))?;
//! circuit.connect(or, 1, (b, 0))?;
//!
//! assert!(circuit.output_value(or, 0));
//! assert!(circuit.inputs_complete(or));
//! # Ok::<(), gatesim_core::GateSimError>(())
//! ```
//!
//! ## Evaluation Method
//!
//! Nothing is cached. A query walks upstream from the requested output,
//! resolving every input in index order:
//!
//! 1. An unwired input reads `false`
//! 2. A component already on the visited set reads `false` (cycle break)
//! 3. Otherwise the upstream output is evaluated recursively
//!
//! The output function is then applied to the collected input values.

pub mod circuit;
pub mod components;
pub mod error;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use circuit::{Circuit, ComponentId, Connection, EvalConfig, Netlist, VisitPolicy};
pub use components::{Component, ComponentKind};
pub use error::{GateSimError, Result};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuit;
