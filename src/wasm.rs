//! WASM bindings for Gatesim Core.
//!
//! This module provides JavaScript-friendly bindings for a browser view
//! layer that draws components and wires and re-reads values after each
//! change.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuit } from 'gatesim_core';
//!
//! await init();
//!
//! const circuit = new WasmCircuit(false);
//! const a = circuit.add_component("source");
//! const not = circuit.add_component("not");
//! circuit.connect(not, 0, a, 0);
//!
//! circuit.toggle_source(a);
//! console.log(circuit.output_value(not, 0)); // false
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{Circuit, ComponentId, EvalConfig, VisitPolicy};
use crate::components::ComponentKind;
use crate::error::GateSimError;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: GateSimError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible logic circuit.
///
/// Component ids are exposed as plain `u32` values.
#[wasm_bindgen]
pub struct WasmCircuit {
    circuit: Circuit,
}

#[wasm_bindgen]
impl WasmCircuit {
    /// Create an empty circuit.
    ///
    /// # Arguments
    /// * `per_path` - Isolate the evaluation visited set per path
    #[wasm_bindgen(constructor)]
    pub fn new(per_path: bool) -> WasmCircuit {
        let policy = if per_path {
            VisitPolicy::PerPath
        } else {
            VisitPolicy::Shared
        };
        WasmCircuit {
            circuit: Circuit::with_config(EvalConfig::new().with_visit_policy(policy)),
        }
    }

    /// Add a component by kind name ("source", "buffer", "not", "and", "or").
    #[wasm_bindgen]
    pub fn add_component(&mut self, kind: &str) -> Result<u32, JsValue> {
        let kind: ComponentKind = kind.parse().map_err(to_js)?;
        let id = self.circuit.add_component(kind);
        u32::try_from(id.0).map_err(|_| {
            to_js(GateSimError::invalid_argument(format!(
                "component id {id} does not fit in u32"
            )))
        })
    }

    /// Feed `input` of `component` from output `output` of `source`.
    #[wasm_bindgen]
    pub fn connect(
        &mut self,
        component: u32,
        input: usize,
        source: u32,
        output: usize,
    ) -> Result<(), JsValue> {
        self.circuit
            .connect(
                ComponentId(component as usize),
                input,
                (ComponentId(source as usize), output),
            )
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn disconnect(&mut self, component: u32, input: usize) -> Result<(), JsValue> {
        self.circuit
            .disconnect(ComponentId(component as usize), input)
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn set_source_state(&mut self, component: u32, state: bool) -> Result<(), JsValue> {
        self.circuit
            .set_source_state(ComponentId(component as usize), state)
            .map_err(to_js)
    }

    /// Flip a source, returning its new state.
    #[wasm_bindgen]
    pub fn toggle_source(&mut self, component: u32) -> Result<bool, JsValue> {
        self.circuit
            .toggle_source(ComponentId(component as usize))
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn output_value(&self, component: u32, output: usize) -> bool {
        self.circuit
            .output_value(ComponentId(component as usize), output)
    }

    #[wasm_bindgen]
    pub fn inputs_complete(&self, component: u32) -> bool {
        self.circuit.inputs_complete(ComponentId(component as usize))
    }

    /// Display hint for a component ("IN", "BUF", "NOT", "AND", "OR").
    #[wasm_bindgen]
    pub fn symbol(&self, component: u32) -> Option<String> {
        self.circuit
            .component(ComponentId(component as usize))
            .map(|c| c.kind().symbol().to_string())
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
