//! Text reports for the CLI frontend.
//!
//! Each report builds a small circuit, drives it, and writes one line per
//! observation to the given writer.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use crate::circuit::{unwired_inputs, validate_circuit, Circuit, ComponentId, EvalConfig};
use crate::components::ComponentKind;
use crate::error::{GateSimError, Result};

/// One row of a truth table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthRow {
    pub inputs: Vec<bool>,
    pub outputs: Vec<bool>,
}

/// Compute the truth table of `kind` by driving every input from a source.
///
/// Rows enumerate input combinations with input 0 as the least significant
/// bit. A source has no inputs; its table has one row per state.
pub fn truth_table(kind: ComponentKind) -> Result<Vec<TruthRow>> {
    let mut circuit = Circuit::new();
    let gate = circuit.add_component(kind);

    if kind == ComponentKind::Source {
        let mut rows = Vec::with_capacity(2);
        for state in [false, true] {
            circuit.set_source_state(gate, state)?;
            rows.push(TruthRow {
                inputs: vec![state],
                outputs: outputs_of(&circuit, gate, kind),
            });
        }
        return Ok(rows);
    }

    let sources: Vec<ComponentId> = (0..kind.num_inputs())
        .map(|_| circuit.add_source(false))
        .collect();
    for (input, &source) in sources.iter().enumerate() {
        circuit.connect(gate, input, (source, 0))?;
    }

    let mut rows = Vec::with_capacity(1 << sources.len());
    for bits in 0..(1usize << sources.len()) {
        let inputs: Vec<bool> = (0..sources.len()).map(|i| (bits >> i) & 1 == 1).collect();
        for (&source, &state) in sources.iter().zip(&inputs) {
            circuit.set_source_state(source, state)?;
        }
        rows.push(TruthRow {
            inputs,
            outputs: outputs_of(&circuit, gate, kind),
        });
    }
    Ok(rows)
}

fn outputs_of(circuit: &Circuit, id: ComponentId, kind: ComponentKind) -> Vec<bool> {
    (0..kind.num_outputs())
        .map(|output| circuit.output_value(id, output))
        .collect()
}

fn bit(value: bool) -> char {
    if value {
        '1'
    } else {
        '0'
    }
}

fn io_error(e: std::io::Error) -> GateSimError {
    GateSimError::ReportOutputError {
        message: e.to_string(),
    }
}

/// Write the truth table of `kind`.
pub fn write_truth_table(kind: ComponentKind, out: &mut impl Write) -> Result<()> {
    let label = if kind == ComponentKind::Source {
        "state"
    } else {
        "inputs"
    };
    writeln!(out, "{} ({label} -> outputs)", kind.symbol()).map_err(io_error)?;
    for row in truth_table(kind)? {
        let inputs: String = row.inputs.iter().copied().map(bit).collect();
        let outputs: String = row.outputs.iter().copied().map(bit).collect();
        writeln!(out, "{inputs} -> {outputs}").map_err(io_error)?;
    }
    Ok(())
}

/// Build a small scenario (an AND of two sources, ORed with a third
/// source through a buffer), toggle the sources and report every
/// evaluation and circuit-wide state change.
pub fn run_demo(config: EvalConfig, out: &mut impl Write) -> Result<()> {
    let mut circuit = Circuit::with_config(config);
    let events = Rc::new(RefCell::new(Vec::new()));

    let g1 = circuit.add_source(false);
    let g2 = circuit.add_source(false);
    let g3 = circuit.add_source(false);
    let and = circuit.add_component(ComponentKind::And);
    let single = circuit.add_component(ComponentKind::Buffer);
    let or = circuit.add_component(ComponentKind::Or);

    let sink = Rc::clone(&events);
    circuit.on_state_changed(move |netlist| {
        sink.borrow_mut()
            .push(format!("state changed: or = {}", bit(netlist.output_value(or, 0))));
    });

    circuit.connect(and, 0, (g1, 0))?;
    circuit.connect(and, 1, (g2, 0))?;
    circuit.connect(or, 0, (and, 0))?;
    writeln!(
        out,
        "or complete: {} (unwired: {:?})",
        circuit.inputs_complete(or),
        unwired_inputs(circuit.netlist())
    )
    .map_err(io_error)?;

    circuit.connect(single, 0, (g3, 0))?;
    circuit.connect(or, 1, (single, 0))?;
    validate_circuit(circuit.netlist())?;
    writeln!(out, "or complete: {}", circuit.inputs_complete(or)).map_err(io_error)?;

    for source in [g1, g2, g1, g3] {
        let state = circuit.toggle_source(source)?;
        writeln!(
            out,
            "toggle {source} -> {} | and = {} | or = {}",
            bit(state),
            bit(circuit.output_value(and, 0)),
            bit(circuit.output_value(or, 0))
        )
        .map_err(io_error)?;
    }

    for line in events.borrow().iter() {
        writeln!(out, "{line}").map_err(io_error)?;
    }
    Ok(())
}

/// Build a ring of one NOT followed by `length - 1` buffers feeding back
/// into the NOT, and report each node's value and completeness.
pub fn run_ring(length: usize, config: EvalConfig, out: &mut impl Write) -> Result<()> {
    if length == 0 {
        return Err(GateSimError::invalid_argument("ring length must be at least 1"));
    }

    let mut circuit = Circuit::with_config(config);
    let mut ring = vec![circuit.add_component(ComponentKind::Not)];
    for _ in 1..length {
        ring.push(circuit.add_component(ComponentKind::Buffer));
    }
    for (i, &node) in ring.iter().enumerate() {
        let upstream = ring[(i + length - 1) % length];
        circuit.connect(node, 0, (upstream, 0))?;
    }

    writeln!(out, "ring of {length} ({:?} visits)", config.visit_policy).map_err(io_error)?;
    for &node in &ring {
        let component = circuit.netlist().get(node)?;
        writeln!(
            out,
            "{node} {:<3} value = {} complete = {}",
            component.kind().symbol(),
            bit(circuit.output_value(node, 0)),
            circuit.inputs_complete(node)
        )
        .map_err(io_error)?;
    }
    Ok(())
}
