//! Circuit validation.

use crate::error::{GateSimError, Result};

use super::{ComponentId, Netlist};

/// Validate the wiring of a circuit.
///
/// Checks:
/// - Every connection names a registered component
/// - Every connection reads an output the upstream component actually has
///
/// Neither condition stops evaluation (both read low), so this is a
/// diagnostic for frontends rather than a precondition.
pub fn validate_circuit(netlist: &Netlist) -> Result<()> {
    for component in netlist.components() {
        for upstream in component.inputs().iter().flatten() {
            let source = netlist.get(upstream.component)?;
            if upstream.output >= source.num_outputs() {
                return Err(GateSimError::invalid_output(
                    upstream.component,
                    upstream.output,
                    source.num_outputs(),
                ));
            }
        }
    }
    Ok(())
}

/// List every `(component, input)` pair that has no connection, in id order.
pub fn unwired_inputs(netlist: &Netlist) -> Vec<(ComponentId, usize)> {
    netlist
        .components()
        .flat_map(|c| {
            c.inputs()
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.is_none())
                .map(move |(input, _)| (c.id(), input))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Circuit;
    use crate::components::ComponentKind;

    #[test]
    fn test_valid_circuit() {
        let mut circuit = Circuit::new();
        let src = circuit.add_source(true);
        let not = circuit.add_component(ComponentKind::Not);
        circuit.connect(not, 0, (src, 0)).unwrap();
        assert!(validate_circuit(circuit.netlist()).is_ok());
    }

    #[test]
    fn test_missing_output_reported() {
        let mut circuit = Circuit::new();
        let src = circuit.add_source(true);
        let not = circuit.add_component(ComponentKind::Not);
        circuit.connect(not, 0, (src, 2)).unwrap();
        assert_eq!(
            validate_circuit(circuit.netlist()),
            Err(GateSimError::invalid_output(src, 2, 1))
        );
    }

    #[test]
    fn test_unwired_inputs() {
        let mut circuit = Circuit::new();
        let src = circuit.add_source(false);
        let and = circuit.add_component(ComponentKind::And);
        let not = circuit.add_component(ComponentKind::Not);
        circuit.connect(and, 1, (src, 0)).unwrap();
        assert_eq!(
            unwired_inputs(circuit.netlist()),
            vec![(and, 0), (not, 0)]
        );
    }
}
