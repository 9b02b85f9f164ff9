//! Component models for logic circuits.
//!
//! This module provides the node type of the signal graph:
//! - [`ComponentKind`]: the closed set of kinds (source, buffer, not, and, or)
//!   together with a lookup table fixing arity and output functions
//! - [`Component`]: one live node, holding its input slots and, for sources,
//!   the settable state
//!
//! Components never reference each other directly. Input slots store a
//! [`Connection`] naming the upstream component by id; the owning
//! [`Circuit`](crate::circuit::Circuit) resolves those ids.

mod kind;
pub mod logic;

pub use kind::{ComponentKind, KindInfo, OutputFn};

use crate::circuit::{ComponentId, Connection};
use crate::error::{GateSimError, Result};

/// A circuit component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    id: ComponentId,
    kind: ComponentKind,
    /// One slot per input; `None` reads low
    inputs: Vec<Option<Connection>>,
    /// Only read by sources
    state: bool,
}

impl Component {
    /// Create a component with every input unwired.
    pub fn new(id: ComponentId, kind: ComponentKind) -> Self {
        Self {
            id,
            kind,
            inputs: vec![None; kind.num_inputs()],
            state: false,
        }
    }

    /// Create a source with the given initial state.
    pub fn source(id: ComponentId, state: bool) -> Self {
        Self {
            state,
            ..Self::new(id, ComponentKind::Source)
        }
    }

    /// Get the component ID.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.kind.num_outputs()
    }

    /// All input slots, in input-index order.
    pub fn inputs(&self) -> &[Option<Connection>] {
        &self.inputs
    }

    /// Connection feeding `input`, or `None` when unwired or out of range.
    pub fn input(&self, input: usize) -> Option<Connection> {
        self.inputs.get(input).copied().flatten()
    }

    /// True when every input slot holds a connection.
    pub fn is_fully_wired(&self) -> bool {
        self.inputs.iter().all(Option::is_some)
    }

    pub fn is_source(&self) -> bool {
        self.kind == ComponentKind::Source
    }

    /// Current source state, `None` for every other kind.
    pub fn state(&self) -> Option<bool> {
        self.is_source().then_some(self.state)
    }

    /// Overwrite an input slot, returning the previous connection.
    pub(crate) fn set_input(
        &mut self,
        input: usize,
        connection: Option<Connection>,
    ) -> Result<Option<Connection>> {
        let len = self.inputs.len();
        let slot = self
            .inputs
            .get_mut(input)
            .ok_or_else(|| GateSimError::invalid_input(self.id, input, len))?;
        Ok(std::mem::replace(slot, connection))
    }

    /// Set the source state.
    pub(crate) fn set_state(&mut self, state: bool) -> Result<()> {
        if !self.is_source() {
            return Err(GateSimError::NotASource {
                id: self.id,
                kind: self.kind,
            });
        }
        self.state = state;
        Ok(())
    }

    /// Apply output `output`'s function to already-resolved input values.
    ///
    /// Returns `None` for an out-of-range output index.
    pub fn compute(&self, output: usize, inputs: &[bool]) -> Option<bool> {
        self.kind.output_fn(output).map(|f| f(inputs, self.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_prepopulated() {
        for kind in ComponentKind::ALL {
            let c = Component::new(ComponentId(0), kind);
            assert_eq!(c.num_inputs(), kind.num_inputs());
            assert_eq!(c.num_outputs(), kind.num_outputs());
            assert!(c.inputs().iter().all(Option::is_none));
        }
    }

    #[test]
    fn test_set_input_replaces() {
        let mut c = Component::new(ComponentId(0), ComponentKind::And);
        let a = Connection::new(ComponentId(1), 0);
        let b = Connection::new(ComponentId(2), 0);

        assert_eq!(c.set_input(1, Some(a)).unwrap(), None);
        assert_eq!(c.set_input(1, Some(b)).unwrap(), Some(a));
        assert_eq!(c.input(1), Some(b));
        assert_eq!(c.num_inputs(), 2);
    }

    #[test]
    fn test_set_input_out_of_range() {
        let mut c = Component::new(ComponentId(4), ComponentKind::Not);
        let err = c.set_input(1, None).unwrap_err();
        assert_eq!(err, GateSimError::invalid_input(ComponentId(4), 1, 1));
        assert_eq!(c.num_inputs(), 1);
    }

    #[test]
    fn test_state_only_on_sources() {
        let mut s = Component::source(ComponentId(0), true);
        assert_eq!(s.state(), Some(true));
        s.set_state(false).unwrap();
        assert_eq!(s.compute(0, &[]), Some(false));

        let mut g = Component::new(ComponentId(1), ComponentKind::Or);
        assert_eq!(g.state(), None);
        assert!(matches!(
            g.set_state(true),
            Err(GateSimError::NotASource { .. })
        ));
    }

    #[test]
    fn test_compute_all_low() {
        let expected = [false, false, true, false, false];
        for (kind, want) in ComponentKind::ALL.into_iter().zip(expected) {
            let c = Component::new(ComponentId(0), kind);
            let inputs = vec![false; c.num_inputs()];
            assert_eq!(c.compute(0, &inputs), Some(want), "{kind}");
            assert_eq!(c.compute(1, &inputs), None);
        }
    }
}
