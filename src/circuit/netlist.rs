//! Component arena.

use super::eval::EvalConfig;
use super::types::ComponentId;
use crate::components::Component;
use crate::error::{GateSimError, Result};

/// The set of live components of one circuit, indexed by [`ComponentId`].
///
/// This is the read-only view handed to notification handlers: it exposes
/// every query (`output_value`, `inputs_complete`, lookups) but no wiring
/// mutation, so a handler cannot rewire the circuit while it is being
/// notified.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    /// Arena slot `i` holds the component with id `i`
    components: Vec<Component>,
    pub(crate) config: EvalConfig,
}

impl Netlist {
    pub(crate) fn with_config(config: EvalConfig) -> Self {
        Self {
            components: Vec::new(),
            config,
        }
    }

    /// Allocate the next id and store the component built for it.
    pub(crate) fn insert(&mut self, build: impl FnOnce(ComponentId) -> Component) -> ComponentId {
        let id = ComponentId(self.components.len());
        self.components.push(build(id));
        id
    }

    pub(crate) fn get_mut(&mut self, id: ComponentId) -> Result<&mut Component> {
        self.components
            .get_mut(id.0)
            .ok_or(GateSimError::UnknownComponent { id })
    }

    /// Look up a component, failing with `UnknownComponent`.
    pub fn get(&self, id: ComponentId) -> Result<&Component> {
        self.component(id)
            .ok_or(GateSimError::UnknownComponent { id })
    }

    /// Look up a component.
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.0)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        id.0 < self.components.len()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate components in id order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Evaluation settings in effect.
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentKind;

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut netlist = Netlist::default();
        let a = netlist.insert(|id| Component::new(id, ComponentKind::And));
        let b = netlist.insert(|id| Component::source(id, true));

        assert_eq!(a, ComponentId(0));
        assert_eq!(b, ComponentId(1));
        assert_eq!(netlist.len(), 2);
        assert_eq!(netlist.get(b).unwrap().id(), b);
        assert_eq!(netlist.get(b).unwrap().state(), Some(true));
    }

    #[test]
    fn test_unknown_lookup() {
        let netlist = Netlist::default();
        assert!(netlist.is_empty());
        assert!(!netlist.contains(ComponentId(0)));
        assert_eq!(
            netlist.get(ComponentId(3)).unwrap_err(),
            GateSimError::UnknownComponent { id: ComponentId(3) }
        );
    }
}
