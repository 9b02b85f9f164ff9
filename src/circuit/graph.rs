//! Circuit registry: component ownership, wiring and notifications.

use tracing::debug;

use super::eval::EvalConfig;
use super::events::CircuitEvents;
use super::netlist::Netlist;
use super::types::{ComponentId, Connection, SubscriptionId};
use crate::components::{Component, ComponentKind};
use crate::error::{GateSimError, Result};

/// A live logic circuit.
///
/// The circuit owns every component; components refer to their upstream
/// sources by [`ComponentId`]. Wiring changes go through
/// [`connect`](Self::connect) and [`disconnect`](Self::disconnect), which
/// raise a two-phase notification:
///
/// 1. the component's "inputs will change" handlers, with the input index,
///    while the old wiring is still in place
/// 2. the component's "inputs changed" handlers once the slot is overwritten
///
/// Every registered component relays "inputs changed" to the circuit-wide
/// "state changed" notification. The relay is installed at registration, so
/// it runs before any handler subscribed later.
#[derive(Debug, Default)]
pub struct Circuit {
    netlist: Netlist,
    events: CircuitEvents,
}

impl Circuit {
    /// Create an empty circuit with the default evaluation configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty circuit with a custom evaluation configuration.
    pub fn with_config(config: EvalConfig) -> Self {
        Self {
            netlist: Netlist::with_config(config),
            events: CircuitEvents::default(),
        }
    }

    pub fn config(&self) -> &EvalConfig {
        self.netlist.config()
    }

    /// Replace the evaluation configuration; applies to the next query.
    pub fn set_config(&mut self, config: EvalConfig) {
        self.netlist.config = config;
    }

    /// Read-only view of the components, as handed to handlers.
    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    // ============ Registry ============

    /// Create and register a component of `kind` with all inputs unwired.
    pub fn add_component(&mut self, kind: ComponentKind) -> ComponentId {
        self.register(|id| Component::new(id, kind))
    }

    /// Create and register a source with an initial state.
    pub fn add_source(&mut self, state: bool) -> ComponentId {
        self.register(|id| Component::source(id, state))
    }

    fn register(&mut self, build: impl FnOnce(ComponentId) -> Component) -> ComponentId {
        let id = self.netlist.insert(build);
        self.events.register(id);
        if let Some(component) = self.netlist.component(id) {
            debug!(component = %id, kind = %component.kind(), "component registered");
        }
        id
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.netlist.component(id)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.netlist.contains(id)
    }

    pub fn len(&self) -> usize {
        self.netlist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.netlist.is_empty()
    }

    /// Iterate components in id order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.netlist.components()
    }

    // ============ Wiring ============

    /// Feed input `input` of `id` from `source`, replacing any existing
    /// connection.
    ///
    /// No cycle check is made; feedback is resolved at evaluation time.
    #[tracing::instrument(skip_all, fields(component = %id, input = input))]
    pub fn connect(
        &mut self,
        id: ComponentId,
        input: usize,
        source: impl Into<Connection>,
    ) -> Result<()> {
        let source = source.into();
        if !self.netlist.contains(source.component) {
            return Err(GateSimError::UnknownComponent {
                id: source.component,
            });
        }
        self.rewire(id, input, Some(source))
    }

    /// Leave input `input` of `id` unwired. Disconnecting an unwired input
    /// still raises both notifications.
    #[tracing::instrument(skip_all, fields(component = %id, input = input))]
    pub fn disconnect(&mut self, id: ComponentId, input: usize) -> Result<()> {
        self.rewire(id, input, None)
    }

    fn rewire(
        &mut self,
        id: ComponentId,
        input: usize,
        connection: Option<Connection>,
    ) -> Result<()> {
        // Validate before notifying so a rejected call raises nothing.
        let component = self.netlist.get(id)?;
        if input >= component.num_inputs() {
            return Err(GateSimError::invalid_input(
                id,
                input,
                component.num_inputs(),
            ));
        }

        self.events.raise_inputs_will_change(&self.netlist, id, input);
        let previous = self.netlist.get_mut(id)?.set_input(input, connection)?;
        debug!(
            previous = ?previous.map(|c| c.to_string()),
            current = ?connection.map(|c| c.to_string()),
            "input rewired"
        );
        self.events.raise_inputs_changed(&self.netlist, id);
        Ok(())
    }

    // ============ Source state ============

    /// Set a source's state without notifying; the next query observes it.
    pub fn set_source_state(&mut self, id: ComponentId, state: bool) -> Result<()> {
        self.netlist.get_mut(id)?.set_state(state)
    }

    /// Flip a source's state and raise its "inputs changed" notification,
    /// which relays to "state changed". Returns the new state.
    #[tracing::instrument(skip_all, fields(component = %id))]
    pub fn toggle_source(&mut self, id: ComponentId) -> Result<bool> {
        let component = self.netlist.get_mut(id)?;
        let state = !component.state().unwrap_or(false);
        component.set_state(state)?;
        debug!(state, "source toggled");
        self.events.raise_inputs_changed(&self.netlist, id);
        Ok(state)
    }

    // ============ Queries ============

    /// See [`Netlist::output_value`].
    pub fn output_value(&self, id: ComponentId, output: usize) -> bool {
        self.netlist.output_value(id, output)
    }

    /// See [`Netlist::try_output_value`].
    pub fn try_output_value(&self, id: ComponentId, output: usize) -> Result<bool> {
        self.netlist.try_output_value(id, output)
    }

    /// See [`Netlist::inputs_complete`].
    pub fn inputs_complete(&self, id: ComponentId) -> bool {
        self.netlist.inputs_complete(id)
    }

    // ============ Subscriptions ============

    /// Run `handler` whenever any registered component's wiring changes or a
    /// source is toggled.
    pub fn on_state_changed(
        &mut self,
        mut handler: impl FnMut(&Netlist) + 'static,
    ) -> SubscriptionId {
        self.events
            .subscribe_state_changed(Box::new(move |netlist: &Netlist, _: &()| {
                handler(netlist)
            }))
    }

    /// Run `handler` after `id`'s wiring changed.
    pub fn on_inputs_changed(
        &mut self,
        id: ComponentId,
        mut handler: impl FnMut(&Netlist) + 'static,
    ) -> Result<SubscriptionId> {
        self.events
            .subscribe_inputs_changed(
                id,
                Box::new(move |netlist: &Netlist, _: &()| handler(netlist)),
            )
            .ok_or(GateSimError::UnknownComponent { id })
    }

    /// Run `handler` before one of `id`'s input slots is overwritten. The
    /// handler receives the input index and still sees the old wiring.
    pub fn on_inputs_will_change(
        &mut self,
        id: ComponentId,
        mut handler: impl FnMut(&Netlist, usize) + 'static,
    ) -> Result<SubscriptionId> {
        self.events
            .subscribe_inputs_will_change(id, Box::new(move |netlist: &Netlist, input: &usize| {
                handler(netlist, *input)
            }))
            .ok_or(GateSimError::UnknownComponent { id })
    }

    /// Remove a handler. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        self.events.unsubscribe(subscription)
    }
}
