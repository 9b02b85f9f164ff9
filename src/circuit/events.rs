//! Synchronous change notifications.
//!
//! Handlers run in subscription order, on the caller's stack, and receive a
//! shared reference to the [`Netlist`] so they can query values but not
//! rewire.

use std::fmt;

use super::netlist::Netlist;
use super::types::{ComponentId, SubscriptionId};

/// Boxed notification handler.
pub(crate) type Handler<T> = Box<dyn FnMut(&Netlist, &T)>;

enum Subscriber<T> {
    /// Re-raise the circuit-wide "state changed" notification
    Relay,
    Callback(SubscriptionId, Handler<T>),
}

/// An ordered list of subscribers for one notification.
pub(crate) struct Event<T> {
    subscribers: Vec<Subscriber<T>>,
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T> Event<T> {
    fn add_handler(&mut self, id: SubscriptionId, handler: Handler<T>) {
        self.subscribers.push(Subscriber::Callback(id, handler));
    }

    fn add_relay(&mut self) {
        self.subscribers.push(Subscriber::Relay);
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers
            .retain(|s| !matches!(s, Subscriber::Callback(sid, _) if *sid == id));
        self.subscribers.len() != before
    }

    /// Invoke every subscriber in order; relay entries call `relay`.
    fn raise(&mut self, netlist: &Netlist, data: &T, relay: &mut dyn FnMut(&Netlist)) {
        for subscriber in &mut self.subscribers {
            match subscriber {
                Subscriber::Relay => relay(netlist),
                Subscriber::Callback(_, handler) => handler(netlist, data),
            }
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.subscribers.len()
    }
}

/// Per-component notifications.
#[derive(Debug, Default)]
pub(crate) struct ComponentEvents {
    /// Raised before an input slot is overwritten; payload is the input index
    pub(crate) inputs_will_change: Event<usize>,
    /// Raised after the wiring changed
    pub(crate) inputs_changed: Event<()>,
}

/// Every notification of one circuit.
#[derive(Debug, Default)]
pub(crate) struct CircuitEvents {
    next_id: u64,
    pub(crate) state_changed: Event<()>,
    /// Indexed by component id, parallel to the netlist arena
    pub(crate) components: Vec<ComponentEvents>,
}

impl CircuitEvents {
    fn next_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create the event slot for a newly registered component with the
    /// circuit relay as its first "inputs changed" subscriber.
    pub(crate) fn register(&mut self, id: ComponentId) {
        debug_assert_eq!(id.0, self.components.len());
        let mut events = ComponentEvents::default();
        events.inputs_changed.add_relay();
        self.components.push(events);
    }

    pub(crate) fn subscribe_state_changed(&mut self, handler: Handler<()>) -> SubscriptionId {
        let id = self.next_id();
        self.state_changed.add_handler(id, handler);
        id
    }

    /// Returns `None` when the component has no event slot.
    pub(crate) fn subscribe_inputs_changed(
        &mut self,
        component: ComponentId,
        handler: Handler<()>,
    ) -> Option<SubscriptionId> {
        let id = self.next_id();
        let events = self.components.get_mut(component.0)?;
        events.inputs_changed.add_handler(id, handler);
        Some(id)
    }

    pub(crate) fn subscribe_inputs_will_change(
        &mut self,
        component: ComponentId,
        handler: Handler<usize>,
    ) -> Option<SubscriptionId> {
        let id = self.next_id();
        let events = self.components.get_mut(component.0)?;
        events.inputs_will_change.add_handler(id, handler);
        Some(id)
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if self.state_changed.remove(id) {
            return true;
        }
        self.components
            .iter_mut()
            .any(|e| e.inputs_will_change.remove(id) || e.inputs_changed.remove(id))
    }

    pub(crate) fn raise_inputs_will_change(
        &mut self,
        netlist: &Netlist,
        component: ComponentId,
        input: usize,
    ) {
        if let Some(events) = self.components.get_mut(component.0) {
            events
                .inputs_will_change
                .raise(netlist, &input, &mut |_: &Netlist| {});
        }
    }

    pub(crate) fn raise_inputs_changed(&mut self, netlist: &Netlist, component: ComponentId) {
        let Self {
            state_changed,
            components,
            ..
        } = self;
        if let Some(events) = components.get_mut(component.0) {
            events
                .inputs_changed
                .raise(netlist, &(), &mut |n: &Netlist| {
                    state_changed.raise(n, &(), &mut |_: &Netlist| {})
                });
        }
    }
}
