//! Lazy output evaluation and wiring completeness.
//!
//! Values are never cached: every query walks the current wiring upstream
//! from the requested output. Cyclic wiring is handled with a visited set of
//! component ids; a component found in the set reads `false` instead of being
//! entered again. Traversal keeps its own stack of frames, so long chains do
//! not grow the thread stack.

use std::collections::HashSet;

use tracing::trace;

use super::netlist::Netlist;
use super::types::{ComponentId, Connection, VisitPolicy};
use crate::components::Component;
use crate::error::{GateSimError, Result};

/// Configuration for output evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalConfig {
    /// How the visited set is scoped across sibling branches.
    pub visit_policy: VisitPolicy,
}

impl EvalConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visited-set policy.
    ///
    /// - [`VisitPolicy::Shared`] (default): one set per query; diamonds may
    ///   read low on the second path
    /// - [`VisitPolicy::PerPath`]: only ancestors block re-entry
    pub fn with_visit_policy(mut self, visit_policy: VisitPolicy) -> Self {
        self.visit_policy = visit_policy;
        self
    }
}

impl Netlist {
    /// Evaluate output `output` of component `id`.
    ///
    /// Unwired inputs read `false`. An unknown component, an out-of-range
    /// output index or a connection into an unknown component also read
    /// `false`; use [`try_output_value`](Self::try_output_value) to have the
    /// first two reported instead.
    pub fn output_value(&self, id: ComponentId, output: usize) -> bool {
        let mut visited = HashSet::new();
        self.resolve(Connection::new(id, output), &mut visited)
    }

    /// Evaluate an output, rejecting unknown components and output indices.
    pub fn try_output_value(&self, id: ComponentId, output: usize) -> Result<bool> {
        let component = self.get(id)?;
        if output >= component.num_outputs() {
            return Err(GateSimError::invalid_output(
                id,
                output,
                component.num_outputs(),
            ));
        }
        Ok(self.output_value(id, output))
    }

    fn resolve(&self, target: Connection, visited: &mut HashSet<ComponentId>) -> bool {
        let Some(root) = self.frame(target, visited) else {
            return false;
        };
        let mut stack = vec![root];

        while let Some(frame) = stack.last_mut() {
            if let Some(&slot) = frame.component.inputs().get(frame.next) {
                frame.next += 1;
                let Some(upstream) = slot else {
                    frame.values.push(false);
                    continue;
                };
                // Only components that actually descend are marked.
                if !frame.entered {
                    visited.insert(frame.component.id());
                    frame.entered = true;
                }
                match self.frame(upstream, visited) {
                    Some(child) => stack.push(child),
                    None => frame.values.push(false),
                }
                continue;
            }

            let Some(done) = stack.pop() else {
                break;
            };
            if done.entered && self.config.visit_policy == VisitPolicy::PerPath {
                visited.remove(&done.component.id());
            }
            let value = done
                .component
                .compute(done.output, &done.values)
                .unwrap_or(false);
            match stack.last_mut() {
                Some(parent) => parent.values.push(value),
                None => return value,
            }
        }
        false
    }

    /// Open an evaluation frame for `target`, or `None` if it reads low
    /// without being entered.
    fn frame(&self, target: Connection, visited: &HashSet<ComponentId>) -> Option<Frame<'_>> {
        let Some(component) = self.component(target.component) else {
            trace!(component = %target.component, "dangling connection reads low");
            return None;
        };
        if target.output >= component.num_outputs() {
            return None;
        }
        if visited.contains(&target.component) {
            trace!(component = %target.component, "revisited component reads low");
            return None;
        }
        Some(Frame {
            component,
            output: target.output,
            next: 0,
            entered: false,
            values: Vec::with_capacity(component.num_inputs()),
        })
    }

    /// True iff every input of `id` is wired and every component feeding it
    /// is itself complete.
    ///
    /// A component reached again while its own check is still in progress
    /// counts as complete, so cyclic wiring terminates; the cycle's members
    /// are still required to be fully wired. Unknown components are
    /// incomplete.
    pub fn inputs_complete(&self, id: ComponentId) -> bool {
        let mut visited = HashSet::new();
        self.complete(id, &mut visited)
    }

    fn complete(&self, id: ComponentId, visited: &mut HashSet<ComponentId>) -> bool {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            let Some(component) = self.component(id) else {
                return false;
            };
            if !visited.insert(id) {
                continue;
            }
            if !component.is_fully_wired() {
                return false;
            }
            pending.extend(component.inputs().iter().flatten().map(|c| c.component));
        }
        true
    }
}

/// One component being evaluated: the inputs read so far and the next slot
/// to read.
struct Frame<'a> {
    component: &'a Component,
    output: usize,
    next: usize,
    entered: bool,
    values: Vec<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentKind;

    fn add(netlist: &mut Netlist, kind: ComponentKind) -> ComponentId {
        netlist.insert(|id| Component::new(id, kind))
    }

    fn wire(netlist: &mut Netlist, to: ComponentId, input: usize, from: ComponentId) {
        netlist
            .get_mut(to)
            .unwrap()
            .set_input(input, Some(Connection::new(from, 0)))
            .unwrap();
    }

    /// Source -> Not -> Buf1 -> \
    ///                 \         And
    ///                  Buf2 -> /
    fn diamond(policy: VisitPolicy) -> (Netlist, ComponentId) {
        let mut n = Netlist::with_config(EvalConfig::new().with_visit_policy(policy));
        let src = add(&mut n, ComponentKind::Source);
        let shared = add(&mut n, ComponentKind::Not);
        let left = add(&mut n, ComponentKind::Buffer);
        let right = add(&mut n, ComponentKind::Buffer);
        let and = add(&mut n, ComponentKind::And);
        wire(&mut n, shared, 0, src);
        wire(&mut n, left, 0, shared);
        wire(&mut n, right, 0, shared);
        wire(&mut n, and, 0, left);
        wire(&mut n, and, 1, right);
        (n, and)
    }

    #[test]
    fn test_unwired_reads_low() {
        let mut n = Netlist::default();
        let not = add(&mut n, ComponentKind::Not);
        let and = add(&mut n, ComponentKind::And);
        assert!(n.output_value(not, 0));
        assert!(!n.output_value(and, 0));
    }

    #[test]
    fn test_out_of_range_and_unknown() {
        let mut n = Netlist::default();
        let not = add(&mut n, ComponentKind::Not);
        assert!(!n.output_value(not, 1));
        assert!(!n.output_value(ComponentId(9), 0));
        assert_eq!(
            n.try_output_value(not, 1),
            Err(GateSimError::invalid_output(not, 1, 1))
        );
        assert_eq!(
            n.try_output_value(ComponentId(9), 0),
            Err(GateSimError::UnknownComponent { id: ComponentId(9) })
        );
        assert_eq!(n.try_output_value(not, 0), Ok(true));
    }

    #[test]
    fn test_dangling_connection_reads_low() {
        let mut n = Netlist::default();
        let not = add(&mut n, ComponentKind::Not);
        n.get_mut(not)
            .unwrap()
            .set_input(0, Some(Connection::new(ComponentId(42), 0)))
            .unwrap();
        assert!(n.output_value(not, 0));
        assert!(!n.inputs_complete(not));
    }

    #[test]
    fn test_connection_to_missing_output_reads_low() {
        let mut n = Netlist::default();
        let not = add(&mut n, ComponentKind::Not);
        let buf = add(&mut n, ComponentKind::Buffer);
        n.get_mut(buf)
            .unwrap()
            .set_input(0, Some(Connection::new(not, 3)))
            .unwrap();
        assert!(!n.output_value(buf, 0));
    }

    #[test]
    fn test_self_loop_terminates() {
        let mut n = Netlist::default();
        let not = add(&mut n, ComponentKind::Not);
        wire(&mut n, not, 0, not);
        // The feedback branch reads low, so the inverter reports high.
        assert!(n.output_value(not, 0));
    }

    #[test]
    fn test_loop_through_buffer_terminates() {
        for policy in [VisitPolicy::Shared, VisitPolicy::PerPath] {
            let mut n = Netlist::with_config(EvalConfig::new().with_visit_policy(policy));
            let not = add(&mut n, ComponentKind::Not);
            let buf = add(&mut n, ComponentKind::Buffer);
            wire(&mut n, not, 0, buf);
            wire(&mut n, buf, 0, not);
            // not -> buf -> (not revisited: low) => buf low, not high
            assert!(n.output_value(not, 0));
            // buf -> not -> (buf revisited: low) => not high, buf high
            assert!(n.output_value(buf, 0));
        }
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        for policy in [VisitPolicy::Shared, VisitPolicy::PerPath] {
            let mut n = Netlist::with_config(EvalConfig::new().with_visit_policy(policy));
            let src = n.insert(|id| Component::source(id, true));
            let mut last = src;
            for _ in 0..100_000 {
                let buf = add(&mut n, ComponentKind::Buffer);
                wire(&mut n, buf, 0, last);
                last = buf;
            }
            assert!(n.output_value(last, 0));
            assert!(n.inputs_complete(last));

            n.get_mut(src).unwrap().set_state(false).unwrap();
            assert!(!n.output_value(last, 0));
        }
    }

    #[test]
    fn test_diamond_shared_policy_reads_second_path_low() {
        let (n, and) = diamond(VisitPolicy::Shared);
        // Source low, so the shared inverter is high on the first path but
        // already visited on the second.
        assert!(!n.output_value(and, 0));
    }

    #[test]
    fn test_diamond_per_path_policy() {
        let (n, and) = diamond(VisitPolicy::PerPath);
        assert!(n.output_value(and, 0));
    }

    #[test]
    fn test_unwired_component_reused_across_branches() {
        // A component with no wired inputs never enters the visited set,
        // so reading it twice is consistent under the shared policy.
        let mut n = Netlist::default();
        let not = add(&mut n, ComponentKind::Not);
        let and = add(&mut n, ComponentKind::And);
        wire(&mut n, and, 0, not);
        wire(&mut n, and, 1, not);
        assert!(n.output_value(and, 0));
    }

    #[test]
    fn test_inputs_complete() {
        let mut n = Netlist::default();
        let a = add(&mut n, ComponentKind::Source);
        let b = add(&mut n, ComponentKind::Source);
        let and = add(&mut n, ComponentKind::And);
        assert!(n.inputs_complete(a));
        assert!(!n.inputs_complete(and));

        wire(&mut n, and, 0, a);
        assert!(!n.inputs_complete(and));

        wire(&mut n, and, 1, b);
        assert!(n.inputs_complete(and));
    }

    #[test]
    fn test_inputs_complete_requires_upstream() {
        let mut n = Netlist::default();
        let not = add(&mut n, ComponentKind::Not);
        let buf = add(&mut n, ComponentKind::Buffer);
        wire(&mut n, buf, 0, not);
        assert!(!n.inputs_complete(buf));
    }

    #[test]
    fn test_inputs_complete_on_cycle_terminates() {
        let mut n = Netlist::default();
        let not = add(&mut n, ComponentKind::Not);
        let buf = add(&mut n, ComponentKind::Buffer);
        wire(&mut n, not, 0, buf);
        wire(&mut n, buf, 0, not);
        assert!(n.inputs_complete(not));

        let or = add(&mut n, ComponentKind::Or);
        wire(&mut n, or, 0, or);
        assert!(!n.inputs_complete(or));
    }

    #[test]
    fn test_unknown_component_incomplete() {
        let n = Netlist::default();
        assert!(!n.inputs_complete(ComponentId(0)));
    }
}
