//! Core types for circuit representation.

use std::fmt;
use std::str::FromStr;

use crate::error::GateSimError;

/// A unique identifier for a component in the circuit.
///
/// Ids are assigned by the owning [`Circuit`](super::Circuit) on insertion and
/// are only meaningful within that circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub usize);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// A directed link from an upstream component's output.
///
/// Stored in the downstream component's input slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    /// Upstream component
    pub component: ComponentId,
    /// Output index on the upstream component
    pub output: usize,
}

impl Connection {
    /// Create a connection from `component`'s output `output`.
    pub fn new(component: ComponentId, output: usize) -> Self {
        Self { component, output }
    }
}

impl From<(ComponentId, usize)> for Connection {
    fn from((component, output): (ComponentId, usize)) -> Self {
        Self::new(component, output)
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.output)
    }
}

/// Which side of a component a pin index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinKind {
    Input,
    Output,
}

impl fmt::Display for PinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinKind::Input => write!(f, "input"),
            PinKind::Output => write!(f, "output"),
        }
    }
}

/// Handle returned by every subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Visited-set policy used while evaluating outputs.
///
/// Both policies guarantee termination on cyclic wiring; they differ on
/// re-convergent paths (diamonds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitPolicy {
    /// One visited set per top-level query, shared by sibling branches.
    ///
    /// A component reached a second time through a different branch reads
    /// `false`, even when no cycle exists.
    #[default]
    Shared,
    /// The visited set only holds the ancestors on the current path.
    ///
    /// Diamonds evaluate correctly, at the cost of re-evaluating shared
    /// upstream logic once per path.
    PerPath,
}

impl FromStr for VisitPolicy {
    type Err = GateSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shared" => Ok(Self::Shared),
            "per-path" | "perpath" | "path" => Ok(Self::PerPath),
            _ => Err(GateSimError::invalid_argument(format!(
                "unknown visit policy '{s}' (expected shared or per-path)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ComponentId(7).to_string(), "C7");
        assert_eq!(Connection::new(ComponentId(2), 0).to_string(), "C2.0");
        assert_eq!(PinKind::Output.to_string(), "output");
    }

    #[test]
    fn test_visit_policy_parse() {
        assert_eq!("Shared".parse::<VisitPolicy>(), Ok(VisitPolicy::Shared));
        assert_eq!("per-path".parse::<VisitPolicy>(), Ok(VisitPolicy::PerPath));
        assert!("bogus".parse::<VisitPolicy>().is_err());
        assert_eq!(VisitPolicy::default(), VisitPolicy::Shared);
    }
}
