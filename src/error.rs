//! Error types for the gatesim circuit engine.
//!
//! This module provides a unified error type [`GateSimError`] covering
//! wiring mutations, strict value queries, source state changes and
//! component-kind parsing.

use thiserror::Error;

use crate::circuit::{ComponentId, PinKind};
use crate::components::ComponentKind;

/// Result type alias using [`GateSimError`].
pub type Result<T> = std::result::Result<T, GateSimError>;

/// Unified error type for all gatesim operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateSimError {
    // ============ Wiring Errors ============
    /// Pin index outside the component's fixed arity
    #[error("Invalid {kind} index {index} on component {component} (has {len})")]
    InvalidIndex {
        component: ComponentId,
        index: usize,
        len: usize,
        kind: PinKind,
    },

    /// Component id not registered in this circuit
    #[error("Component {id} is not part of this circuit")]
    UnknownComponent { id: ComponentId },

    // ============ State Errors ============
    /// State change requested on a component without settable state
    #[error("Component {id} ({kind}) is not a source")]
    NotASource { id: ComponentId, kind: ComponentKind },

    // ============ Parsing Errors ============
    /// Unknown component type name
    #[error("Unknown component type '{name}'")]
    UnknownComponentType { name: String },

    /// Invalid argument passed to a frontend
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    // ============ I/O Errors ============
    /// Error writing a report
    #[error("Report output error: {message}")]
    ReportOutputError { message: String },
}

impl GateSimError {
    /// Create an invalid input index error
    pub fn invalid_input(component: ComponentId, index: usize, len: usize) -> Self {
        Self::InvalidIndex {
            component,
            index,
            len,
            kind: PinKind::Input,
        }
    }

    /// Create an invalid output index error
    pub fn invalid_output(component: ComponentId, index: usize, len: usize) -> Self {
        Self::InvalidIndex {
            component,
            index,
            len,
            kind: PinKind::Output,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_index_message() {
        let err = GateSimError::invalid_input(ComponentId(3), 2, 2);
        assert_eq!(
            err.to_string(),
            "Invalid input index 2 on component C3 (has 2)"
        );
    }

    #[test]
    fn test_not_a_source_message() {
        let err = GateSimError::NotASource {
            id: ComponentId(1),
            kind: ComponentKind::And,
        };
        assert_eq!(err.to_string(), "Component C1 (and) is not a source");
    }
}
