//! Component kinds and their behaviour table.

use std::fmt;
use std::str::FromStr;

use super::logic;
use crate::error::GateSimError;

/// Function computing one output from the input values and component state.
pub type OutputFn = fn(&[bool], bool) -> bool;

/// Static behaviour of a component kind.
pub struct KindInfo {
    /// Lowercase name, also accepted by [`ComponentKind::from_str`]
    pub label: &'static str,
    /// Short display hint for a view layer
    pub symbol: &'static str,
    /// Fixed number of inputs
    pub num_inputs: usize,
    /// One function per output, in output-index order
    pub outputs: &'static [OutputFn],
}

impl KindInfo {
    /// Fixed number of outputs.
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }
}

impl fmt::Debug for KindInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindInfo")
            .field("label", &self.label)
            .field("num_inputs", &self.num_inputs)
            .field("num_outputs", &self.num_outputs())
            .finish()
    }
}

static SOURCE: KindInfo = KindInfo {
    label: "source",
    symbol: "IN",
    num_inputs: 0,
    outputs: &[logic::source],
};

static BUFFER: KindInfo = KindInfo {
    label: "buffer",
    symbol: "BUF",
    num_inputs: 1,
    outputs: &[logic::buffer],
};

static NOT: KindInfo = KindInfo {
    label: "not",
    symbol: "NOT",
    num_inputs: 1,
    outputs: &[logic::not],
};

static AND: KindInfo = KindInfo {
    label: "and",
    symbol: "AND",
    num_inputs: 2,
    outputs: &[logic::and],
};

static OR: KindInfo = KindInfo {
    label: "or",
    symbol: "OR",
    num_inputs: 2,
    outputs: &[logic::or],
};

/// The closed set of component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Zero-input signal source with a settable state
    Source,
    /// Identity of input 0
    Buffer,
    /// Negation of input 0
    Not,
    /// AND over all inputs
    And,
    /// OR over all inputs
    Or,
}

impl ComponentKind {
    /// Every kind, in declaration order.
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Source,
        ComponentKind::Buffer,
        ComponentKind::Not,
        ComponentKind::And,
        ComponentKind::Or,
    ];

    /// Look up the behaviour table entry for this kind.
    pub fn info(self) -> &'static KindInfo {
        match self {
            ComponentKind::Source => &SOURCE,
            ComponentKind::Buffer => &BUFFER,
            ComponentKind::Not => &NOT,
            ComponentKind::And => &AND,
            ComponentKind::Or => &OR,
        }
    }

    pub fn num_inputs(self) -> usize {
        self.info().num_inputs
    }

    pub fn num_outputs(self) -> usize {
        self.info().num_outputs()
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }

    /// Output function for `output`, if the index is in range.
    pub fn output_fn(self, output: usize) -> Option<OutputFn> {
        self.info().outputs.get(output).copied()
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComponentKind {
    type Err = GateSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source" | "input" | "globalinput" => Ok(Self::Source),
            "buffer" | "single" | "buf" => Ok(Self::Buffer),
            "not" => Ok(Self::Not),
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            _ => Err(GateSimError::UnknownComponentType {
                name: s.to_string(),
            }),
        }
    }
}
