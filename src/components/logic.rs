//! Output functions for the built-in component kinds.
//!
//! Every function has the [`OutputFn`](super::OutputFn) shape: it receives the
//! current input values in input-index order plus the component's own state
//! (only meaningful for sources) and returns the output value.

/// Source: reports its own state, ignores inputs.
pub fn source(_inputs: &[bool], state: bool) -> bool {
    state
}

/// Buffer: passes input 0 through.
pub fn buffer(inputs: &[bool], _state: bool) -> bool {
    inputs.first().copied().unwrap_or(false)
}

/// Not: inverts input 0.
pub fn not(inputs: &[bool], _state: bool) -> bool {
    !inputs.first().copied().unwrap_or(false)
}

/// And: n-ary reduction starting from `true`.
pub fn and(inputs: &[bool], _state: bool) -> bool {
    inputs.iter().all(|&b| b)
}

/// Or: n-ary reduction starting from `false`.
pub fn or(inputs: &[bool], _state: bool) -> bool {
    inputs.iter().any(|&b| b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_reduction() {
        assert!(and(&[], false));
        assert!(and(&[true, true, true], false));
        assert!(!and(&[true, false, true], false));
    }

    #[test]
    fn test_or_reduction() {
        assert!(!or(&[], false));
        assert!(or(&[false, false, true], false));
        assert!(!or(&[false, false, false], false));
    }

    #[test]
    fn test_unary() {
        assert!(buffer(&[true], false));
        assert!(!buffer(&[false], true));
        assert!(not(&[false], false));
        assert!(!not(&[true], false));
    }

    #[test]
    fn test_source_reads_state() {
        assert!(source(&[], true));
        assert!(!source(&[], false));
    }
}
