//! Error types for the transform engine and the impedance converter.

use thiserror::Error;

/// Errors raised by fallible operations on [`ThreePhase`](super::ThreePhase)
/// and [`WyeDelta`](super::WyeDelta).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// An operator received an operand of the wrong kind, e.g. a number
    /// where a three-phase quantity is required, or a complex value where a
    /// real rotation angle is required.
    #[error("unsupported operand type(s) for {op}: '{lhs}' and '{rhs}'")]
    TypeMismatch {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    /// A Wye/Delta conversion divides by zero or yields a non-finite value.
    #[error("degenerate impedance network: {0}")]
    Degenerate(String),
}

/// Convenience type alias for results using [`TransformError`].
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_message() {
        let err = TransformError::TypeMismatch {
            op: "+",
            lhs: "ThreePhase",
            rhs: "int",
        };
        assert_eq!(
            err.to_string(),
            "unsupported operand type(s) for +: 'ThreePhase' and 'int'"
        );
    }
}
