//! # Constraint Errors

use thiserror::Error;

use crate::logic::ValueType;

/// Result type for constraint construction
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Errors raised while building a constraint.
///
/// These are programmer errors: they are reported to the caller that builds
/// the constraint and are never deferred into the result stream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    #[error("Cannot compare values of type {first} and {second}")]
    IncomparableTypes { first: ValueType, second: ValueType },

    #[error("Invalid comparison result: {0} (expected -1, 0 or 1)")]
    InvalidExpectation(i64),

    #[error("Constraint {name} takes {expected} parameters, got {actual}")]
    WrongArity {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid parameter for {name}: {reason}")]
    InvalidParameter { name: String, reason: String },
}
