//! # Logic Errors

use thiserror::Error;

/// Result type for consuming a goal stream
pub type LogicResult<T> = Result<T, LogicError>;

/// Faults raised while a goal runs.
///
/// Unlike a failed unification, a fault is not a legitimate "no" answer: it
/// ends the query that produced it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LogicError {
    #[error("Values must be of the same type to be ordered: {first} and {second}")]
    IncomparableValues {
        first: serde_json::Value,
        second: serde_json::Value,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message() {
        let err = LogicError::IncomparableValues {
            first: json!(1),
            second: json!("one"),
        };
        assert_eq!(
            err.to_string(),
            "Values must be of the same type to be ordered: 1 and \"one\""
        );
    }
}
