//! # Engine Errors

use thiserror::Error;

use crate::codec::CodecError;
use crate::converter::ConverterError;
use crate::logic::LogicError;
use crate::observability::Severity;
use crate::registry::ConstraintError;
use crate::storage::StorageError;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors surfaced by the engine facade
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Converter(#[from] ConverterError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error(transparent)]
    Logic(#[from] LogicError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Returns the severity level.
    ///
    /// Unknown constraints, malformed trees, faults raised while a query runs
    /// and corrupted records are FATAL: the same input will fail the same way
    /// until the registry, the query or the stored data is fixed.
    pub fn severity(&self) -> Severity {
        match self {
            EngineError::Converter(e) if e.is_fatal() => Severity::Fatal,
            EngineError::Logic(_) => Severity::Fatal,
            EngineError::Storage(e) => e.severity(),
            _ => Severity::Error,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}
