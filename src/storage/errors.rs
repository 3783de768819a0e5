//! # Storage Errors
//!
//! - Invalid path segments and keys are rejected before any I/O (ERROR)
//! - I/O failures are reported with the affected path (ERROR)
//! - Checksum failures and malformed records are corruption (FATAL)

use thiserror::Error;

use crate::observability::Severity;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Key-value store errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("Invalid path segment: {0:?}")]
    InvalidSegment(String),

    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    #[error("I/O error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("Checksum mismatch for key {0}")]
    ChecksumMismatch(String),

    #[error("Corrupted record for key {key}: {reason}")]
    Corrupted { key: String, reason: String },
}

impl StorageError {
    pub(crate) fn io(path: impl std::fmt::Display, error: std::io::Error) -> Self {
        StorageError::Io {
            path: path.to_string(),
            message: error.to_string(),
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        match self {
            StorageError::ChecksumMismatch(_) | StorageError::Corrupted { .. } => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Returns whether the stored data can no longer be trusted
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}
