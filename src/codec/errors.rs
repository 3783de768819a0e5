//! # Codec Errors

use thiserror::Error;

/// Result type for goal tree encoding
pub type CodecResult<T> = Result<T, CodecError>;

/// Goal tree encoding errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("Failed to encode goal tree: {0}")]
    Encode(String),

    #[error("Failed to decode goal tree: {0}")]
    Decode(String),

    #[error("Unsupported goal format version: {0}")]
    UnsupportedVersion(u32),
}
