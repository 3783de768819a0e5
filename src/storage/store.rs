//! # Key-Value Store Trait

use std::fmt;

use futures_util::future::BoxFuture;

use super::errors::{StorageError, StorageResult};

/// A stored key together with its value
pub type Entry = (String, Vec<u8>);

/// Byte-oriented store of keys grouped under directory paths.
///
/// Paths are lists of segments; keys within one path are ordered
/// byte-wise. Implementations must validate segments and keys with
/// [`validate_path`] and [`validate_key`].
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Read the value stored under a key, if any
    fn read<'a>(
        &'a self,
        path: &'a [String],
        key: &'a str,
    ) -> BoxFuture<'a, StorageResult<Option<Vec<u8>>>>;

    /// Read every entry with `begin <= key < end`, in key order
    fn read_range<'a>(
        &'a self,
        path: &'a [String],
        begin: &'a str,
        end: &'a str,
    ) -> BoxFuture<'a, StorageResult<Vec<Entry>>>;

    /// Store a value, replacing any previous value of the key
    fn write<'a>(
        &'a self,
        path: &'a [String],
        key: &'a str,
        value: &'a [u8],
    ) -> BoxFuture<'a, StorageResult<()>>;
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}

/// Rejects empty segments, segments starting with `.` and separators
pub fn validate_path(path: &[String]) -> StorageResult<()> {
    match path.iter().find(|segment| !is_valid_name(segment)) {
        Some(segment) => Err(StorageError::InvalidSegment(segment.clone())),
        None => Ok(()),
    }
}

/// Keys follow the same rules as path segments
pub fn validate_key(key: &str) -> StorageResult<()> {
    if is_valid_name(key) {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
