//! Key-value storage for goal trees
//!
//! The engine stores encoded goal trees as opaque byte values under a path
//! (a list of segments) and a key.
//!
//! # Design Principles
//!
//! - Async reads, range reads and writes behind one object-safe trait
//! - Keys within a path are ordered byte-wise; range reads are half-open
//! - Segment and key names are validated before any I/O
//! - File-backed records are checksummed and written atomically

mod checksum;
mod errors;
mod local;
mod memory;
mod record;
mod store;

pub use checksum::{compute_checksum, verify_checksum};
pub use errors::{StorageError, StorageResult};
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use store::{validate_key, validate_path, Entry, KeyValueStore};
