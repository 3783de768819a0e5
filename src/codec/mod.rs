//! # Goal Tree Codec
//!
//! Byte encoding of [`GoalEntity`](crate::entity::GoalEntity) trees for the
//! key-value store. Records are JSON wrapped in a versioned envelope:
//!
//! ```text
//! {"format_version": 1, "goal": {"type": "and", "goals": [...]}}
//! ```

mod codec;
mod errors;

pub use codec::{EntityCodec, FORMAT_VERSION};
pub use errors::{CodecError, CodecResult};
