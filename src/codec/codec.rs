//! Versioned JSON encoding of goal trees

use serde::{Deserialize, Serialize};

use super::errors::{CodecError, CodecResult};
use crate::entity::GoalEntity;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct StoredGoalRef<'a> {
    format_version: u32,
    goal: &'a GoalEntity,
}

#[derive(Deserialize)]
struct StoredGoal {
    format_version: u32,
    goal: serde_json::Value,
}

/// Encodes goal trees to bytes and back.
///
/// Inline constraint goals are not written; a decoded constraint always has
/// to be rebuilt through the registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityCodec;

impl EntityCodec {
    pub fn encode(&self, entity: &GoalEntity) -> CodecResult<Vec<u8>> {
        let stored = StoredGoalRef {
            format_version: FORMAT_VERSION,
            goal: entity,
        };
        serde_json::to_vec(&stored).map_err(|e| CodecError::Encode(e.to_string()))
    }

    /// Decodes a stored tree of any nesting depth.
    ///
    /// serde_json's recursion limit is lifted and the stack grows on demand,
    /// so every tree `encode` accepts can be read back.
    pub fn decode(&self, bytes: &[u8]) -> CodecResult<GoalEntity> {
        let mut deserializer = serde_json::Deserializer::from_slice(bytes);
        deserializer.disable_recursion_limit();
        let stored = StoredGoal::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
            .and_then(|stored| deserializer.end().map(|()| stored))
            .map_err(|e| CodecError::Decode(e.to_string()))?;

        if stored.format_version != FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion(stored.format_version));
        }

        GoalEntity::deserialize(serde_stacker::Deserializer::new(stored.goal))
            .map_err(|e| CodecError::Decode(e.to_string()))
    }
}
