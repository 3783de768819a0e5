//! # Goal Entities
//!
//! Storable goal trees. The wire form is a tagged union with the
//! discriminators `equal`, `and`, `or` and `constraint`; values are tagged
//! `value` or `variable`.

mod goal_entity;
mod value_ref;

pub use goal_entity::{and, create_constraint, eq, or, GoalEntity};
pub use value_ref::ValueRef;
