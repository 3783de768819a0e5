//! # Goal Converter
//!
//! Rebuilds executable goals from stored goal trees, resolving custom
//! constraints by name through a [`ConstraintRegistry`](crate::registry::ConstraintRegistry).

mod converter;
mod errors;

pub use converter::GoalConverter;
pub use errors::{ConverterError, ConverterResult};
