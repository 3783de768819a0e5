//! # Constraint Registry
//!
//! Custom constraint logic cannot be stored, only referenced by name. The
//! registry maps each name to a constructor that rebuilds the constraint
//! from its stored parameters.

mod errors;
mod registry;

pub use errors::{ConstraintError, ConstraintResult};
pub use registry::{ConstraintConstructor, ConstraintLibrary, ConstraintRegistry};
