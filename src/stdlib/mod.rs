//! # Standard Library
//!
//! Derived constraints built on the public constraint API:
//!
//! - `not_eq`: disequality
//! - `cmp`: ordering against an expected comparison result
//! - `in_set`: membership, expressed as a disjunction of equalities
//!
//! [`StdLib`] exports the constructors of `not_eq` and `cmp` so stored goal
//! trees that use them can be rebuilt.

mod compare;
mod constraints;

pub use compare::{compare_values, signum};
pub use constraints::{cmp, in_set, not_eq, StdLib, CMP, NOT_EQ};
