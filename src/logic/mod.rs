//! # Logic Core
//!
//! Unification, deferred constraints and lazy goal evaluation.
//!
//! - `value`: variables, declared types and literal values
//! - `state`: immutable binding environment
//! - `stream`: fair, pull-based result streams
//! - `goal`: goals and the `equal` / `constraint` / `and` / `or` combinators
//! - `errors`: faults that end a running query
//!
//! Nothing in this module performs I/O or holds shared mutable state, so
//! independent branches and independent queries can be explored from any
//! thread.

mod errors;
mod goal;
mod state;
mod stream;
mod value;

pub use errors::{LogicError, LogicResult};
pub use goal::{and, and_all, constraint, equal, fail, or, succeed, Goal};
pub use state::{Bindings, ConstraintCheck, DeferredConstraint, State};
pub use stream::GoalStream;
pub use value::{Value, ValueType, Variable};
