//! kanrendb - A relational logic engine over a key-value store
//!
//! Goals are built from unification, deferred constraints, conjunction and
//! disjunction, and evaluated as lazy streams of binding environments. Goal
//! trees can be stored, read back and rebuilt into executable goals through
//! a registry of named constraint constructors.

pub mod codec;
pub mod converter;
pub mod engine;
pub mod entity;
pub mod logic;
pub mod observability;
pub mod registry;
pub mod stdlib;
pub mod storage;
