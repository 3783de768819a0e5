//! # Engine
//!
//! The facade callers use: run goal trees, persist them through a
//! [`KeyValueStore`](crate::storage::KeyValueStore), and combine stored
//! trees with the [`Query`] builder.

mod config;
mod engine;
mod errors;
mod query;

pub use config::EngineConfig;
pub use engine::Engine;
pub use errors::{ConfigError, EngineError, EngineResult};
pub use query::Query;

pub use crate::observability::{EngineMetrics, MetricsSnapshot};
