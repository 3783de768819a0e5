//! Engine facade
//!
//! Ties storage, the codec, the constraint registry and the converter
//! together. The engine only ever exchanges goal trees with callers and the
//! store; executable goals are built at query time and never persisted.

use std::sync::Arc;

use uuid::Uuid;

use super::config::EngineConfig;
use super::errors::{EngineError, EngineResult};
use super::query::Query;
use crate::codec::EntityCodec;
use crate::converter::{ConverterError, GoalConverter};
use crate::entity::GoalEntity;
use crate::logic::{Goal, GoalStream, State};
use crate::observability::{log_event, EngineMetrics, Event, Logger, MetricsSnapshot};
use crate::registry::{ConstraintLibrary, ConstraintRegistry};
use crate::stdlib::StdLib;
use crate::storage::{KeyValueStore, LocalStore, MemoryStore, StorageError};

/// Query engine over a key-value store.
///
/// Cloning is cheap; clones share the store, registry and counters.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Arc<EngineConfig>,
    store: Arc<dyn KeyValueStore>,
    registry: Arc<ConstraintRegistry>,
    metrics: Arc<EngineMetrics>,
    codec: EntityCodec,
}

impl Engine {
    /// Open an engine backed by a [`LocalStore`] under `config.data_dir`
    pub fn open(config: EngineConfig, libraries: &[&dyn ConstraintLibrary]) -> EngineResult<Self> {
        let store = LocalStore::new(&config.data_dir).with_checksums(config.verify_checksums);
        Self::with_store(config, Arc::new(store), libraries)
    }

    /// Create an engine over any store
    pub fn with_store(
        config: EngineConfig,
        store: Arc<dyn KeyValueStore>,
        libraries: &[&dyn ConstraintLibrary],
    ) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            store,
            registry: Arc::new(build_registry(libraries)),
            metrics: Arc::new(EngineMetrics::new()),
            codec: EntityCodec,
        })
    }

    /// Create an engine with default configuration over a [`MemoryStore`]
    pub fn in_memory(libraries: &[&dyn ConstraintLibrary]) -> Self {
        Self {
            config: Arc::new(EngineConfig::default()),
            store: Arc::new(MemoryStore::new()),
            registry: Arc::new(build_registry(libraries)),
            metrics: Arc::new(EngineMetrics::new()),
            codec: EntityCodec,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &ConstraintRegistry {
        &self.registry
    }

    /// Current counter values
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Converts a goal tree into an executable goal
    pub fn convert(&self, goal: &GoalEntity) -> EngineResult<Goal> {
        self.convert_logged(goal, &Uuid::new_v4().to_string())
    }

    /// Runs a goal tree against an empty state
    pub fn run(&self, goal: &GoalEntity) -> EngineResult<GoalStream> {
        self.run_with(goal, State::new())
    }

    /// Runs a goal tree against the given state.
    ///
    /// Conversion happens up front, so unknown constraints are reported here
    /// rather than while the stream is consumed.
    pub fn run_with(&self, goal: &GoalEntity, state: State) -> EngineResult<GoalStream> {
        let query_id = Uuid::new_v4().to_string();
        self.metrics.increment_queries_run();
        if self.config.log_queries {
            log_event(
                Event::QueryStart,
                &[("goal", goal.kind()), ("query_id", query_id.as_str())],
            );
        }

        let executable = self.convert_logged(goal, &query_id)?;
        Ok(executable.apply(state))
    }

    /// Start a query over goal trees the caller already holds
    pub fn query(&self, goals: Vec<GoalEntity>) -> Query {
        Query::new(self.clone(), goals)
    }

    /// Encode and store a goal tree
    pub async fn write(&self, path: &[String], key: &str, goal: &GoalEntity) -> EngineResult<()> {
        let bytes = self.codec.encode(goal)?;
        let full_path = self.full_path(path);

        self.store
            .write(&full_path, key, &bytes)
            .await
            .map_err(|e| self.storage_failure(key, e))?;

        self.metrics.record_write(bytes.len() as u64);
        if self.config.log_queries {
            let size = bytes.len().to_string();
            let joined = full_path.join("/");
            log_event(
                Event::GoalWritten,
                &[("bytes", size.as_str()), ("key", key), ("path", joined.as_str())],
            );
        }
        Ok(())
    }

    /// Read the goal tree stored under a key.
    ///
    /// A missing key yields an empty query.
    pub async fn read(&self, path: &[String], key: &str) -> EngineResult<Query> {
        let full_path = self.full_path(path);
        let stored = self
            .store
            .read(&full_path, key)
            .await
            .map_err(|e| self.storage_failure(key, e))?;

        let Some(bytes) = stored else {
            if self.config.log_queries {
                log_event(Event::GoalMissing, &[("key", key)]);
            }
            return Ok(self.query(Vec::new()));
        };

        let goal = self.codec.decode(&bytes)?;
        self.metrics.add_goals_read(1);
        if self.config.log_queries {
            log_event(Event::GoalRead, &[("goal", goal.kind()), ("key", key)]);
        }
        Ok(self.query(vec![goal]))
    }

    /// Read every goal tree with `begin <= key < end`, in key order
    pub async fn read_range(&self, path: &[String], begin: &str, end: &str) -> EngineResult<Query> {
        let full_path = self.full_path(path);
        let entries = self
            .store
            .read_range(&full_path, begin, end)
            .await
            .map_err(|e| self.storage_failure(begin, e))?;

        let goals = entries
            .iter()
            .map(|(_, bytes)| self.codec.decode(bytes))
            .collect::<Result<Vec<_>, _>>()?;

        self.metrics.add_goals_read(goals.len() as u64);
        if self.config.log_queries {
            let count = goals.len().to_string();
            log_event(
                Event::RangeRead,
                &[("begin", begin), ("count", count.as_str()), ("end", end)],
            );
        }
        Ok(self.query(goals))
    }

    fn full_path(&self, path: &[String]) -> Vec<String> {
        self.config.namespace.iter().chain(path).cloned().collect()
    }

    fn convert_logged(&self, goal: &GoalEntity, query_id: &str) -> EngineResult<Goal> {
        match GoalConverter::new(&self.registry).convert(goal) {
            Ok(executable) => {
                self.metrics.increment_conversions();
                if self.config.log_queries {
                    log_event(Event::QueryConverted, &[("query_id", query_id)]);
                }
                Ok(executable)
            }
            Err(err) => {
                self.metrics.increment_conversion_failures();
                match &err {
                    ConverterError::UnknownConstraint(name) => log_event(
                        Event::UnknownConstraint,
                        &[("constraint", name.as_str()), ("query_id", query_id)],
                    ),
                    other => {
                        let message = other.to_string();
                        Logger::error(
                            Event::QueryRejected.as_str(),
                            &[("error", message.as_str()), ("query_id", query_id)],
                        );
                    }
                }
                Err(err.into())
            }
        }
    }

    fn storage_failure(&self, key: &str, err: StorageError) -> EngineError {
        if err.is_fatal() {
            let message = err.to_string();
            log_event(
                Event::StorageCorruption,
                &[("error", message.as_str()), ("key", key)],
            );
        }
        err.into()
    }
}

/// StdLib first, then user libraries in order; later names win
fn build_registry(libraries: &[&dyn ConstraintLibrary]) -> ConstraintRegistry {
    let mut registry = ConstraintRegistry::new();
    registry.register_library(&StdLib);
    for library in libraries {
        registry.register_library(*library);
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity;
    use crate::logic::{ValueType, Variable};
    use crate::stdlib::{CMP, NOT_EQ};

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_registry_contains_stdlib() {
        let engine = Engine::in_memory(&[]);
        assert!(engine.registry().contains(NOT_EQ));
        assert!(engine.registry().contains(CMP));
    }

    #[test]
    fn test_run_counts_queries() {
        let engine = Engine::in_memory(&[]);
        let x = Variable::new("x", ValueType::Integer);

        let results = engine.run(&entity::eq(&x, 1)).unwrap().successes().count();

        assert_eq!(results, 1);
        let metrics = engine.metrics();
        assert_eq!(metrics.queries_run, 1);
        assert_eq!(metrics.conversions, 1);
    }

    #[test]
    fn test_unknown_constraint_counts_failure() {
        let engine = Engine::in_memory(&[]);
        let stored = entity::GoalEntity::Constraint {
            name: "missing".into(),
            parameters: vec![],
            goal: None,
        };

        let err = engine.run(&stored).err().unwrap();

        assert!(err.is_fatal());
        assert_eq!(engine.metrics().conversion_failures, 1);
    }

    #[test]
    fn test_with_store_validates_config() {
        let config = EngineConfig {
            select_limit: Some(0),
            ..EngineConfig::default()
        };
        assert!(Engine::with_store(config, Arc::new(MemoryStore::new()), &[]).is_err());
    }

    #[tokio::test]
    async fn test_namespace_prefixes_paths() {
        let store = Arc::new(MemoryStore::new());
        let config = EngineConfig {
            namespace: path(&["tenant"]),
            ..EngineConfig::default()
        };
        let engine = Engine::with_store(config, store.clone(), &[]).unwrap();

        engine.write(&path(&["goals"]), "k", &entity::eq(1, 1)).await.unwrap();

        assert!(store.read(&path(&["tenant", "goals"]), "k").await.unwrap().is_some());
        assert!(store.read(&path(&["goals"]), "k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_counts_bytes() {
        let engine = Engine::in_memory(&[]);

        engine.write(&path(&["db"]), "k", &entity::eq(1, 1)).await.unwrap();

        let metrics = engine.metrics();
        assert_eq!(metrics.goals_written, 1);
        assert!(metrics.bytes_written > 0);
    }
}
