//! # Constraint Registry

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::errors::ConstraintResult;
use crate::entity::GoalEntity;
use crate::logic::Value;

/// Rebuilds a constraint entity, inline goal included, from its parameters
pub type ConstraintConstructor =
    Arc<dyn Fn(&[Value]) -> ConstraintResult<GoalEntity> + Send + Sync>;

/// A named set of constraint constructors
pub trait ConstraintLibrary {
    /// Constructors exported by this library, keyed by registration name
    fn export_constraints(&self) -> Vec<(String, ConstraintConstructor)>;
}

/// Name-keyed table of constraint constructors.
///
/// Registering a name that already exists replaces the earlier constructor.
#[derive(Clone, Default)]
pub struct ConstraintRegistry {
    constructors: HashMap<String, ConstraintConstructor>,
}

impl ConstraintRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge several libraries; later libraries win on duplicate names
    pub fn from_libraries(libraries: &[&dyn ConstraintLibrary]) -> Self {
        let mut registry = Self::new();
        for library in libraries {
            registry.register_library(*library);
        }
        registry
    }

    /// Register a constructor, returning true if it replaced an existing one
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> bool
    where
        F: Fn(&[Value]) -> ConstraintResult<GoalEntity> + Send + Sync + 'static,
    {
        self.insert(name.into(), Arc::new(constructor))
    }

    /// Register every constructor a library exports
    pub fn register_library(&mut self, library: &dyn ConstraintLibrary) {
        for (name, constructor) in library.export_constraints() {
            self.insert(name, constructor);
        }
    }

    /// Get a constructor by name
    pub fn get(&self, name: &str) -> Option<&ConstraintConstructor> {
        self.constructors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    fn insert(&mut self, name: String, constructor: ConstraintConstructor) -> bool {
        self.constructors.insert(name, constructor).is_some()
    }
}

impl fmt::Debug for ConstraintRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintRegistry")
            .field("names", &self.names())
            .finish()
    }
}
