//! Per-run dependency scope shared by probe invocations

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// Bag of shared resources for one aggregation run.
///
/// A scope is created once per run, handed read-only to every probe through
/// its [`CheckContext`](crate::check::CheckContext), and dropped when the run
/// finishes, whatever the exit path. Probes resolve their own dependencies
/// (pools, clients) from it by key and type; the engine itself never looks
/// inside.
#[derive(Default)]
pub struct CheckScope {
    values: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl CheckScope {
    /// Create an empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a resource under the given key
    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(key.into(), Box::new(value));
    }

    /// Resolve a resource by key, if present and of the requested type
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|value| value.downcast_ref())
    }

    /// Number of stored resources
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no resources are stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for CheckScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckScope")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Creates the scope used by a single aggregation run.
pub trait ScopeProvider: Send + Sync + fmt::Debug {
    /// Build a fresh scope for one run
    fn create_scope(&self) -> CheckScope;
}

/// Provider yielding an empty scope, for hosts without shared resources
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScopeProvider;

impl ScopeProvider for EmptyScopeProvider {
    fn create_scope(&self) -> CheckScope {
        CheckScope::new()
    }
}
