//! In-memory override source

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::OverrideSource;

/// In-memory override source for tests and injected values
///
/// Unlike the process environment, each instance is isolated, which keeps
/// tests deterministic when they run in parallel.
///
/// # Thread Safety
///
/// The source uses `RwLock` internally and is safe to use from multiple threads.
///
/// # Example
///
/// ```
/// use envcfg_core::overrides::{OverrideSource, MemoryOverrides};
///
/// let source = MemoryOverrides::new();
/// source.set("mysql.host", "localhost");
/// assert_eq!(source.get("mysql.host"), Some("localhost".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryOverrides {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryOverrides {
    /// Create a new empty source
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Create a source with initial values
    pub fn with_values<I, K, V>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RwLock::new(
                initial
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Set an override, replacing any previous value
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }

    /// Remove an override, returning its value
    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().remove(key)
    }

    /// Remove all overrides
    pub fn clear(&self) {
        self.values.write().clear();
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OverrideSource for MemoryOverrides {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn scan(&self, prefix: &str) -> Vec<(String, String)> {
        self.values
            .read()
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl Clone for MemoryOverrides {
    fn clone(&self) -> Self {
        Self {
            values: RwLock::new(self.values.read().clone()),
        }
    }
}
