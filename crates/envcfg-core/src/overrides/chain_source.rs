//! Chained override source with fallback behavior

use std::collections::HashSet;

use super::traits::{OverrideSource, SharedOverrides};

/// An override source that chains several sources together
///
/// Lookups try each source in order and return the first match, so earlier
/// sources have higher priority.
///
/// # Example
///
/// ```
/// use envcfg_core::overrides::{OverrideSource, ChainOverrides, EnvOverrides, MemoryOverrides};
/// use std::sync::Arc;
///
/// let pinned = Arc::new(MemoryOverrides::new());
/// pinned.set("mysql.host", "localhost");
///
/// // Try the pinned values first, then fall back to the environment
/// let chain = ChainOverrides::new(vec![pinned, Arc::new(EnvOverrides::new())]);
/// assert_eq!(chain.get("mysql.host"), Some("localhost".to_string()));
/// ```
pub struct ChainOverrides {
    sources: Vec<SharedOverrides>,
}

impl ChainOverrides {
    /// Create a new chain; sources are tried in order
    pub fn new(sources: Vec<SharedOverrides>) -> Self {
        Self { sources }
    }

    /// Get the sources in this chain
    pub fn sources(&self) -> &[SharedOverrides] {
        &self.sources
    }

    /// Find which source provides a key
    pub fn find_source(&self, key: &str) -> Option<&SharedOverrides> {
        self.sources.iter().find(|source| source.has(key))
    }
}

impl OverrideSource for ChainOverrides {
    fn name(&self) -> &str {
        "chain"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.get(key))
    }

    fn scan(&self, prefix: &str) -> Vec<(String, String)> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for source in &self.sources {
            for (key, _) in source.scan(prefix) {
                if !seen.insert(key.clone()) {
                    continue;
                }
                // A higher-priority source may hold the key without listing it
                if let Some(value) = self.get(&key) {
                    found.push((key, value));
                }
            }
        }
        found
    }
}

// Implement Debug manually since Arc<dyn OverrideSource> doesn't implement Debug
impl std::fmt::Debug for ChainOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.sources.iter().map(|s| s.name().to_string()).collect();
        f.debug_struct("ChainOverrides")
            .field("sources", &names)
            .finish()
    }
}
