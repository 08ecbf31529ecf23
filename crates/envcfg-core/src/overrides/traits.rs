//! Core trait for override sources

use std::sync::Arc;

/// Separator between namespace and key in an override key
pub const OVERRIDE_SEPARATOR: &str = ".";

/// Build the override key for a namespace entry
///
/// ```
/// use envcfg_core::overrides::override_key;
///
/// assert_eq!(override_key("mysql", "host"), "mysql.host");
/// ```
pub fn override_key(namespace: &str, key: &str) -> String {
    format!("{}{}{}", namespace, OVERRIDE_SEPARATOR, key)
}

/// Key/value store whose values take precedence over file-declared ones
///
/// Sources are read on every namespace lookup, so a value set after the
/// document was decoded is still honored.
///
/// Implementations:
/// - Process environment (`EnvOverrides`)
/// - In-memory map for tests and injected secrets (`MemoryOverrides`)
/// - Ordered fallback (`ChainOverrides`)
/// - Nothing at all (`NoOverrides`)
pub trait OverrideSource: Send + Sync {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Look up an override by its full key (`namespace.key`)
    fn get(&self, key: &str) -> Option<String>;

    /// Check if an override exists
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// List overrides whose key starts with `prefix`
    ///
    /// Used to surface override keys the document does not declare. Sources
    /// that cannot enumerate their keys return nothing.
    fn scan(&self, _prefix: &str) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Type alias for an Arc-wrapped override source
pub type SharedOverrides = Arc<dyn OverrideSource>;

/// Source with no overrides
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl OverrideSource for NoOverrides {
    fn name(&self) -> &str {
        "none"
    }

    fn get(&self, _key: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_key() {
        assert_eq!(override_key("client", "addr"), "client.addr");
    }

    #[test]
    fn test_no_overrides() {
        let source = NoOverrides;
        assert_eq!(source.name(), "none");
        assert_eq!(source.get("mysql.host"), None);
        assert!(!source.has("mysql.host"));
        assert!(source.scan("mysql.").is_empty());
    }
}
