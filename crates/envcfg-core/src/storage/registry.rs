//! Storage registry for creating storages by kind and location

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::traits::{SharedStorage, StorageError, StorageResult};
use super::memory::MemoryStorage;
use super::file::FileStorage;

/// Factory function type: builds a storage from a location string
pub type StorageFactory = Box<dyn Fn(&str) -> StorageResult<SharedStorage> + Send + Sync>;

/// Definition of a registered storage kind
pub struct StorageDefinition {
    /// Unique kind name (e.g. "file")
    pub kind: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to create instances
    pub factory: StorageFactory,
}

impl std::fmt::Debug for StorageDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageDefinition")
            .field("kind", &self.kind)
            .field("description", &self.description)
            .finish()
    }
}

static REGISTRY: Lazy<RwLock<HashMap<String, StorageDefinition>>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert(
        "memory".to_string(),
        StorageDefinition {
            kind: "memory".to_string(),
            description: "Literal TOML document; the location is the document itself".to_string(),
            factory: Box::new(|location: &str| Ok(Arc::new(MemoryStorage::new(location)) as SharedStorage)),
        },
    );

    map.insert(
        "file".to_string(),
        StorageDefinition {
            kind: "file".to_string(),
            description: "Configuration file; the location is its path".to_string(),
            factory: Box::new(|location: &str| Ok(Arc::new(FileStorage::new(location)) as SharedStorage)),
        },
    );

    RwLock::new(map)
});

/// Register a new storage kind, replacing any previous one with the same name
///
/// # Example
///
/// ```
/// use envcfg_core::storage::{register_storage, create_storage, FnStorage, SharedStorage};
/// use std::sync::Arc;
///
/// register_storage(
///     "static",
///     "Fixed document for demos",
///     Box::new(|_: &str| Ok(Arc::new(FnStorage::new("static", || Ok(b"[demo]\n".to_vec()))) as SharedStorage)),
/// );
///
/// let storage = create_storage("static", "").unwrap();
/// assert_eq!(storage.name(), "static");
/// ```
pub fn register_storage(kind: &str, description: &str, factory: StorageFactory) {
    let mut registry = REGISTRY.write();
    registry.insert(
        kind.to_string(),
        StorageDefinition {
            kind: kind.to_string(),
            description: description.to_string(),
            factory,
        },
    );
}

/// Create a storage of a registered kind
///
/// Fails with `StorageError::Unknown` when the kind is not registered.
pub fn create_storage(kind: &str, location: &str) -> StorageResult<SharedStorage> {
    let registry = REGISTRY.read();
    match registry.get(kind) {
        Some(def) => (def.factory)(location),
        None => Err(StorageError::Unknown(kind.to_string())),
    }
}

/// List all registered storage kinds as (kind, description) pairs
pub fn list_storages() -> Vec<(String, String)> {
    let registry = REGISTRY.read();
    let mut kinds: Vec<_> = registry
        .values()
        .map(|def| (def.kind.clone(), def.description.clone()))
        .collect();
    kinds.sort();
    kinds
}

/// Check if a storage kind is registered
pub fn has_storage(kind: &str) -> bool {
    REGISTRY.read().contains_key(kind)
}

/// Unregister a storage kind (mainly for testing)
pub fn unregister_storage(kind: &str) -> bool {
    REGISTRY.write().remove(kind).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FnStorage;

    #[test]
    fn test_builtin_storages_registered() {
        assert!(has_storage("memory"));
        assert!(has_storage("file"));
    }

    #[test]
    fn test_create_memory_storage() {
        let storage = create_storage("memory", "[a]\nb = 1\n").unwrap();
        assert_eq!(storage.name(), "memory");
        assert_eq!(storage.fetch_encoded_document().unwrap(), b"[a]\nb = 1\n");
    }

    #[test]
    fn test_create_file_storage() {
        let storage = create_storage("file", "/nonexistent/envcfg/config.toml").unwrap();
        assert_eq!(storage.name(), "file");
        assert!(matches!(
            storage.fetch_encoded_document(),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_create_unknown_storage() {
        assert!(matches!(
            create_storage("nonexistent_xyz", ""),
            Err(StorageError::Unknown(kind)) if kind == "nonexistent_xyz"
        ));
    }

    #[test]
    fn test_list_storages() {
        let kinds: Vec<_> = list_storages().into_iter().map(|(k, _)| k).collect();
        assert!(kinds.contains(&"memory".to_string()));
        assert!(kinds.contains(&"file".to_string()));
    }

    #[test]
    fn test_register_custom_storage() {
        register_storage(
            "test_custom_storage",
            "A test storage",
            Box::new(|location: &str| {
                let doc = format!("[custom]\nlocation = \"{}\"\n", location);
                Ok(Arc::new(FnStorage::new("custom", move || Ok(doc.clone().into_bytes()))) as SharedStorage)
            }),
        );

        assert!(has_storage("test_custom_storage"));
        let storage = create_storage("test_custom_storage", "vault://app").unwrap();
        assert_eq!(storage.name(), "custom");
        assert!(String::from_utf8(storage.fetch_encoded_document().unwrap())
            .unwrap()
            .contains("vault://app"));

        // Clean up
        assert!(unregister_storage("test_custom_storage"));
        assert!(!has_storage("test_custom_storage"));
    }
}
