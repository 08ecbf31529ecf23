//! Closure-backed storage for custom origins

use crate::codec::Format;
use super::traits::{Storage, StorageResult};

type FetchFn = Box<dyn Fn() -> StorageResult<Vec<u8>> + Send + Sync>;

/// Storage that delegates fetching to a closure
///
/// Use this for origins the crate does not ship (remote endpoints, secret
/// managers, embedded resources).
///
/// # Example
///
/// ```
/// use envcfg_core::storage::{Storage, FnStorage};
///
/// let storage = FnStorage::new("embedded", || Ok(b"[client]\naddr = \"db:3306\"\n".to_vec()));
/// assert_eq!(storage.name(), "embedded");
/// ```
pub struct FnStorage {
    name: String,
    format: Format,
    fetch: FetchFn,
}

impl FnStorage {
    /// Create a TOML storage backed by `fetch`
    pub fn new<F>(name: impl Into<String>, fetch: F) -> Self
    where
        F: Fn() -> StorageResult<Vec<u8>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            format: Format::Toml,
            fetch: Box::new(fetch),
        }
    }

    /// Set the encoding of the documents returned by the closure
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }
}

impl Storage for FnStorage {
    fn name(&self) -> &str {
        &self.name
    }

    fn format(&self) -> Format {
        self.format
    }

    fn fetch_encoded_document(&self) -> StorageResult<Vec<u8>> {
        (self.fetch)()
    }
}

// Implement Debug manually since the closure doesn't implement Debug
impl std::fmt::Debug for FnStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStorage")
            .field("name", &self.name)
            .field("format", &self.format)
            .finish()
    }
}
