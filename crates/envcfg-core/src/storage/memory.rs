//! In-memory document storage

use crate::codec::Format;
use super::traits::{Storage, StorageResult};

/// Storage holding a literal document
///
/// Never fails; every fetch returns a copy of the bytes given at construction.
///
/// # Example
///
/// ```
/// use envcfg_core::storage::{Storage, MemoryStorage};
///
/// let storage = MemoryStorage::new("[client]\naddr = \"127.0.0.1:3306\"\n");
/// assert!(storage.fetch_encoded_document().unwrap().starts_with(b"[client]"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Vec<u8>,
    format: Format,
}

impl MemoryStorage {
    /// Create a TOML memory storage
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            format: Format::Toml,
        }
    }

    /// Set the encoding of the held document
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Size of the held document in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn format(&self) -> Format {
        self.format
    }

    fn fetch_encoded_document(&self) -> StorageResult<Vec<u8>> {
        Ok(self.data.clone())
    }
}
