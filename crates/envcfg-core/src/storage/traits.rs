//! Storage trait

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::codec::Format;

/// Errors that can occur while fetching an encoded document
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown storage kind: {0}")]
    Unknown(String),

    #[error("Storage error: {0}")]
    Other(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Origin of an encoded configuration document
///
/// Implementations:
/// - `MemoryStorage`: literal bytes supplied at construction
/// - `FileStorage`: reads a file on every fetch
/// - `FnStorage`: delegates to a closure (remote source, secrets manager, ...)
///
/// The environment store never knows where the bytes came from.
pub trait Storage: Send + Sync {
    /// Human-readable name of this storage
    fn name(&self) -> &str;

    /// Encoding of the document this storage returns
    fn format(&self) -> Format {
        Format::Toml
    }

    /// Fetch the raw encoded document
    fn fetch_encoded_document(&self) -> StorageResult<Vec<u8>>;
}

/// Type alias for an Arc-wrapped storage
pub type SharedStorage = Arc<dyn Storage>;
