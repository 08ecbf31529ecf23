//! Crate-wide error type

use thiserror::Error;

use crate::codec::CodecError;
use crate::storage::StorageError;

/// Errors that can occur while resolving configuration
///
/// Every collaborator error is passed through unchanged; nothing in this
/// crate retries or swallows a failure.
#[derive(Error, Debug)]
pub enum Error {
    /// The encoded document could not be parsed
    #[error("Failed to decode configuration: {0}")]
    Decode(#[source] CodecError),

    /// The requested namespace is not present in the document
    #[error("Namespace not found: {0}")]
    NamespaceNotFound(String),

    /// A namespace could not be converted into the destination type
    #[error("Failed to unmarshal namespace '{namespace}': {source}")]
    Unmarshal {
        namespace: String,
        #[source]
        source: CodecError,
    },

    /// The storage backend could not supply the document
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A provider was requested again while its own factory was running
    #[error("Cyclic dependency detected while resolving provider '{provider}'")]
    CyclicDependency { provider: String },

    /// A cached value did not have the type its provider declares
    #[error("Cached value for provider '{provider}' has an unexpected type")]
    TypeMismatch { provider: String },

    /// Failure reported by a user-supplied factory
    #[error("{0}")]
    Provider(String),
}

impl Error {
    /// Create an unmarshal error for a namespace
    pub fn unmarshal(namespace: impl Into<String>, source: CodecError) -> Self {
        Self::Unmarshal {
            namespace: namespace.into(),
            source,
        }
    }

    /// Create a provider error from any message
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    /// Whether this is a missing-namespace error
    pub fn is_namespace_not_found(&self) -> bool {
        matches!(self, Self::NamespaceNotFound(_))
    }

    /// Whether this is a cycle detected by the container
    pub fn is_cyclic_dependency(&self) -> bool {
        matches!(self, Self::CyclicDependency { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
