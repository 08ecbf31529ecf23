//! Environment singleton service

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::container::{Container, Provider};
use crate::env::Environment;
use crate::error::Result;
use crate::logging::{NoOpLogger, SharedLogger};
use crate::overrides::{EnvOverrides, SharedOverrides};
use crate::storage::{create_storage, MemoryStorage, SharedStorage};
use crate::{log_debug, log_info};
use super::section::SectionService;

/// Provides the decoded configuration environment
///
/// Storage is fetched and decoded the first time `get` is called for a
/// container; afterwards every caller in that container shares the same
/// `Environment`. Overrides are still read on each namespace lookup.
///
/// # Example
///
/// ```
/// use envcfg_core::container::Container;
/// use envcfg_core::service::ConfigService;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Client {
///     addr: String,
/// }
///
/// let config = ConfigService::memory("[client]\naddr = \"127.0.0.1:3306\"\n");
/// let client = config.section::<Client>("client");
///
/// let ctn = Container::new();
/// assert_eq!(client.get(&ctn).unwrap().addr, "127.0.0.1:3306");
/// ```
#[derive(Clone)]
pub struct ConfigService {
    storage: SharedStorage,
    overrides: SharedOverrides,
    provider: Provider<Environment>,
}

impl ConfigService {
    /// Create a service reading `storage`, overridden by the process environment
    pub fn new(storage: SharedStorage) -> Self {
        Self::with_overrides(storage, Arc::new(EnvOverrides::new()))
    }

    /// Create a service with an explicit override source
    pub fn with_overrides(storage: SharedStorage, overrides: SharedOverrides) -> Self {
        Self::build(storage, overrides, Arc::new(NoOpLogger))
    }

    /// Create a service over a literal TOML document
    pub fn memory(document: impl Into<Vec<u8>>) -> Self {
        Self::new(Arc::new(MemoryStorage::new(document)))
    }

    /// Create a service over a registered storage kind (`"file"`, `"memory"`, ...)
    pub fn open(kind: &str, location: &str) -> Result<Self> {
        Ok(Self::new(create_storage(kind, location)?))
    }

    /// Rebuild the service with a logger for fetch and decode messages
    ///
    /// The returned service has a new provider identity.
    pub fn with_logger(self, logger: SharedLogger) -> Self {
        Self::build(self.storage, self.overrides, logger)
    }

    fn build(storage: SharedStorage, overrides: SharedOverrides, logger: SharedLogger) -> Self {
        let provider = {
            let storage = storage.clone();
            let overrides = overrides.clone();
            Provider::new("environment", move |_: &Container| {
                log_debug!(logger, "fetching configuration from '{}' storage", storage.name());
                let data = storage.fetch_encoded_document()?;
                let env = Environment::decode_with(&data, storage.format(), overrides.clone())?;
                log_info!(
                    logger,
                    "decoded {} namespace(s) from '{}' storage ({})",
                    env.len(),
                    storage.name(),
                    storage.format()
                );
                Ok(env)
            })
        };

        Self {
            storage,
            overrides,
            provider,
        }
    }

    /// Get the environment singleton for `container`
    pub fn get(&self, container: &Container) -> Result<Arc<Environment>> {
        self.provider.get(container)
    }

    /// The provider behind `get`, for wiring into other providers
    pub fn provider(&self) -> &Provider<Environment> {
        &self.provider
    }

    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    pub fn overrides(&self) -> &SharedOverrides {
        &self.overrides
    }

    /// A service providing namespace `namespace` decoded into `T`
    pub fn section<T>(&self, namespace: impl Into<String>) -> SectionService<T>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        SectionService::new(self.provider.clone(), namespace)
    }
}

impl std::fmt::Debug for ConfigService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigService")
            .field("storage", &self.storage.name())
            .field("overrides", &self.overrides.name())
            .field("provider", &self.provider)
            .finish()
    }
}
