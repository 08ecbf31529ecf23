//! Typed namespace service

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::container::{Container, Provider};
use crate::env::Environment;
use crate::error::Result;

/// Provides one namespace decoded into `T`
///
/// Created with [`ConfigService::section`](super::ConfigService::section).
/// The decoded value is cached per container, so every dependent sharing the
/// namespace receives the same instance. Errors from the environment (storage,
/// decode) and from unmarshalling are returned to the caller as they are.
pub struct SectionService<T> {
    namespace: Arc<str>,
    provider: Provider<T>,
}

impl<T> SectionService<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub(crate) fn new(environment: Provider<Environment>, namespace: impl Into<String>) -> Self {
        let namespace: Arc<str> = Arc::from(namespace.into());
        let provider = {
            let namespace = namespace.clone();
            Provider::new(format!("section:{}", namespace), move |ctn: &Container| {
                let env = environment.get(ctn)?;
                env.unmarshal_sub::<T>(&namespace)
            })
        };
        Self { namespace, provider }
    }

    /// Get the decoded section for `container`
    pub fn get(&self, container: &Container) -> Result<Arc<T>> {
        self.provider.get(container)
    }
}

impl<T> SectionService<T> {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The provider behind `get`, for wiring into other providers
    pub fn provider(&self) -> &Provider<T> {
        &self.provider
    }
}

impl<T> Clone for SectionService<T> {
    fn clone(&self) -> Self {
        Self {
            namespace: self.namespace.clone(),
            provider: self.provider.clone(),
        }
    }
}

impl<T> std::fmt::Debug for SectionService<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionService")
            .field("namespace", &self.namespace)
            .field("provider", &self.provider)
            .finish()
    }
}
