//! Providers and their identities

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::Result;
use super::scope::Container;

static NEXT_PROVIDER_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a provider
///
/// Allocated once per `Provider::new`; clones of a provider share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProviderId(u64);

impl ProviderId {
    fn next() -> Self {
        Self(NEXT_PROVIDER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) type Factory<T> = Arc<dyn Fn(&Container) -> Result<T> + Send + Sync>;

/// A named factory whose result is cached per container
///
/// The factory receives the container so it can resolve its own
/// dependencies through other providers.
///
/// # Example
///
/// ```
/// use envcfg_core::container::{Container, Provider};
///
/// let greeting = Provider::new("greeting", |_| Ok(String::from("hello")));
/// let shout = {
///     let greeting = greeting.clone();
///     Provider::new("shout", move |ctn| Ok(greeting.get(ctn)?.to_uppercase()))
/// };
///
/// let ctn = Container::new();
/// assert_eq!(*shout.get(&ctn).unwrap(), "HELLO");
/// ```
pub struct Provider<T> {
    id: ProviderId,
    name: Arc<str>,
    factory: Factory<T>,
}

impl<T: Send + Sync + 'static> Provider<T> {
    /// Create a provider with a fresh identity
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
    {
        let name: String = name.into();
        Self {
            id: ProviderId::next(),
            name: Arc::from(name),
            factory: Arc::new(factory),
        }
    }

    /// Resolve this provider in `container`
    pub fn get(&self, container: &Container) -> Result<Arc<T>> {
        container.get(self)
    }
}

impl<T> Provider<T> {
    pub fn id(&self) -> ProviderId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn create(&self, container: &Container) -> Result<T> {
        (self.factory)(container)
    }
}

impl<T> Clone for Provider<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            factory: self.factory.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}
