//! Resolution scope: the per-container singleton cache

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use parking_lot::{Condvar, Mutex};

use crate::error::{Error, Result};
use crate::logging::{NoOpLogger, SharedLogger};
use crate::{log_debug, log_error, log_warn};
use super::provider::{Provider, ProviderId};

type Cached = Arc<dyn Any + Send + Sync>;

/// State of one provider inside a container
enum Slot {
    /// A factory is running on the given thread
    Resolving(ThreadId),
    /// The factory succeeded; the value is shared from now on
    Resolved(Cached),
}

enum Lookup {
    Hit(Cached),
    Cycle,
    Claimed,
}

/// Everything guarded by the container lock
#[derive(Default)]
struct State {
    slots: HashMap<ProviderId, Slot>,
    /// Provider each blocked thread is waiting on
    waiting: HashMap<ThreadId, ProviderId>,
}

impl State {
    /// Whether blocking on a slot owned by `owner` would end up waiting on
    /// `current`, following owner -> awaited provider -> its owner.
    fn waits_on(&self, mut owner: ThreadId, current: ThreadId) -> bool {
        // Every hop goes through a distinct waiting thread
        for _ in 0..=self.waiting.len() {
            if owner == current {
                return true;
            }
            match self.waiting.get(&owner).and_then(|id| self.slots.get(id)) {
                Some(Slot::Resolving(next)) => owner = *next,
                _ => return false,
            }
        }
        false
    }
}

/// Cache of provider results, one value per provider identity
///
/// `get` is safe to call from many threads at once: the first caller runs the
/// factory while the others wait for it. A failed factory leaves nothing
/// behind, so the next call tries again. Asking for a provider from inside
/// its own factory (directly or through other providers) fails with
/// `Error::CyclicDependency` instead of deadlocking. This includes cycles
/// whose providers are being resolved on different threads: a caller that
/// would block on a thread already blocked on it gets the error instead.
///
/// # Example
///
/// ```
/// use envcfg_core::container::{Container, Provider};
/// use std::sync::Arc;
///
/// let answer = Provider::new("answer", |_| Ok(42u32));
/// let ctn = Container::new();
///
/// let first = answer.get(&ctn).unwrap();
/// let second = answer.get(&ctn).unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct Container {
    state: Mutex<State>,
    settled: Condvar,
    logger: SharedLogger,
}

impl Container {
    /// Create an empty container with a silent logger
    pub fn new() -> Self {
        Self::with_logger(Arc::new(NoOpLogger))
    }

    /// Create an empty container that reports resolution through `logger`
    pub fn with_logger(logger: SharedLogger) -> Self {
        Self {
            state: Mutex::new(State::default()),
            settled: Condvar::new(),
            logger,
        }
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    /// Resolve a provider, running its factory at most once
    ///
    /// Errors from the factory are returned unchanged and not cached.
    pub fn get<T: Send + Sync + 'static>(&self, provider: &Provider<T>) -> Result<Arc<T>> {
        let id = provider.id();
        let current = thread::current().id();

        let lookup = {
            let mut state = self.state.lock();
            loop {
                match state.slots.get(&id) {
                    Some(Slot::Resolved(value)) => break Lookup::Hit(value.clone()),
                    Some(Slot::Resolving(owner)) => {
                        let owner = *owner;
                        if state.waits_on(owner, current) {
                            break Lookup::Cycle;
                        }
                        state.waiting.insert(current, id);
                        self.settled.wait(&mut state);
                        state.waiting.remove(&current);
                    }
                    None => {
                        state.slots.insert(id, Slot::Resolving(current));
                        break Lookup::Claimed;
                    }
                }
            }
        };

        match lookup {
            Lookup::Hit(value) => return downcast(provider, value),
            Lookup::Cycle => {
                log_error!(self.logger, "cyclic dependency on provider '{}' ({})", provider.name(), id);
                return Err(Error::CyclicDependency {
                    provider: provider.name().to_string(),
                });
            }
            Lookup::Claimed => {}
        }

        log_debug!(self.logger, "resolving provider '{}' ({})", provider.name(), id);
        let mut claim = Claim {
            container: self,
            id,
            value: None,
        };

        match provider.create(self) {
            Ok(value) => {
                let value = Arc::new(value);
                claim.value = Some(value.clone() as Cached);
                drop(claim);
                log_debug!(self.logger, "provider '{}' ({}) resolved", provider.name(), id);
                Ok(value)
            }
            Err(err) => {
                drop(claim);
                log_warn!(self.logger, "provider '{}' ({}) failed: {}", provider.name(), id, err);
                Err(err)
            }
        }
    }

    /// Whether a provider has a cached value in this container
    pub fn is_resolved<T>(&self, provider: &Provider<T>) -> bool {
        matches!(self.state.lock().slots.get(&provider.id()), Some(Slot::Resolved(_)))
    }

    /// Drop the cached value of a provider so the next `get` runs its factory
    ///
    /// A factory that is currently running is not affected.
    pub fn evict<T>(&self, provider: &Provider<T>) -> bool {
        let mut state = self.state.lock();
        if matches!(state.slots.get(&provider.id()), Some(Slot::Resolved(_))) {
            state.slots.remove(&provider.id());
            true
        } else {
            false
        }
    }

    /// Drop every cached value; running factories are not affected
    pub fn clear(&self) {
        self.state
            .lock()
            .slots
            .retain(|_, slot| matches!(slot, Slot::Resolving(_)));
    }

    /// Number of cached values
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .slots
            .values()
            .filter(|slot| matches!(slot, Slot::Resolved(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("resolved", &self.len())
            .finish()
    }
}

fn downcast<T: Send + Sync + 'static>(provider: &Provider<T>, value: Cached) -> Result<Arc<T>> {
    value.downcast::<T>().map_err(|_| Error::TypeMismatch {
        provider: provider.name().to_string(),
    })
}

/// Ownership of a `Resolving` slot
///
/// Dropping it publishes the value, or clears the slot when there is none
/// (factory error or panic), and wakes every waiting caller.
struct Claim<'a> {
    container: &'a Container,
    id: ProviderId,
    value: Option<Cached>,
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        let mut state = self.container.state.lock();
        match self.value.take() {
            Some(value) => {
                state.slots.insert(self.id, Slot::Resolved(value));
            }
            None => {
                state.slots.remove(&self.id);
            }
        }
        drop(state);
        self.container.settled.notify_all();
    }
}
