//! envcfg Core
//!
//! Namespaced application configuration with runtime overrides, exposed as
//! lazily-built singletons through a small dependency container.
//!
//! ## Resolution flow
//!
//! 1. A `Storage` supplies the encoded document (memory, file, custom origin)
//! 2. The codec decodes it into an `Environment` of namespaces
//! 3. `Environment::get_namespace` applies overrides (`namespace.key`) at read time
//! 4. `Namespace::unmarshal` re-encodes the namespace and decodes it into your type
//!
//! `ConfigService` and `SectionService` wrap steps 1–4 in `Provider`s so each
//! `Container` fetches and decodes at most once.
//!
//! ```rust
//! use envcfg_core::{Container, ConfigService, MemoryOverrides, MemoryStorage};
//! use serde::Deserialize;
//! use std::sync::Arc;
//!
//! #[derive(Deserialize)]
//! struct Mysql {
//!     host: String,
//!     port: String,
//! }
//!
//! let overrides = Arc::new(MemoryOverrides::new());
//! let config = ConfigService::with_overrides(
//!     Arc::new(MemoryStorage::new("[mysql]\nhost = \"127.0.0.1\"\nport = \"3306\"\n")),
//!     overrides.clone(),
//! );
//! overrides.set("mysql.host", "localhost");
//!
//! let ctn = Container::new();
//! let mysql = config.section::<Mysql>("mysql").get(&ctn).unwrap();
//! assert_eq!(mysql.host, "localhost");
//! assert_eq!(mysql.port, "3306");
//! ```

pub mod error;
pub mod codec;
pub mod storage;
pub mod overrides;
pub mod env;
pub mod container;
pub mod service;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};

pub use codec::{Format, CodecError, Table, Value};

pub use storage::{
    Storage, StorageError, StorageResult, SharedStorage,
    MemoryStorage, FileStorage, FnStorage,
    register_storage, create_storage, list_storages,
};

pub use overrides::{
    OverrideSource, SharedOverrides,
    EnvOverrides, MemoryOverrides, ChainOverrides, NoOverrides,
};

pub use env::{Environment, Namespace};

pub use container::{Container, Provider, ProviderId};

pub use service::{ConfigService, SectionService};

pub use logging::{Logger, SharedLogger, NoOpLogger, ConsoleLogger, TracingLogger};
