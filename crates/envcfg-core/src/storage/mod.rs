//! Storage abstractions for encoded configuration documents
//!
//! Supports multiple origins behind one capability:
//! - `MemoryStorage`: a literal document held in memory
//! - `FileStorage`: a document on disk (user, workspace or explicit path)
//! - `FnStorage`: any custom origin backed by a closure
//! - A registry for creating storages by kind and location

mod traits;
mod memory;
mod file;
mod func;
mod registry;

pub use traits::{Storage, StorageError, StorageResult, SharedStorage};
pub use memory::MemoryStorage;
pub use file::FileStorage;
pub use func::FnStorage;
pub use registry::{
    register_storage, create_storage, list_storages, has_storage, unregister_storage,
    StorageDefinition, StorageFactory,
};
