//! Override sources consulted when a namespace is read
//!
//! This module provides pluggable key/value override lookup with:
//! - `OverrideSource` trait for implementing custom sources
//! - Built-in implementations: `EnvOverrides`, `MemoryOverrides`, `ChainOverrides`, `NoOverrides`
//!
//! Keys are `<namespace>.<key>`, e.g. `mysql.host`.

mod traits;
mod env_source;
mod memory_source;
mod chain_source;

pub use traits::{OverrideSource, SharedOverrides, NoOverrides, override_key, OVERRIDE_SEPARATOR};
pub use env_source::EnvOverrides;
pub use memory_source::MemoryOverrides;
pub use chain_source::ChainOverrides;
