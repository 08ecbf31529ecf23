//! Environment store: namespaced configuration with read-time overrides

mod environment;
mod namespace;

pub use environment::Environment;
pub use namespace::Namespace;
