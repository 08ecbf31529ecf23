//! Singleton provider cache
//!
//! A `Container` is one resolution scope: each `Provider`'s factory runs at
//! most once per container, and every later request gets the same `Arc`.

mod provider;
mod scope;

pub use provider::{Provider, ProviderId};
pub use scope::Container;
