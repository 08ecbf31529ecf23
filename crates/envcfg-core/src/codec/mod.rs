//! Codec adapter for structured configuration documents
//!
//! Every supported format decodes into the same generic tree (`toml::Value`
//! tables), so the environment store never depends on the on-disk format:
//! - `Format::Toml`: the default document format
//! - `Format::Json` and `Format::Yaml`: alternative encodings of the same tree

mod error;
mod format;
mod coerce;

pub use error::{CodecError, CodecResult};
pub use format::Format;
pub use coerce::coerce_override;

/// A single configuration value
pub type Value = toml::Value;

/// A table of key/value pairs (one namespace, or a whole document)
pub type Table = toml::Table;
