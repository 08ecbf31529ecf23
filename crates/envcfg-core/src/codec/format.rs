//! Document formats understood by the codec adapter

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{CodecError, CodecResult};
use super::Table;

/// Encoding of a configuration document
///
/// # Example
///
/// ```
/// use envcfg_core::codec::{Format, Table};
///
/// let table: Table = Format::Toml.decode(b"[mysql]\nhost = \"127.0.0.1\"\n").unwrap();
/// assert!(table.contains_key("mysql"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// TOML (default)
    #[default]
    Toml,
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Toml => "toml",
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }

    /// Parse a format name or file extension, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "toml" => Some(Format::Toml),
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    /// Guess the format from a file extension, falling back to TOML
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
            .unwrap_or_default()
    }

    /// Decode raw bytes into any deserializable type
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> CodecResult<T> {
        match self {
            Format::Toml => {
                let text = std::str::from_utf8(bytes)?;
                Ok(toml::from_str(text)?)
            }
            Format::Json => Ok(serde_json::from_slice(bytes)?),
            Format::Yaml => Ok(serde_yaml::from_slice(bytes)?),
        }
    }

    /// Encode any serializable value
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> CodecResult<Vec<u8>> {
        match self {
            Format::Toml => Ok(toml::to_string(value)?.into_bytes()),
            Format::Json => Ok(serde_json::to_vec_pretty(value)?),
            Format::Yaml => Ok(serde_yaml::to_string(value)?.into_bytes()),
        }
    }

    /// Decode a whole document into its top-level table
    ///
    /// A blank document is an empty table in every format. JSON and YAML
    /// nulls have no TOML counterpart: a null namespace (`mysql:` in YAML)
    /// becomes an empty table and any other null is treated as absent.
    /// Integers outside the `i64` range are rejected.
    pub fn decode_document(&self, bytes: &[u8]) -> CodecResult<Table> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Table::new());
        }
        match self {
            Format::Toml => self.decode(bytes),
            Format::Json => {
                let document: serde_json::Value = serde_json::from_slice(bytes)?;
                Ok(serde_json::from_value(json_namespaces(document))?)
            }
            Format::Yaml => {
                let document: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
                Ok(serde_yaml::from_value(yaml_namespaces(document))?)
            }
        }
    }
}

fn json_namespaces(document: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match document {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(name, value)| match value {
                    Value::Null => (name, Value::Object(Default::default())),
                    value => (name, drop_json_nulls(value)),
                })
                .collect(),
        ),
        other => other,
    }
}

fn drop_json_nulls(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, drop_json_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items.into_iter()
                .filter(|v| !v.is_null())
                .map(drop_json_nulls)
                .collect(),
        ),
        other => other,
    }
}

fn yaml_namespaces(document: serde_yaml::Value) -> serde_yaml::Value {
    use serde_yaml::Value;

    match document {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(name, value)| match value {
                    Value::Null => (name, Value::Mapping(Default::default())),
                    value => (name, drop_yaml_nulls(value)),
                })
                .collect(),
        ),
        other => other,
    }
}

fn drop_yaml_nulls(value: serde_yaml::Value) -> serde_yaml::Value {
    use serde_yaml::Value;

    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, drop_yaml_nulls(v)))
                .collect(),
        ),
        Value::Sequence(items) => Value::Sequence(
            items.into_iter()
                .filter(|v| !v.is_null())
                .map(drop_yaml_nulls)
                .collect(),
        ),
        other => other,
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
