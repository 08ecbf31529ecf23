//! A single namespace with overrides applied

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{Format, Table, Value};
use crate::error::{Error, Result};

/// Flat key/value view of one namespace
///
/// Produced by [`Environment::get_namespace`](super::Environment::get_namespace);
/// values already reflect the overrides present at the time of the lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    name: String,
    values: Table,
    format: Format,
}

impl Namespace {
    pub(crate) fn new(name: impl Into<String>, values: Table, format: Format) -> Self {
        Self {
            name: name.into(),
            values,
            format,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Codec used by `unmarshal`
    pub fn format(&self) -> Format {
        self.format
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a value if it is a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_table(&self) -> &Table {
        &self.values
    }

    pub fn into_table(self) -> Table {
        self.values
    }

    /// Decode this namespace into a typed value
    ///
    /// The table is encoded with the environment's codec and the resulting
    /// bytes decoded into `T`, so overridden values go through the same
    /// conversion rules as file-declared ones. Fields bind to keys by their
    /// serde name (`#[serde(rename = "...")]`).
    pub fn unmarshal<T: DeserializeOwned>(&self) -> Result<T> {
        self.round_trip(&self.values)
    }

    /// Decode this namespace into an existing value
    ///
    /// Fields of `target` that no key binds to keep their current value.
    /// When `target` itself has no TOML form (a `u64` above `i64::MAX`, a
    /// `None` inside a list) the namespace alone must bind every field.
    /// `target` is left unmodified when decoding fails.
    pub fn unmarshal_into<T>(&self, target: &mut T) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut merged = match Value::try_from(&*target) {
            Ok(Value::Table(table)) => table,
            _ => Table::new(),
        };
        for (key, value) in &self.values {
            merged.insert(key.clone(), value.clone());
        }

        *target = self.round_trip(&merged)?;
        Ok(())
    }

    fn round_trip<T: DeserializeOwned>(&self, table: &Table) -> Result<T> {
        let bytes = self
            .format
            .encode(table)
            .map_err(|e| Error::unmarshal(&self.name, e))?;
        self.format
            .decode(&bytes)
            .map_err(|e| Error::unmarshal(&self.name, e))
    }
}

impl<'a> IntoIterator for &'a Namespace {
    type Item = (&'a String, &'a Value);
    type IntoIter = toml::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
    struct Mysql {
        host: String,
        #[serde(rename = "port")]
        port_number: u16,
        #[serde(default)]
        pool: Option<u32>,
    }

    fn mysql(format: Format) -> Namespace {
        let mut values = Table::new();
        values.insert("host".to_string(), Value::String("127.0.0.1".to_string()));
        values.insert("port".to_string(), Value::Integer(3306));
        Namespace::new("mysql", values, format)
    }

    #[test]
    fn test_namespace_accessors() {
        let ns = mysql(Format::Toml);
        assert_eq!(ns.name(), "mysql");
        assert_eq!(ns.len(), 2);
        assert_eq!(ns.get_str("host"), Some("127.0.0.1"));
        assert_eq!(ns.get_str("port"), None);
        assert_eq!(ns.get("port"), Some(&Value::Integer(3306)));
        assert!(ns.contains_key("host"));
        assert!(!ns.contains_key("user"));
        assert_eq!(ns.keys().collect::<Vec<_>>(), vec!["host", "port"]);
    }

    #[test]
    fn test_unmarshal_with_rename() {
        for format in [Format::Toml, Format::Json, Format::Yaml] {
            let cfg: Mysql = mysql(format).unmarshal().unwrap();
            assert_eq!(
                cfg,
                Mysql { host: "127.0.0.1".to_string(), port_number: 3306, pool: None },
                "{}",
                format
            );
        }
    }

    #[test]
    fn test_unmarshal_type_error() {
        let mut values = Table::new();
        values.insert("host".to_string(), Value::String("h".to_string()));
        values.insert("port".to_string(), Value::String("not-a-port".to_string()));
        let ns = Namespace::new("mysql", values, Format::Toml);

        let err = ns.unmarshal::<Mysql>().unwrap_err();
        assert!(matches!(err, Error::Unmarshal { ref namespace, .. } if namespace == "mysql"));
    }

    #[test]
    fn test_unmarshal_into_keeps_unbound_fields() {
        let mut values = Table::new();
        values.insert("host".to_string(), Value::String("db".to_string()));
        let ns = Namespace::new("mysql", values, Format::Toml);

        let mut cfg = Mysql { host: "old".to_string(), port_number: 3307, pool: Some(4) };
        ns.unmarshal_into(&mut cfg).unwrap();

        assert_eq!(cfg, Mysql { host: "db".to_string(), port_number: 3307, pool: Some(4) });
    }

    #[test]
    fn test_unmarshal_into_failure_leaves_target() {
        let mut values = Table::new();
        values.insert("port".to_string(), Value::Boolean(true));
        let ns = Namespace::new("mysql", values, Format::Toml);

        let mut cfg = Mysql { host: "old".to_string(), port_number: 1, pool: None };
        assert!(ns.unmarshal_into(&mut cfg).is_err());
        assert_eq!(cfg, Mysql { host: "old".to_string(), port_number: 1, pool: None });
    }

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Replicas {
        host: String,
        weights: Vec<Option<u32>>,
    }

    #[test]
    fn test_unmarshal_into_target_without_toml_form() {
        let mut values = Table::new();
        values.insert("host".to_string(), Value::String("db".to_string()));
        values.insert("weights".to_string(), Value::Array(vec![Value::Integer(2)]));
        let ns = Namespace::new("replicas", values, Format::Toml);

        let mut cfg = Replicas { host: "old".to_string(), weights: vec![None, Some(1)] };
        ns.unmarshal_into(&mut cfg).unwrap();
        assert_eq!(cfg, Replicas { host: "db".to_string(), weights: vec![Some(2)] });

        // With no usable base, an unbound field is a decode error
        let mut values = Table::new();
        values.insert("host".to_string(), Value::String("db".to_string()));
        let partial = Namespace::new("replicas", values, Format::Toml);

        let mut cfg = Replicas { host: "old".to_string(), weights: vec![None] };
        let err = partial.unmarshal_into(&mut cfg).unwrap_err();
        assert!(matches!(err, Error::Unmarshal { ref namespace, .. } if namespace == "replicas"));
        assert_eq!(cfg, Replicas { host: "old".to_string(), weights: vec![None] });
    }
}
