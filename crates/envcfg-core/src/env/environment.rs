//! Decoded configuration document partitioned into namespaces

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{coerce_override, CodecError, Format, Table, Value};
use crate::error::{Error, Result};
use crate::overrides::{override_key, EnvOverrides, SharedOverrides, OVERRIDE_SEPARATOR};
use super::namespace::Namespace;

/// Configuration document decoded into namespaces
///
/// The tree is immutable once decoded. Overrides are not baked in: every
/// namespace lookup consults the override source again, so values set after
/// decoding are honored without re-parsing.
///
/// # Example
///
/// ```
/// use envcfg_core::env::Environment;
/// use envcfg_core::codec::Format;
/// use envcfg_core::overrides::MemoryOverrides;
/// use serde::Deserialize;
/// use std::sync::Arc;
///
/// #[derive(Deserialize)]
/// struct Mysql {
///     host: String,
///     port: String,
/// }
///
/// let data = "[mysql]\nhost = \"127.0.0.1\"\nport = \"3306\"\n";
/// let overrides = Arc::new(MemoryOverrides::new());
/// let env = Environment::decode_with(data.as_bytes(), Format::Toml, overrides.clone()).unwrap();
///
/// overrides.set("mysql.host", "localhost");
///
/// let mysql: Mysql = env.unmarshal_sub("mysql").unwrap();
/// assert_eq!(mysql.host, "localhost");
/// assert_eq!(mysql.port, "3306");
/// ```
#[derive(Clone)]
pub struct Environment {
    namespaces: BTreeMap<String, Table>,
    format: Format,
    overrides: SharedOverrides,
}

impl Environment {
    /// Decode a TOML document, using the process environment for overrides
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::decode_with(data, Format::Toml, Arc::new(EnvOverrides::new()))
    }

    /// Decode a document in `format` with an explicit override source
    ///
    /// Fails with `Error::Decode` on malformed input or when a top-level
    /// entry is not a table.
    pub fn decode_with(data: &[u8], format: Format, overrides: SharedOverrides) -> Result<Self> {
        let document = format.decode_document(data).map_err(Error::Decode)?;

        let mut namespaces = BTreeMap::new();
        for (name, value) in document {
            match value {
                Value::Table(table) => {
                    namespaces.insert(name, table);
                }
                _ => return Err(Error::Decode(CodecError::NotATable(name))),
            }
        }

        Ok(Self {
            namespaces,
            format,
            overrides,
        })
    }

    /// Replace the override source, keeping the decoded tree
    pub fn with_overrides(mut self, overrides: SharedOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn overrides(&self) -> &SharedOverrides {
        &self.overrides
    }

    /// Names of all namespaces, sorted
    pub fn namespace_names(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    pub fn contains_namespace(&self, name: &str) -> bool {
        self.namespaces.contains_key(name)
    }

    /// File-declared values of a namespace, without overrides
    pub fn raw_namespace(&self, name: &str) -> Option<&Table> {
        self.namespaces.get(name)
    }

    /// The whole decoded tree, without overrides
    pub fn namespaces(&self) -> &BTreeMap<String, Table> {
        &self.namespaces
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Look up a namespace with overrides applied
    ///
    /// For every key, an override at `<name>.<key>` wins over the declared
    /// value. Overrides for keys the document does not declare are added when
    /// the source can enumerate them.
    pub fn get_namespace(&self, name: &str) -> Result<Namespace> {
        let declared = self
            .namespaces
            .get(name)
            .ok_or_else(|| Error::NamespaceNotFound(name.to_string()))?;

        let mut values = declared.clone();
        for (key, value) in values.iter_mut() {
            if let Some(raw) = self.overrides.get(&override_key(name, key)) {
                *value = coerce_override(&raw, Some(&*value));
            }
        }

        let prefix = format!("{}{}", name, OVERRIDE_SEPARATOR);
        for (full_key, _) in self.overrides.scan(&prefix) {
            let Some(key) = full_key.strip_prefix(&prefix) else {
                continue;
            };
            if key.is_empty() || key.contains(OVERRIDE_SEPARATOR) || values.contains_key(key) {
                continue;
            }
            // scan only names the key; `get` decides which value wins
            if let Some(raw) = self.overrides.get(&full_key) {
                values.insert(key.to_string(), coerce_override(&raw, None));
            }
        }

        Ok(Namespace::new(name, values, self.format))
    }

    /// Look up a namespace and decode it into `T`
    pub fn unmarshal_sub<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        self.get_namespace(name)?.unmarshal()
    }

    /// Look up a namespace and decode it into an existing value
    ///
    /// `target` is untouched when the namespace is missing or decoding fails.
    pub fn unmarshal_sub_into<T>(&self, name: &str, target: &mut T) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
    {
        self.get_namespace(name)?.unmarshal_into(target)
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("namespaces", &self.namespaces.keys().collect::<Vec<_>>())
            .field("format", &self.format)
            .field("overrides", &self.overrides.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overrides::{ChainOverrides, MemoryOverrides, NoOverrides, OverrideSource};
    use serde::Deserialize;

    const MYSQL: &str = "[mysql]\nhost = \"127.0.0.1\"\nport = \"3306\"\n";

    #[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
    struct Mysql {
        host: String,
        port: String,
    }

    fn decode(data: &str) -> (Environment, Arc<MemoryOverrides>) {
        let overrides = Arc::new(MemoryOverrides::new());
        let env = Environment::decode_with(data.as_bytes(), Format::Toml, overrides.clone()).unwrap();
        (env, overrides)
    }

    #[test]
    fn test_decode_namespaces() {
        let (env, _) = decode("[a]\nx = 1\n[b]\ny = true\n[c]\n");
        assert_eq!(env.len(), 3);
        assert_eq!(env.namespace_names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert!(env.contains_namespace("c"));
        assert!(env.raw_namespace("c").unwrap().is_empty());
        assert_eq!(env.format(), Format::Toml);
    }

    #[test]
    fn test_decode_malformed() {
        let err = Environment::decode_with(b"[mysql\nhost=", Format::Toml, Arc::new(NoOverrides)).unwrap_err();
        assert!(matches!(err, Error::Decode(CodecError::TomlDe(_))));
    }

    #[test]
    fn test_decode_rejects_top_level_scalar() {
        let err = Environment::decode_with(b"title = \"x\"\n[a]\n", Format::Toml, Arc::new(NoOverrides)).unwrap_err();
        assert!(matches!(err, Error::Decode(CodecError::NotATable(ref key)) if key == "title"));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let (first, _) = decode(MYSQL);
        let (second, _) = decode(MYSQL);
        assert_eq!(first.namespaces(), second.namespaces());
    }

    #[test]
    fn test_decode_json_and_yaml() {
        let json = br#"{"mysql": {"host": "127.0.0.1", "port": "3306"}}"#;
        let yaml = b"mysql:\n  host: 127.0.0.1\n  port: \"3306\"\n";
        let (toml_env, _) = decode(MYSQL);

        for (data, format) in [(&json[..], Format::Json), (&yaml[..], Format::Yaml)] {
            let env = Environment::decode_with(data, format, Arc::new(NoOverrides)).unwrap();
            assert_eq!(env.namespaces(), toml_env.namespaces(), "{}", format);
        }
    }

    #[test]
    fn test_decode_yaml_bare_namespace() {
        let yaml = b"mysql:\nclient:\n  addr: db:3306\n";
        let overrides = Arc::new(MemoryOverrides::with_values([("mysql.host", "localhost")]));
        let env = Environment::decode_with(yaml, Format::Yaml, overrides).unwrap();

        assert!(env.raw_namespace("mysql").unwrap().is_empty());
        let ns = env.get_namespace("mysql").unwrap();
        assert_eq!(ns.get_str("host"), Some("localhost"));
    }

    #[test]
    fn test_get_namespace_without_overrides() {
        let (env, _) = decode(MYSQL);
        let ns = env.get_namespace("mysql").unwrap();
        assert_eq!(ns.get_str("host"), Some("127.0.0.1"));
        assert_eq!(ns.get_str("port"), Some("3306"));
        assert_eq!(ns.len(), 2);
    }

    #[test]
    fn test_override_precedence() {
        let (env, overrides) = decode(MYSQL);
        overrides.set("mysql.host", "localhost");

        let ns = env.get_namespace("mysql").unwrap();
        assert_eq!(ns.get_str("host"), Some("localhost"));
        assert_eq!(ns.get_str("port"), Some("3306"));
        assert!(!ns.contains_key("user"));

        // The tree itself is untouched
        assert_eq!(
            env.raw_namespace("mysql").unwrap().get("host").and_then(Value::as_str),
            Some("127.0.0.1")
        );
    }

    #[test]
    fn test_overrides_read_at_lookup_time() {
        let (env, overrides) = decode(MYSQL);
        assert_eq!(env.get_namespace("mysql").unwrap().get_str("host"), Some("127.0.0.1"));

        overrides.set("mysql.host", "localhost");
        assert_eq!(env.get_namespace("mysql").unwrap().get_str("host"), Some("localhost"));

        overrides.remove("mysql.host");
        assert_eq!(env.get_namespace("mysql").unwrap().get_str("host"), Some("127.0.0.1"));
    }

    #[test]
    fn test_override_undeclared_key() {
        let (env, overrides) = decode(MYSQL);
        overrides.set("mysql.user", "root");
        overrides.set("mysql.tls.ca", "ignored");
        overrides.set("mysqlx.host", "ignored");

        let ns = env.get_namespace("mysql").unwrap();
        assert_eq!(ns.get_str("user"), Some("root"));
        assert_eq!(ns.len(), 3);
    }

    #[test]
    fn test_undeclared_key_follows_chain_priority() {
        std::env::set_var("ENVCFG_CHAIN_MYSQL_USER", "from_env");

        let chain = ChainOverrides::new(vec![
            Arc::new(EnvOverrides::with_prefix("ENVCFG_CHAIN")),
            Arc::new(MemoryOverrides::with_values([("mysql.user", "from_memory")])),
        ]);
        let env = Environment::decode_with(MYSQL.as_bytes(), Format::Toml, Arc::new(chain)).unwrap();
        assert_eq!(env.get_namespace("mysql").unwrap().get_str("user"), Some("from_env"));

        std::env::remove_var("ENVCFG_CHAIN_MYSQL_USER");
        assert_eq!(env.get_namespace("mysql").unwrap().get_str("user"), Some("from_memory"));
    }

    /// Lists a key with a stale value; only `get` is authoritative
    struct StaleScan;

    impl OverrideSource for StaleScan {
        fn name(&self) -> &str {
            "stale"
        }

        fn get(&self, key: &str) -> Option<String> {
            (key == "mysql.user").then(|| "current".to_string())
        }

        fn scan(&self, _prefix: &str) -> Vec<(String, String)> {
            vec![("mysql.user".to_string(), "stale".to_string())]
        }
    }

    #[test]
    fn test_undeclared_key_value_comes_from_get() {
        let env = Environment::decode_with(MYSQL.as_bytes(), Format::Toml, Arc::new(StaleScan)).unwrap();
        assert_eq!(env.get_namespace("mysql").unwrap().get_str("user"), Some("current"));
    }

    #[test]
    fn test_override_is_coerced_to_declared_type() {
        #[derive(Debug, Deserialize)]
        struct Server {
            port: u16,
            debug: bool,
        }

        let (env, overrides) = decode("[server]\nport = 80\ndebug = false\n");
        overrides.set("server.port", "8080");
        overrides.set("server.debug", "true");

        let server: Server = env.unmarshal_sub("server").unwrap();
        assert_eq!(server.port, 8080);
        assert!(server.debug);

        overrides.set("server.port", "http");
        let err = env.unmarshal_sub::<Server>("server").unwrap_err();
        assert!(matches!(err, Error::Unmarshal { .. }));
    }

    #[test]
    fn test_namespace_not_found() {
        let (env, _) = decode(MYSQL);
        let err = env.get_namespace("redis").unwrap_err();
        assert!(matches!(err, Error::NamespaceNotFound(ref name) if name == "redis"));
    }

    #[test]
    fn test_unmarshal_sub() {
        let (env, overrides) = decode(MYSQL);
        overrides.set("mysql.host", "localhost");

        let cfg: Mysql = env.unmarshal_sub("mysql").unwrap();
        assert_eq!(cfg, Mysql { host: "localhost".to_string(), port: "3306".to_string() });

        overrides.set("mysql.host", "127.0.0.1");
        let mut cfg = Mysql::default();
        env.unmarshal_sub_into("mysql", &mut cfg).unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
    }

    #[test]
    fn test_unmarshal_sub_missing_leaves_target() {
        let (env, _) = decode(MYSQL);
        let mut cfg = Mysql { host: "keep".to_string(), port: "1".to_string() };

        let err = env.unmarshal_sub_into("redis", &mut cfg).unwrap_err();
        assert!(err.is_namespace_not_found());
        assert_eq!(cfg, Mysql { host: "keep".to_string(), port: "1".to_string() });
    }

    #[test]
    fn test_unmarshal_matches_direct_decode() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Pool {
            size: i64,
            ratio: f64,
            name: String,
            tags: Vec<String>,
        }

        let doc = "[pool]\nsize = 8\nratio = 0.75\nname = \"main\"\ntags = [\"a\", \"b\"]\n";
        let (env, _) = decode(doc);

        let via_env: Pool = env.unmarshal_sub("pool").unwrap();
        let direct: Pool = toml::from_str::<Table>(doc).unwrap()["pool"].clone().try_into().unwrap();
        assert_eq!(via_env, direct);
    }

    #[test]
    fn test_process_env_overrides() {
        std::env::set_var("envcfg_proc.host", "from-env");

        let env = Environment::decode(b"[envcfg_proc]\nhost = \"file\"\n").unwrap();
        assert_eq!(env.overrides().name(), "env");
        assert_eq!(env.get_namespace("envcfg_proc").unwrap().get_str("host"), Some("from-env"));

        std::env::remove_var("envcfg_proc.host");
        assert_eq!(env.get_namespace("envcfg_proc").unwrap().get_str("host"), Some("file"));
    }

    #[test]
    fn test_with_overrides() {
        let (env, _) = decode(MYSQL);
        let pinned = Arc::new(MemoryOverrides::with_values([("mysql.port", "4406")]));
        let env = env.with_overrides(pinned);
        assert_eq!(env.get_namespace("mysql").unwrap().get_str("port"), Some("4406"));
    }
}
