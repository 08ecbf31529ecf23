//! Process environment override source

use std::env;

use super::traits::{OverrideSource, OVERRIDE_SEPARATOR};

/// Override source that reads process environment variables
///
/// This source is read-only. The variable is looked up by the dotted key
/// itself (`mysql.host`). Shells that cannot export dotted names can use
/// `with_prefix`, which additionally checks the upper-snake form
/// (`APP_MYSQL_HOST` for prefix `APP`).
///
/// Empty variables are treated as unset.
///
/// # Example
///
/// ```
/// use envcfg_core::overrides::{OverrideSource, EnvOverrides};
///
/// std::env::set_var("APP_CLIENT_ADDR", "10.0.0.1:3306");
///
/// let source = EnvOverrides::with_prefix("APP");
/// assert_eq!(source.get("client.addr"), Some("10.0.0.1:3306".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    prefix: Option<String>,
}

impl EnvOverrides {
    /// Create a source reading dotted variable names only
    pub fn new() -> Self {
        Self { prefix: None }
    }

    /// Create a source that also reads `<PREFIX>_<NAMESPACE>_<KEY>` variables
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// The upper-snake variable name for a dotted key, if a prefix is set
    pub fn snake_var_name(&self, key: &str) -> Option<String> {
        self.prefix.as_ref().map(|prefix| {
            let tail: String = key
                .chars()
                .map(|c| match c {
                    '.' | '-' => '_',
                    c => c.to_ascii_uppercase(),
                })
                .collect();
            format!("{}_{}", prefix.to_uppercase(), tail)
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

impl OverrideSource for EnvOverrides {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = non_empty_var(key) {
            return Some(value);
        }

        self.snake_var_name(key).and_then(|name| non_empty_var(&name))
    }

    /// Only dotted variable names are enumerated; the snake form cannot be
    /// mapped back to a key unambiguously.
    fn scan(&self, prefix: &str) -> Vec<(String, String)> {
        env::vars_os()
            .filter_map(|(name, value)| {
                let name = name.into_string().ok()?;
                let value = value.into_string().ok()?;
                (name.starts_with(prefix) && name.contains(OVERRIDE_SEPARATOR) && !value.is_empty())
                    .then_some((name, value))
            })
            .collect()
    }
}
