//! Coercion of string overrides into typed values

use super::Value;

/// Convert a raw override string into a value shaped like the declared one
///
/// Overrides always arrive as strings. When the document declares the key as
/// an integer, float, boolean or datetime and the string parses as that type,
/// the parsed value is used; otherwise the override stays a string and any
/// mismatch is reported when the namespace is unmarshalled.
pub fn coerce_override(raw: &str, declared: Option<&Value>) -> Value {
    let parsed = match declared {
        Some(Value::Integer(_)) => raw.trim().parse::<i64>().ok().map(Value::Integer),
        Some(Value::Float(_)) => raw.trim().parse::<f64>().ok().map(Value::Float),
        Some(Value::Boolean(_)) => raw.trim().parse::<bool>().ok().map(Value::Boolean),
        Some(Value::Datetime(_)) => raw.trim().parse().ok().map(Value::Datetime),
        _ => None,
    };
    parsed.unwrap_or_else(|| Value::String(raw.to_string()))
}
