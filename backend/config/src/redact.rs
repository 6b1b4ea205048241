//! Config redaction: produce safe-to-display config snapshots by masking secrets.

use serde_json::Value;

use crate::schema::LeafScanConfig;

/// Keys whose string values are secrets.
static SENSITIVE_KEYS: &[&str] = &[
    "apiKey",
    "api_key",
    "token",
    "accessToken",
    "secret",
    "password",
    "privateKey",
];

/// Redact a config JSON value, replacing sensitive strings with a short hint.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

/// Serialize and redact a typed config.
pub fn redacted_config(config: &LeafScanConfig) -> Value {
    redact(&serde_json::to_value(config).unwrap_or(Value::Null))
}

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_sensitive_key(key) && !s.is_empty() => {
            // Show the first 4 chars so keys can still be told apart.
            let hint = if s.chars().count() > 8 {
                format!("{}***", s.chars().take(4).collect::<String>())
            } else {
                "***".to_string()
            };
            Value::String(hint)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_recursive(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}
