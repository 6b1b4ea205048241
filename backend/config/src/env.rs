//! Environment handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` references inside string values, resolved at load time.
//!   Only uppercase `[A-Z_][A-Z0-9_]*` names are matched; `$${VAR}` escapes
//!   to a literal `${VAR}`.
//! - Well-known variables (`PORT`, `GOOGLE_VISION_API_KEY`, ...) that
//!   override the corresponding config fields.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::{LeafScanConfig, LoggingConfig, ServerConfig, VisionConfig};

/// Matches `${VAR}` and the escaped form `$${VAR}`.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

pub const ENV_BIND: &str = "LEAFSCAN_BIND";
pub const ENV_PORT: &str = "PORT";
pub const ENV_VISION_API_KEY: &str = "GOOGLE_VISION_API_KEY";
pub const ENV_PROJECT_ID: &str = "GOOGLE_CLOUD_PROJECT_ID";
pub const ENV_LOG_LEVEL: &str = "RUST_LOG";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references in a config JSON value tree.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    substitute_value(value, &std::env::vars().collect(), "")
}

/// Substitute env vars using a provided map.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = ENV_VAR_PATTERN.replace_all(s, |caps: &Captures| {
        let var_name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{var_name}}}");
        }
        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// Apply well-known environment variables on top of the file config.
pub fn apply_env_overrides(config: LeafScanConfig) -> LeafScanConfig {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map.
pub fn apply_env_overrides_with(
    mut config: LeafScanConfig,
    env: &HashMap<String, String>,
) -> LeafScanConfig {
    let get = |name: &str| env.get(name).filter(|v| !v.trim().is_empty()).cloned();

    if let Some(bind) = get(ENV_BIND) {
        config.server.get_or_insert_with(ServerConfig::default).bind = Some(bind);
    }
    if let Some(port) = get(ENV_PORT).and_then(|p| p.parse::<u16>().ok()) {
        config.server.get_or_insert_with(ServerConfig::default).port = Some(port);
    }
    if let Some(key) = get(ENV_VISION_API_KEY) {
        config.vision.get_or_insert_with(VisionConfig::default).api_key = Some(key);
    }
    if let Some(project) = get(ENV_PROJECT_ID) {
        config.vision.get_or_insert_with(VisionConfig::default).project_id = Some(project);
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn substitutes_nested_var() {
        let v = json!({"vision": {"apiKey": "${GOOGLE_VISION_API_KEY}"}});
        let env = env(&[("GOOGLE_VISION_API_KEY", "AIza-test")]);
        let result = resolve_env_vars_with(&v, &env).unwrap();
        assert_eq!(result["vision"]["apiKey"], "AIza-test");
    }

    #[test]
    fn error_names_var_and_path() {
        let v = json!({"vision": {"apiKey": "${MISSING_VAR}"}});
        let err = resolve_env_vars_with(&v, &HashMap::new()).unwrap_err().to_string();
        assert!(err.contains("MISSING_VAR"));
        assert!(err.contains("vision.apiKey"));
    }

    #[test]
    fn escaped_reference_is_literal() {
        let v = json!({"note": "cost $${DOLLARS} for ${WHO}"});
        let result = resolve_env_vars_with(&v, &env(&[("WHO", "you")])).unwrap();
        assert_eq!(result["note"], "cost ${DOLLARS} for you");
    }

    #[test]
    fn passthrough_non_strings() {
        let v = json!({"server": {"port": 3000}, "tags": ["a", "b"]});
        assert_eq!(resolve_env_vars_with(&v, &HashMap::new()).unwrap(), v);
    }

    #[test]
    fn overrides_take_precedence() {
        let config = LeafScanConfig {
            server: Some(ServerConfig { bind: None, port: Some(3000) }),
            ..Default::default()
        };
        let config = apply_env_overrides_with(
            config,
            &env(&[("PORT", "8080"), ("GOOGLE_VISION_API_KEY", "k"), ("RUST_LOG", "debug")]),
        );
        assert_eq!(config.port(), 8080);
        assert_eq!(config.vision_api_key(), Some("k"));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn unparsable_port_is_ignored() {
        let config = apply_env_overrides_with(LeafScanConfig::default(), &env(&[("PORT", "http")]));
        assert!(config.server.is_none());
    }
}
