//! `leafscan-config`: runtime configuration for the leafscan service.
//!
//! Provides:
//! - Typed config schema (server, vision provider, upload limits, logging)
//! - YAML loading from the config directory
//! - `${ENV_VAR}` substitution and environment overrides
//! - Default value application
//! - Validation with errors and warnings
//! - Secret redaction for display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{
    apply_env_overrides, apply_env_overrides_with, resolve_env_vars, resolve_env_vars_with,
    MissingEnvVarError,
};
pub use io::{config_dir, config_file_path, load_config};
pub use redact::{redact, redacted_config};
pub use schema::{LeafScanConfig, LoggingConfig, ServerConfig, UploadConfig, VisionConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load a config file, substitute env vars, apply env overrides and defaults.
///
/// This is the main entry point for loading a config at runtime. Validation
/// problems are logged; callers decide whether they are fatal.
pub async fn load_and_prepare(path: &Path) -> Result<LeafScanConfig> {
    let raw_config = load_config(path).await?;

    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;
    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;
    let config: LeafScanConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides(config);
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }

    Ok(config)
}
