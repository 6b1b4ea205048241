//! Config file location and loading.

use crate::schema::LeafScanConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the leafscan config directory.
/// Priority: `LEAFSCAN_CONFIG_DIR` env > `~/.leafscan/` > `./.leafscan`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LEAFSCAN_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".leafscan"),
        None => PathBuf::from(".leafscan"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist.
pub async fn load_config(path: &Path) -> Result<LeafScanConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(LeafScanConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty file parses as YAML null.
    if raw.trim().is_empty() {
        return Ok(LeafScanConfig::default());
    }

    let config: LeafScanConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("nope.yaml")).await.unwrap();
        assert_eq!(config, LeafScanConfig::default());
    }

    #[tokio::test]
    async fn loads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "server:\n  port: 4000\nupload:\n  maxBytes: 2048\n").unwrap();
        let config = load_config(&path).await.unwrap();
        assert_eq!(config.port(), 4000);
        assert_eq!(config.max_upload_bytes(), 2048);
    }

    #[tokio::test]
    async fn empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(load_config(&path).await.unwrap(), LeafScanConfig::default());
    }

    #[tokio::test]
    async fn malformed_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "server: [unclosed").unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config YAML"));
    }
}
