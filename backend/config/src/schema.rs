//! leafscan configuration schema.
//!
//! Every field is optional on disk; [`crate::apply_all_defaults`] fills the
//! gaps and the accessor methods fall back to the same defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::defaults::{
    DEFAULT_BIND, DEFAULT_LOG_LEVEL, DEFAULT_MAX_LABELS, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT,
    DEFAULT_VISION_BASE_URL,
};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafScanConfig {
    /// HTTP listener
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    /// Vision provider credentials and request shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision: Option<VisionConfig>,

    /// Upload limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionConfig {
    /// Google Cloud Vision API key. Usually `${GOOGLE_VISION_API_KEY}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Labels requested per image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_labels: Option<u32>,
    /// Informational; requests are billed to the project owning the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling log files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// JSON console output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

impl LeafScanConfig {
    pub fn bind(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind.as_deref())
            .unwrap_or(DEFAULT_BIND)
    }

    pub fn port(&self) -> u16 {
        self.server.as_ref().and_then(|s| s.port).unwrap_or(DEFAULT_PORT)
    }

    /// `bind:port`, ready for `TcpListener::bind`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind(), self.port())
    }

    pub fn vision_api_key(&self) -> Option<&str> {
        self.vision
            .as_ref()
            .and_then(|v| v.api_key.as_deref())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn vision_base_url(&self) -> &str {
        self.vision
            .as_ref()
            .and_then(|v| v.base_url.as_deref())
            .unwrap_or(DEFAULT_VISION_BASE_URL)
    }

    pub fn max_labels(&self) -> u32 {
        self.vision
            .as_ref()
            .and_then(|v| v.max_labels)
            .unwrap_or(DEFAULT_MAX_LABELS)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.upload
            .as_ref()
            .and_then(|u| u.max_bytes)
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.logging
            .as_ref()
            .and_then(|l| l.dir.as_ref())
            .map(PathBuf::from)
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = r#"
server:
  port: 8081
vision:
  apiKey: abc
  maxLabels: 20
upload:
  maxBytes: 1048576
logging:
  level: debug
  json: true
"#;
        let config: LeafScanConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.port(), 8081);
        assert_eq!(config.vision_api_key(), Some("abc"));
        assert_eq!(config.max_labels(), 20);
        assert_eq!(config.max_upload_bytes(), 1_048_576);
        assert_eq!(config.log_level(), "debug");
        assert!(config.log_json());
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let config = LeafScanConfig::default();
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");
        assert_eq!(config.vision_api_key(), None);
        assert_eq!(config.vision_base_url(), "https://vision.googleapis.com");
        assert_eq!(config.max_upload_bytes(), 10 * 1024 * 1024);
        assert!(config.log_dir().is_none());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = LeafScanConfig {
            vision: Some(VisionConfig { api_key: Some("  ".into()), ..Default::default() }),
            ..Default::default()
        };
        assert_eq!(config.vision_api_key(), None);
    }
}
