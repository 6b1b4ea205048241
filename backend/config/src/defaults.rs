//! Config defaults: applies default values to a parsed config.

use crate::schema::{LeafScanConfig, LoggingConfig, ServerConfig, UploadConfig, VisionConfig};

pub const DEFAULT_BIND: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 3000;

pub use leafscan_media::DEFAULT_MAX_UPLOAD_BYTES;
pub use leafscan_understanding::{DEFAULT_BASE_URL as DEFAULT_VISION_BASE_URL, DEFAULT_MAX_LABELS};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: LeafScanConfig) -> LeafScanConfig {
    let config = apply_server_defaults(config);
    let config = apply_vision_defaults(config);
    let config = apply_upload_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: LeafScanConfig) -> LeafScanConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    server.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    config
}

/// The API key is never defaulted; validation reports it instead.
fn apply_vision_defaults(mut config: LeafScanConfig) -> LeafScanConfig {
    let vision = config.vision.get_or_insert_with(VisionConfig::default);
    vision
        .base_url
        .get_or_insert_with(|| DEFAULT_VISION_BASE_URL.to_string());
    vision.max_labels.get_or_insert(DEFAULT_MAX_LABELS);
    config
}

fn apply_upload_defaults(mut config: LeafScanConfig) -> LeafScanConfig {
    let upload = config.upload.get_or_insert_with(UploadConfig::default);
    upload.max_bytes.get_or_insert(DEFAULT_MAX_UPLOAD_BYTES);
    config
}

fn apply_logging_defaults(mut config: LeafScanConfig) -> LeafScanConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging
        .level
        .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.json.get_or_insert(false);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_section() {
        let config = apply_all_defaults(LeafScanConfig::default());
        assert_eq!(config.server.as_ref().unwrap().port, Some(DEFAULT_PORT));
        assert_eq!(config.vision.as_ref().unwrap().max_labels, Some(DEFAULT_MAX_LABELS));
        assert_eq!(config.vision.as_ref().unwrap().api_key, None);
        assert_eq!(config.upload.as_ref().unwrap().max_bytes, Some(DEFAULT_MAX_UPLOAD_BYTES));
        assert_eq!(config.logging.as_ref().unwrap().level.as_deref(), Some("info"));
    }

    #[test]
    fn keeps_explicit_values() {
        let config = LeafScanConfig {
            server: Some(ServerConfig { bind: None, port: Some(9000) }),
            ..Default::default()
        };
        let config = apply_all_defaults(config);
        assert_eq!(config.port(), 9000);
        assert_eq!(config.bind(), DEFAULT_BIND);
    }
}
