//! Config validation: checks with user-friendly error messages.

use crate::schema::LeafScanConfig;
use thiserror::Error;

/// Labels per request above this are unusual and slow the provider down.
const MAX_REASONABLE_LABELS: u32 = 50;

/// Cloud Vision rejects inline images above 20 MiB.
const PROVIDER_IMAGE_LIMIT: usize = 20 * 1024 * 1024;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &LeafScanConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_vision(config, &mut report);
    validate_upload(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_server(config: &LeafScanConfig, report: &mut ValidationReport) {
    let port = config.port();
    if port == 0 {
        report.warn("server.port", "Port 0 binds a random free port");
    } else if port < 1024 && port != 80 && port != 443 {
        report.warn(
            "server.port",
            format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
        );
    }
    if config.bind().trim().is_empty() {
        report.error("server.bind", "Bind address cannot be empty");
    }
}

fn validate_vision(config: &LeafScanConfig, report: &mut ValidationReport) {
    if config.vision_api_key().is_none() {
        report.error(
            "vision.apiKey",
            "Google Vision API key is required (set GOOGLE_VISION_API_KEY)",
        );
    }
    let base_url = config.vision_base_url();
    if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
        report.error("vision.baseUrl", format!("'{base_url}' is not an http(s) URL"));
    } else if base_url.starts_with("http://") {
        report.warn("vision.baseUrl", "Images will be sent without TLS");
    }
    let max_labels = config.max_labels();
    if max_labels == 0 {
        report.error("vision.maxLabels", "maxLabels must be > 0");
    } else if max_labels > MAX_REASONABLE_LABELS {
        report.warn(
            "vision.maxLabels",
            format!("maxLabels {max_labels} is above {MAX_REASONABLE_LABELS}"),
        );
    }
}

fn validate_upload(config: &LeafScanConfig, report: &mut ValidationReport) {
    let max_bytes = config.max_upload_bytes();
    if max_bytes == 0 {
        report.error("upload.maxBytes", "maxBytes must be > 0");
    } else if max_bytes > PROVIDER_IMAGE_LIMIT {
        report.warn(
            "upload.maxBytes",
            "Uploads above 20MB will be rejected by the vision provider",
        );
    }
}

fn validate_logging(config: &LeafScanConfig, report: &mut ValidationReport) {
    let level = config.log_level();
    // Directive strings like "leafscan=debug,tower_http=info" are passed through.
    if level.contains('=') || level.contains(',') {
        return;
    }
    if !matches!(
        level.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    ) {
        report.warn("logging.level", format!("Unknown log level '{level}'"));
    }
}
