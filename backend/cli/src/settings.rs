use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use leafscan_config::{
    config_dir, config_file_path, load_and_prepare, validate, ConfigValidationError,
    LeafScanConfig,
};
use leafscan_logging::LogSettings;

/// Resolve the config path: explicit `--config` or the default config dir.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config_file_path(&config_dir()))
}

/// Load, substitute, override, and default the runtime config.
pub async fn load(explicit: Option<&Path>) -> Result<LeafScanConfig> {
    load_and_prepare(&config_path(explicit)).await
}

pub fn log_settings(config: &LeafScanConfig) -> LogSettings {
    LogSettings {
        level: config.log_level().to_string(),
        json: config.log_json(),
        dir: config.log_dir(),
    }
}

/// Validate the config before `serve`.
///
/// Returns the warning lines to show the operator; any validation error
/// aborts startup with every error listed.
pub fn serve_preflight(config: &LeafScanConfig) -> Result<Vec<String>> {
    let report = validate(config);
    if !report.is_valid() {
        bail!(
            "invalid configuration: {}; run `leafscan config` for details",
            issue_lines(&report.errors).join("; ")
        );
    }
    Ok(issue_lines(&report.warnings))
}

fn issue_lines(issues: &[ConfigValidationError]) -> Vec<String> {
    issues.iter().map(|i| format!("{}: {}", i.path, i.message)).collect()
}
