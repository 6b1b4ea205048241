//! CLI Config Command
//!
//! Prints the effective configuration with secrets masked, followed by the
//! validation report.

use std::path::Path;

use anyhow::Result;
use leafscan_config::{redacted_config, validate, LeafScanConfig};

use crate::terminal_output::{note_error, note_info, note_success, note_warn};

pub fn run(config: &LeafScanConfig, path: &Path) -> Result<()> {
    note_info(&format!("Config file: {}", path.display()));
    println!("{}", serde_yaml::to_string(&redacted_config(config))?);

    let report = validate(config);
    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }
    if report.is_valid() {
        note_success("Configuration is valid");
    }
    Ok(())
}
