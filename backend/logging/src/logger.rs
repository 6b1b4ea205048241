//! Structured Logger
//!
//! Wraps `tracing` with a console layer, optional JSON formatting, and an
//! optional daily-rotated NDJSON file.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Logger options, usually taken from the `logging` config section.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    /// Write JSON lines to stderr instead of human-readable text.
    pub json: bool,
    /// Directory for `leafscan.log.YYYY-MM-DD`; no file output when `None`.
    pub dir: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false, dir: None }
    }
}

/// Keeps the background file writer alive; drop it at shutdown to flush.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize the global structured logger.
///
/// Calling it twice is harmless: the second subscriber is ignored.
pub fn init_logger(settings: &LogSettings) -> LogGuard {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let console_layer = if settings.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
            .boxed()
    };

    let (file_layer, guard) = match &settings.dir {
        Some(dir) => {
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "leafscan.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    LogGuard { _file: guard }
}
