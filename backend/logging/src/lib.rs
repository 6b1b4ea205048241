//! Structured logging for leafscan.
//!
//! Handles subscriber setup (console, JSON, rolling file), secret redaction,
//! and the per-analysis event record.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{AnalysisEvent, AnalysisLogger, AnalysisOutcome};
pub use logger::{init_logger, LogGuard, LogSettings};
pub use redact::redact_sensitive_data;
