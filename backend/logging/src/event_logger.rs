//! Analysis Event Logger
//!
//! One structured record per analyzed photo, emitted on the `leaf_analysis`
//! tracing target.

use chrono::{DateTime, Utc};
use leafscan_core::{AnalysisResult, VerdictCategory};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Classified {
        verdict: VerdictCategory,
        confidence: u8,
        relevant_labels: usize,
    },
    Rejected {
        reason: String,
    },
    Failed {
        error_msg: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisEvent {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub image_bytes: usize,
    pub provider_labels: usize,
    pub outcome: AnalysisOutcome,
}

impl AnalysisEvent {
    pub fn classified(
        request_id: Uuid,
        image_bytes: usize,
        provider_labels: usize,
        result: &AnalysisResult,
    ) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
            image_bytes,
            provider_labels,
            outcome: AnalysisOutcome::Classified {
                verdict: result.health_status,
                confidence: result.confidence,
                relevant_labels: result.detected_labels.len(),
            },
        }
    }

    pub fn rejected(request_id: Uuid, image_bytes: usize, reason: impl Into<String>) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
            image_bytes,
            provider_labels: 0,
            outcome: AnalysisOutcome::Rejected { reason: reason.into() },
        }
    }

    pub fn failed(request_id: Uuid, image_bytes: usize, error_msg: impl Into<String>) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
            image_bytes,
            provider_labels: 0,
            outcome: AnalysisOutcome::Failed { error_msg: error_msg.into() },
        }
    }
}

pub struct AnalysisLogger;

impl AnalysisLogger {
    /// Redact free-text fields and emit the event as one JSON line.
    pub fn log_event(mut event: AnalysisEvent) -> AnalysisEvent {
        match &mut event.outcome {
            AnalysisOutcome::Rejected { reason } => *reason = redact_sensitive_data(reason),
            AnalysisOutcome::Failed { error_msg } => *error_msg = redact_sensitive_data(error_msg),
            AnalysisOutcome::Classified { .. } => {}
        }

        let json = serde_json::to_string(&event).unwrap_or_default();
        match event.outcome {
            AnalysisOutcome::Failed { .. } => {
                warn!(target: "leaf_analysis", request_id = %event.request_id, event = %json, "Leaf analysis failed")
            }
            _ => info!(target: "leaf_analysis", request_id = %event.request_id, event = %json, "Leaf analysis event"),
        }
        event
    }
}
