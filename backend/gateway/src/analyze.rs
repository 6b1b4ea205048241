//! `POST /analyze-leaf`: multipart upload → vision provider → verdict.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use leafscan_analysis::analyze_labels;
use leafscan_core::{AnalysisResult, Label, LeafError};
use leafscan_logging::{redact_sensitive_data, AnalysisEvent, AnalysisLogger};
use leafscan_media::{ImageUpload, UploadPolicy};
use serde::Serialize;
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::server::GatewayState;

/// Multipart field carrying the photo.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: AnalysisReport,
    pub raw_data: RawData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub analysis_date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawData {
    /// Leading provider labels, unfiltered.
    pub labels: Vec<Label>,
    pub text_detected: bool,
}

pub async fn analyze_leaf(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("analyze_leaf", %request_id);

    async move {
        let mut image_bytes = 0;
        let outcome = run_analysis(&state, multipart, &mut image_bytes).await;
        match &outcome {
            Ok((response, provider_labels)) => {
                AnalysisLogger::log_event(AnalysisEvent::classified(
                    request_id,
                    image_bytes,
                    *provider_labels,
                    &response.analysis.result,
                ));
            }
            Err(err) if err.is_rejection() => {
                AnalysisLogger::log_event(AnalysisEvent::rejected(
                    request_id,
                    image_bytes,
                    describe(err),
                ));
            }
            Err(err) => {
                AnalysisLogger::log_event(AnalysisEvent::failed(
                    request_id,
                    image_bytes,
                    describe(err),
                ));
            }
        }
        outcome.map(|(response, _)| Json(response))
    }
    .instrument(span)
    .await
}

fn describe(err: &ApiError) -> String {
    match err {
        ApiError::Leaf(e) => e.to_string(),
        ApiError::BadRequest(m) => m.clone(),
        ApiError::NotFound => "not found".to_string(),
    }
}

async fn run_analysis(
    state: &GatewayState,
    multipart: Result<Multipart, MultipartRejection>,
    image_bytes: &mut usize,
) -> Result<(AnalyzeResponse, usize), ApiError> {
    // Anything that is not a multipart form carries no image.
    let mut multipart = multipart.map_err(|_| LeafError::NoImage)?;

    let upload = read_image_field(&mut multipart, &state.upload_policy).await?;
    *image_bytes = upload.data.len();
    state.upload_policy.check(&upload)?;

    let annotations = state
        .vision
        .annotate(&upload.data)
        .await
        .map_err(|e| LeafError::VisionProvider {
            provider: state.vision.name().to_string(),
            message: redact_sensitive_data(&format!("{e:#}")),
        })?;
    debug!(
        labels = annotations.labels.len(),
        text_detected = annotations.text_detected(),
        "Vision annotations received"
    );

    let result = analyze_labels(&annotations.labels)?;
    let provider_labels = annotations.labels.len();

    let response = AnalyzeResponse {
        success: true,
        analysis: AnalysisReport {
            result,
            analysis_date: Utc::now(),
        },
        raw_data: RawData {
            text_detected: annotations.text_detected(),
            labels: annotations
                .labels
                .into_iter()
                .take(state.raw_label_limit)
                .collect(),
        },
    };
    Ok((response, provider_labels))
}

/// Stream the `image` field into memory, stopping as soon as it exceeds the limit.
async fn read_image_field(
    multipart: &mut Multipart,
    policy: &UploadPolicy,
) -> Result<ImageUpload, ApiError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, 0, policy))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let mut data = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, data.len(), policy))?
        {
            if data.len() + chunk.len() > policy.max_bytes {
                return Err(LeafError::ImageTooLarge {
                    size: data.len() + chunk.len(),
                    limit: policy.max_bytes,
                }
                .into());
            }
            data.extend_from_slice(&chunk);
        }

        let mut upload = ImageUpload::new(data);
        upload.file_name = file_name;
        upload.content_type = content_type;
        return Ok(upload);
    }
    Err(LeafError::NoImage.into())
}

fn multipart_error(err: MultipartError, read: usize, policy: &UploadPolicy) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        LeafError::ImageTooLarge {
            size: read,
            limit: policy.max_bytes,
        }
        .into()
    } else {
        ApiError::BadRequest(err.body_text())
    }
}
