//! Google Cloud Vision client: label and text detection in a single
//! `images:annotate` call.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use leafscan_core::{Label, TextAnnotation, VisionAnnotations, VisionProvider};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://vision.googleapis.com";

/// Number of labels requested per image.
pub const DEFAULT_MAX_LABELS: u32 = 10;

/// Google Cloud Vision provider authenticated with an API key.
pub struct GoogleVisionProvider {
    client: Client,
    api_key: String,
    base_url: String,
    max_labels: u32,
}

impl GoogleVisionProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_labels: DEFAULT_MAX_LABELS,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_labels(mut self, max_labels: u32) -> Self {
        self.max_labels = max_labels;
        self
    }
}

#[derive(Serialize)]
struct AnnotateRequest<'a> {
    requests: Vec<ImageRequest<'a>>,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    image: ImageContent,
    features: Vec<Feature<'a>>,
}

#[derive(Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_results: Option<u32>,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    #[serde(default)]
    label_annotations: Vec<Label>,
    #[serde(default)]
    text_annotations: Vec<TextAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Deserialize)]
struct ApiStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

#[async_trait]
impl VisionProvider for GoogleVisionProvider {
    fn name(&self) -> &str {
        "google-vision"
    }

    async fn annotate(&self, image: &[u8]) -> Result<VisionAnnotations> {
        info!(bytes = image.len(), max_labels = self.max_labels, "[Vision] Annotating image via Google Cloud Vision");

        let body = AnnotateRequest {
            requests: vec![ImageRequest {
                image: ImageContent { content: STANDARD.encode(image) },
                features: vec![
                    Feature { kind: "LABEL_DETECTION", max_results: Some(self.max_labels) },
                    Feature { kind: "TEXT_DETECTION", max_results: None },
                ],
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/images:annotate", self.base_url))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("Google Vision HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            bail!("Google Vision returned {}: {}", status, error_body);
        }

        let parsed: AnnotateResponse = response
            .json()
            .await
            .context("Failed to parse Google Vision response")?;

        let Some(first) = parsed.responses.into_iter().next() else {
            bail!("Google Vision returned no responses");
        };
        if let Some(err) = first.error {
            bail!("Google Vision image error {}: {}", err.code, err.message);
        }

        debug!(
            labels = first.label_annotations.len(),
            text_blocks = first.text_annotations.len(),
            "[Vision] Annotation complete"
        );

        Ok(VisionAnnotations {
            labels: first.label_annotations,
            text: first.text_annotations,
        })
    }
}
