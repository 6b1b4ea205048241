//! CLI Analyze Command
//!
//! Classifies a saved label list offline, or sends a photo to the configured
//! vision provider first.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use leafscan_analysis::analyze_labels;
use leafscan_config::LeafScanConfig;
use leafscan_core::{AnalysisResult, Label, VisionProvider};
use leafscan_media::{detect_mime_type, ImageUpload, UploadPolicy};
use leafscan_understanding::GoogleVisionProvider;
use serde::Deserialize;
use tracing::info;

use crate::terminal_output::render_result;

pub enum AnalyzeInput {
    /// JSON file with provider labels.
    Labels(PathBuf),
    /// Image to annotate with the vision provider.
    Image(PathBuf),
}

/// Accepted label file shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum LabelFile {
    List(Vec<Label>),
    Provider {
        #[serde(rename = "labelAnnotations")]
        label_annotations: Vec<Label>,
    },
    Wrapped {
        labels: Vec<Label>,
    },
}

impl LabelFile {
    fn into_labels(self) -> Vec<Label> {
        match self {
            Self::List(labels) => labels,
            Self::Provider { label_annotations } => label_annotations,
            Self::Wrapped { labels } => labels,
        }
    }
}

pub async fn run(config: &LeafScanConfig, input: AnalyzeInput, json: bool) -> Result<()> {
    let result = match input {
        AnalyzeInput::Labels(path) => analyze_label_file(&path).await?,
        AnalyzeInput::Image(path) => analyze_image_file(config, &path).await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_result(&result));
    }
    Ok(())
}

/// Parse a label file: a bare array, `{"labels": [...]}`, or a provider
/// response with `labelAnnotations`.
pub async fn read_labels(path: &Path) -> Result<Vec<Label>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read label file: {}", path.display()))?;
    let file: LabelFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse label file: {}", path.display()))?;
    Ok(file.into_labels())
}

pub async fn analyze_label_file(path: &Path) -> Result<AnalysisResult> {
    let labels = read_labels(path).await?;
    info!(labels = labels.len(), path = %path.display(), "Analyzing saved labels");
    Ok(analyze_labels(&labels)?)
}

async fn analyze_image_file(config: &LeafScanConfig, path: &Path) -> Result<AnalysisResult> {
    let api_key = config
        .vision_api_key()
        .ok_or_else(|| anyhow!("No vision API key configured (set GOOGLE_VISION_API_KEY)"))?;

    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image: {}", path.display()))?;
    let mut upload = ImageUpload::new(data).with_content_type(detect_mime_type(path));
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        upload = upload.with_file_name(name);
    }
    UploadPolicy::new(config.max_upload_bytes()).check(&upload)?;

    let provider = GoogleVisionProvider::new(api_key)
        .with_base_url(config.vision_base_url())
        .with_max_labels(config.max_labels());
    let annotations = provider
        .annotate(&upload.data)
        .await
        .with_context(|| format!("{} failed to annotate {}", provider.name(), path.display()))?;

    Ok(analyze_labels(&annotations.labels)?)
}
