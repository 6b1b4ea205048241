use std::fmt;

use serde::{Deserialize, Serialize};

/// One semantic annotation returned by a vision provider.
///
/// `score` is optional on the wire; the analysis engine rejects plant-related
/// labels that arrive without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Provider knowledge-graph id (e.g. "/m/09t49").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topicality: Option<f64>,
}

impl Label {
    pub fn new(description: impl Into<String>, score: f64) -> Self {
        Self {
            description: description.into(),
            score: Some(score),
            mid: None,
            topicality: None,
        }
    }

    /// A label with no score attached.
    pub fn unscored(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            score: None,
            mid: None,
            topicality: None,
        }
    }
}

/// A block of text found in the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnnotation {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Everything a vision provider reported for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisionAnnotations {
    pub labels: Vec<Label>,
    pub text: Vec<TextAnnotation>,
}

impl VisionAnnotations {
    pub fn text_detected(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Coarse health verdict for a leaf photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerdictCategory {
    #[serde(rename = "Healthy")]
    Healthy,
    #[serde(rename = "Potentially Diseased")]
    PotentiallyDiseased,
    #[serde(rename = "Needs Further Analysis")]
    NeedsFurtherAnalysis,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl VerdictCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::PotentiallyDiseased => "Potentially Diseased",
            Self::NeedsFurtherAnalysis => "Needs Further Analysis",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for VerdictCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plant-related label echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedLabel {
    pub name: String,
    /// Integer percentage, 0-100.
    pub confidence: u8,
}

/// Outcome of one classification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub health_status: VerdictCategory,
    /// Integer percentage, 0-100.
    pub confidence: u8,
    /// Plant-related labels in input order.
    pub detected_labels: Vec<DetectedLabel>,
    pub recommendations: Vec<String>,
}
