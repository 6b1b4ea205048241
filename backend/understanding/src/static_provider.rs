use anyhow::{Result, bail};
use async_trait::async_trait;
use leafscan_core::{Label, VisionAnnotations, VisionProvider};

/// A vision provider that returns canned annotations without any network I/O.
pub struct StaticVisionProvider {
    annotations: VisionAnnotations,
    failure: Option<String>,
}

impl StaticVisionProvider {
    pub fn new(annotations: VisionAnnotations) -> Self {
        Self { annotations, failure: None }
    }

    pub fn with_labels(labels: Vec<Label>) -> Self {
        Self::new(VisionAnnotations { labels, text: Vec::new() })
    }

    /// A provider whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            annotations: VisionAnnotations::default(),
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl VisionProvider for StaticVisionProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn annotate(&self, _image: &[u8]) -> Result<VisionAnnotations> {
        if let Some(message) = &self.failure {
            bail!("{message}");
        }
        Ok(self.annotations.clone())
    }
}
