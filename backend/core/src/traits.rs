use anyhow::Result;
use async_trait::async_trait;

use crate::types::VisionAnnotations;

/// An external image-understanding service that returns labels and text for a photo.
///
/// Implementations receive their credentials and endpoints at construction time.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Provider name (e.g., "google-vision").
    fn name(&self) -> &str;

    /// Annotate raw image bytes with semantic labels and detected text.
    async fn annotate(&self, image: &[u8]) -> Result<VisionAnnotations>;
}
