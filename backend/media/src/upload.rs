//! Upload policy for leaf photos: size limit and image-only filter.

use bytes::Bytes;
use leafscan_core::LeafError;
use tracing::{debug, warn};

use crate::mime_detect::{is_image, sniff_image_mime};

/// 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// An image received from a client or read from disk.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    /// Declared content type, if the client sent one.
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { file_name: None, content_type: None, data: data.into() }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn with_content_type(mut self, mime: impl Into<String>) -> Self {
        self.content_type = Some(mime.into());
        self
    }

    /// Client-supplied file name, or a placeholder for logs.
    pub fn display_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or("<unnamed>")
    }

    /// Declared content type, falling back to magic-byte sniffing.
    pub fn effective_mime(&self) -> Option<String> {
        match self.content_type.as_deref() {
            Some(mime) if !mime.trim().is_empty() && mime != "application/octet-stream" => {
                Some(mime.to_string())
            }
            _ => sniff_image_mime(&self.data).map(str::to_string),
        }
    }
}

/// Limits applied to every upload before it reaches the vision provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self { max_bytes: DEFAULT_MAX_UPLOAD_BYTES }
    }
}

impl UploadPolicy {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Human-readable limit, e.g. "10MB".
    pub fn limit_label(&self) -> String {
        const MIB: usize = 1024 * 1024;
        if self.max_bytes >= MIB && self.max_bytes % MIB == 0 {
            format!("{}MB", self.max_bytes / MIB)
        } else if self.max_bytes >= 1024 && self.max_bytes % 1024 == 0 {
            format!("{}KB", self.max_bytes / 1024)
        } else {
            format!("{} bytes", self.max_bytes)
        }
    }

    /// Reject uploads that are empty, too large, or not images.
    pub fn check(&self, upload: &ImageUpload) -> Result<(), LeafError> {
        if upload.data.is_empty() {
            return Err(LeafError::NoImage);
        }
        if upload.data.len() > self.max_bytes {
            warn!(
                file = upload.display_name(),
                size = upload.data.len(),
                limit = self.max_bytes,
                "Rejected oversized upload"
            );
            return Err(LeafError::ImageTooLarge {
                size: upload.data.len(),
                limit: self.max_bytes,
            });
        }
        match upload.effective_mime() {
            Some(mime) if is_image(&mime) => {
                debug!(
                    file = upload.display_name(),
                    mime = %mime,
                    size = upload.data.len(),
                    "Accepted upload"
                );
                Ok(())
            }
            other => {
                let mime = other.unwrap_or_else(|| "unknown".to_string());
                warn!(file = upload.display_name(), mime = %mime, "Rejected non-image upload");
                Err(LeafError::UnsupportedMediaType(mime))
            }
        }
    }
}
