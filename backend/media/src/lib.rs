pub mod mime_detect;
pub mod upload;

pub use mime_detect::{detect_mime_type, is_image, sniff_image_mime};
pub use upload::{DEFAULT_MAX_UPLOAD_BYTES, ImageUpload, UploadPolicy};
