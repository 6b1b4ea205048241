pub mod static_provider;
pub mod vision;

pub use static_provider::StaticVisionProvider;
pub use vision::{GoogleVisionProvider, DEFAULT_BASE_URL, DEFAULT_MAX_LABELS};
