pub mod error;
pub mod traits;
pub mod types;

pub use error::{InvalidLabelKind, LeafError};
pub use traits::VisionProvider;
pub use types::{
    AnalysisResult, DetectedLabel, Label, TextAnnotation, VerdictCategory, VisionAnnotations,
};
