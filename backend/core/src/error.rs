use thiserror::Error;

/// Top-level error type for leafscan.
#[derive(Debug, Error)]
pub enum LeafError {
    #[error("invalid label \"{description}\": {kind}")]
    InvalidLabel {
        description: String,
        kind: InvalidLabelKind,
    },

    #[error("no image file provided")]
    NoImage,

    #[error("image is {size} bytes, limit is {limit} bytes")]
    ImageTooLarge { size: usize, limit: usize },

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("vision provider error ({provider}): {message}")]
    VisionProvider { provider: String, message: String },
}

/// Why a plant-related label was rejected by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidLabelKind {
    #[error("score is missing")]
    MissingScore,

    #[error("score is not a finite number")]
    NonFiniteScore,

    #[error("score {0} is outside [0, 1]")]
    ScoreOutOfRange(f64),
}

impl LeafError {
    /// Shorthand for an [`LeafError::InvalidLabel`].
    pub fn invalid_label(description: impl Into<String>, kind: InvalidLabelKind) -> Self {
        Self::InvalidLabel {
            description: description.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_label_message_names_label_and_kind() {
        let err = LeafError::invalid_label("Leaf", InvalidLabelKind::MissingScore);
        assert_eq!(err.to_string(), "invalid label \"Leaf\": score is missing");
    }

    #[test]
    fn out_of_range_message_includes_score() {
        let err = LeafError::invalid_label("Plant", InvalidLabelKind::ScoreOutOfRange(1.5));
        assert!(err.to_string().contains("1.5"));
    }
}
