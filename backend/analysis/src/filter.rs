//! Annotation filter: keeps only labels that talk about plant condition.

use leafscan_core::{InvalidLabelKind, Label, LeafError};

/// Botanical keywords; a label is relevant if its description contains any of them.
pub const PLANT_KEYWORDS: [&str; 5] = ["leaf", "plant", "disease", "healthy", "damage"];

/// Case-insensitive substring match of `description` against `keywords`.
pub(crate) fn contains_any(description: &str, keywords: &[&str]) -> bool {
    let lower = description.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Whether a label description relates to plant condition.
pub fn is_plant_related(description: &str) -> bool {
    contains_any(description, &PLANT_KEYWORDS)
}

/// Select the plant-related labels, preserving input order.
pub fn filter_labels(labels: &[Label]) -> Vec<&Label> {
    labels
        .iter()
        .filter(|l| is_plant_related(&l.description))
        .collect()
}

/// A plant-related label with a validated score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredLabel<'a> {
    pub description: &'a str,
    /// In `[0, 1]`.
    pub score: f64,
}

impl<'a> FilteredLabel<'a> {
    /// Attach the label's score, rejecting missing or out-of-range values.
    pub fn from_label(label: &'a Label) -> Result<Self, LeafError> {
        let score = label.score.ok_or_else(|| {
            LeafError::invalid_label(&label.description, InvalidLabelKind::MissingScore)
        })?;
        if !score.is_finite() {
            return Err(LeafError::invalid_label(
                &label.description,
                InvalidLabelKind::NonFiniteScore,
            ));
        }
        if !(0.0..=1.0).contains(&score) {
            return Err(LeafError::invalid_label(
                &label.description,
                InvalidLabelKind::ScoreOutOfRange(score),
            ));
        }
        Ok(Self {
            description: &label.description,
            score,
        })
    }
}
