use leafscan_core::{AnalysisResult, DetectedLabel, Label, LeafError};
use tracing::debug;

use crate::classifier::{classify, to_percent};
use crate::filter::{filter_labels, FilteredLabel};
use crate::recommendations::recommendations_for;

/// Run the full pipeline over a provider's label list.
///
/// Fails only if a plant-related label carries a missing or invalid score;
/// irrelevant labels are dropped before validation.
pub fn analyze_labels(labels: &[Label]) -> Result<AnalysisResult, LeafError> {
    let filtered = filter_labels(labels)
        .into_iter()
        .map(FilteredLabel::from_label)
        .collect::<Result<Vec<_>, _>>()?;

    let verdict = classify(&filtered);
    debug!(
        total = labels.len(),
        relevant = filtered.len(),
        verdict = %verdict.category,
        confidence = verdict.confidence,
        "Classified labels"
    );

    Ok(AnalysisResult {
        health_status: verdict.category,
        confidence: verdict.confidence,
        detected_labels: filtered
            .iter()
            .map(|l| DetectedLabel {
                name: l.description.to_string(),
                confidence: to_percent(l.score),
            })
            .collect(),
        recommendations: recommendations_for(verdict.category)
            .iter()
            .map(|s| s.to_string())
            .collect(),
    })
}
