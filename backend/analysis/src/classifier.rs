//! Verdict classifier: keyword rules over the filtered labels.
//!
//! Rules, first match wins:
//! 1. no filtered labels → `Unknown`, 0
//! 2. a healthy keyword and no disease keyword → `Healthy`, max score
//! 3. any disease keyword → `PotentiallyDiseased`, max score
//! 4. otherwise → `NeedsFurtherAnalysis`, fixed 50
//!
//! Mixed signals (healthy and disease keywords both present) resolve to
//! `PotentiallyDiseased`.

use leafscan_core::VerdictCategory;

use crate::filter::{contains_any, FilteredLabel};

/// Keywords that indicate a healthy plant.
pub const HEALTHY_KEYWORDS: [&str; 3] = ["healthy", "green", "fresh"];

/// Keywords that indicate disease or damage.
pub const DISEASE_KEYWORDS: [&str; 5] = ["disease", "damage", "brown", "yellow", "spot"];

/// Confidence reported when labels are plant-related but inconclusive.
pub const FURTHER_ANALYSIS_CONFIDENCE: u8 = 50;

/// Category plus integer confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub category: VerdictCategory,
    pub confidence: u8,
}

/// Convert a `[0, 1]` score to an integer percentage.
///
/// Rounds half away from zero (`0.925` → 93) and clamps to `0..=100`.
pub fn to_percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Classify the filtered labels into a verdict.
pub fn classify(labels: &[FilteredLabel<'_>]) -> Verdict {
    if labels.is_empty() {
        return Verdict {
            category: VerdictCategory::Unknown,
            confidence: 0,
        };
    }

    let is_healthy = labels
        .iter()
        .any(|l| contains_any(l.description, &HEALTHY_KEYWORDS));
    let is_diseased = labels
        .iter()
        .any(|l| contains_any(l.description, &DISEASE_KEYWORDS));

    if is_healthy && !is_diseased {
        Verdict {
            category: VerdictCategory::Healthy,
            confidence: max_confidence(labels),
        }
    } else if is_diseased {
        Verdict {
            category: VerdictCategory::PotentiallyDiseased,
            confidence: max_confidence(labels),
        }
    } else {
        Verdict {
            category: VerdictCategory::NeedsFurtherAnalysis,
            confidence: FURTHER_ANALYSIS_CONFIDENCE,
        }
    }
}

fn max_confidence(labels: &[FilteredLabel<'_>]) -> u8 {
    let max = labels.iter().map(|l| l.score).fold(0.0_f64, f64::max);
    to_percent(max)
}
