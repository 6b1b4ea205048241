use leafscan_core::VerdictCategory;

const HEALTHY: &[&str] = &[
    "Continue current care routine",
    "Monitor regularly for any changes",
    "Maintain proper watering schedule",
];

const POTENTIALLY_DISEASED: &[&str] = &[
    "Consult with agricultural expert",
    "Consider appropriate treatment",
    "Isolate affected plants if necessary",
    "Improve ventilation and reduce humidity",
];

const NEEDS_FURTHER_ANALYSIS: &[&str] = &[
    "Take clearer photos of affected areas",
    "Consult with local agricultural extension",
    "Monitor plant closely for changes",
];

/// Fixed advice list for a verdict. Empty for `Unknown`.
pub fn recommendations_for(category: VerdictCategory) -> &'static [&'static str] {
    match category {
        VerdictCategory::Healthy => HEALTHY,
        VerdictCategory::PotentiallyDiseased => POTENTIALLY_DISEASED,
        VerdictCategory::NeedsFurtherAnalysis => NEEDS_FURTHER_ANALYSIS,
        VerdictCategory::Unknown => &[],
    }
}
