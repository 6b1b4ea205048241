//! Leaf health classification engine.
//!
//! Turns the noisy label list returned by a vision provider into a
//! `{healthStatus, confidence, recommendations}` verdict:
//!
//! raw labels → [`filter_labels`] → [`classify`] → [`recommendations_for`]
//!
//! Everything here is synchronous, pure, and safe to call from any number of
//! threads at once.

pub mod classifier;
pub mod engine;
pub mod filter;
pub mod recommendations;

pub use classifier::{
    classify, to_percent, Verdict, DISEASE_KEYWORDS, FURTHER_ANALYSIS_CONFIDENCE,
    HEALTHY_KEYWORDS,
};
pub use engine::analyze_labels;
pub use filter::{filter_labels, is_plant_related, FilteredLabel, PLANT_KEYWORDS};
pub use recommendations::recommendations_for;
