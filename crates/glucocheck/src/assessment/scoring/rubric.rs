use serde::{Deserialize, Serialize};

/// Thresholds applied by the local scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRubric {
    /// Areas scoring below this receive targeted advice.
    pub advice_threshold: u8,
    pub positive_cutoff: u8,
    pub warning_cutoff: u8,
}

impl Default for ScoringRubric {
    fn default() -> Self {
        Self {
            advice_threshold: 7,
            positive_cutoff: 8,
            warning_cutoff: 5,
        }
    }
}
