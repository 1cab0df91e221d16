use serde::{Deserialize, Serialize};

/// Hand-picked thresholds used by the assessment heuristics.
/// Defaults reproduce the production behaviour; every value can be overridden
/// from the environment (see `Config::from_env`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentPolicy {
    /// Trimmed text shorter than this is "limited".
    pub min_text_chars: usize,
    /// CV quality scores below this are "limited" and get an explanatory note.
    pub cv_limited_score: u8,
    /// Distinct job keywords required for job text to count as relevant.
    pub relevance_min_matches: usize,
    pub image_poor_bytes: u64,
    pub image_limited_bytes: u64,
    pub cv_poor_bytes: u64,
    pub cv_limited_bytes: u64,
}

impl Default for AssessmentPolicy {
    fn default() -> Self {
        Self {
            min_text_chars: 100,
            cv_limited_score: 40,
            relevance_min_matches: 3,
            image_poor_bytes: 50 * 1024,
            image_limited_bytes: 100 * 1024,
            cv_poor_bytes: 10 * 1024,
            cv_limited_bytes: 50 * 1024,
        }
    }
}
