//! Combines the individual heuristics into a single per-request assessment.

use serde::{Deserialize, Serialize};

use crate::assessment::mode::{adaptive_notice, select_mode, AdaptiveNotice, OperatingMode};
use crate::assessment::policy::AssessmentPolicy;
use crate::assessment::quality::{assess_cv, is_cv_limited, is_text_limited, QualityScore};
use crate::assessment::relevance::classify_relevance;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputAssessment {
    pub job_limited: bool,
    pub cv_limited: bool,
    pub job_relevant: bool,
    pub mode: OperatingMode,
    pub cv_quality: QualityScore,
    pub job_keyword_matches: Vec<String>,
    pub job_text_length: usize,
    pub cv_text_length: usize,
}

impl InputAssessment {
    /// Assesses raw extracted text. Total over its inputs: absent or empty
    /// text lands in the lowest tier and `generic` mode rather than failing.
    ///
    /// `cv_text` must be the text as extracted, before any quality note is
    /// prepended, so the note's own wording cannot inflate the score.
    pub fn evaluate(
        job_text: Option<&str>,
        cv_text: Option<&str>,
        policy: &AssessmentPolicy,
    ) -> Self {
        let job_limited = is_text_limited(job_text, policy);
        let cv_quality = assess_cv(cv_text);
        let cv_limited = is_cv_limited(cv_text, &cv_quality, policy);
        let relevance = classify_relevance(job_text, job_limited, policy);
        let mode = select_mode(job_limited, cv_limited, relevance.relevant);

        Self {
            job_limited,
            cv_limited,
            job_relevant: relevance.relevant,
            mode,
            cv_quality,
            job_keyword_matches: relevance.matched_keywords,
            job_text_length: job_text.map_or(0, |t| t.chars().count()),
            cv_text_length: cv_text.map_or(0, |t| t.chars().count()),
        }
    }

    pub fn notice(&self) -> Option<AdaptiveNotice> {
        adaptive_notice(self.job_limited, self.cv_limited, self.job_relevant)
    }
}
