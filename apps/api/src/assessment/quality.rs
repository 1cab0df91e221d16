//! Quality Assessor: completeness scoring for CV text and the "limited" checks
//! applied to both job and CV text.

use serde::{Deserialize, Serialize};

use crate::assessment::policy::AssessmentPolicy;

/// Substrings that extractors leave behind when they failed or only partly
/// succeeded. Any hit marks the text as limited regardless of its length.
pub const FAILURE_MARKERS: &[&str] = &[
    "No text could be extracted",
    "Failed to process",
    "could not directly access",
];

/// Missing-aspect tag for an empty CV.
pub const ALL_CONTENT: &str = "all content";

const BASE_SCORE: u32 = 20;
const SECTION_SCORE: u32 = 15;
const LONG_TEXT_BONUS: u32 = 20;
const SHORT_TEXT_BONUS: u32 = 10;
const LONG_TEXT_CHARS: usize = 2000;
const SHORT_TEXT_CHARS: usize = 1000;

/// CV sections and the keywords that evidence them.
const CV_SECTIONS: &[(&str, &[&str])] = &[
    (
        "work experience",
        &[
            "experience",
            "employment",
            "work history",
            "professional experience",
        ],
    ),
    (
        "education",
        &["education", "degree", "university", "college", "school"],
    ),
    ("skills", &["skills", "proficient", "competent", "abilities"]),
    (
        "contact information",
        &["email", "phone", "contact", "address", "@"],
    ),
];

const LIMITED_CV_NOTE: &str = "Note: The CV provided appears to have limited information. \
    The cover letter will be created with the available details, but may be less specific \
    than with a comprehensive CV.";

/// 0–100 completeness estimate plus the named gaps found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScore {
    pub score: u8,
    pub missing: Vec<String>,
    pub notes: Vec<String>,
}

impl QualityScore {
    /// Human-readable summary of the missing sections, empty when none are missing.
    pub fn issues(&self) -> String {
        if self.missing.is_empty() {
            String::new()
        } else {
            format!(
                "The CV may be missing information about: {}.",
                self.missing.join(", ")
            )
        }
    }
}

/// Scores extracted CV text.
///
/// Base 20 for any content, 15 per evidenced section (max 60), and a length
/// bonus of 20 above 2000 characters or 10 above 1000.
pub fn assess_cv(text: Option<&str>) -> QualityScore {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => {
            return QualityScore {
                score: 0,
                missing: vec![ALL_CONTENT.to_string()],
                notes: vec!["CV appears to be empty or contains no readable text.".to_string()],
            }
        }
    };

    let lowercase = text.to_lowercase();
    let mut score = BASE_SCORE;
    let mut missing = Vec::new();
    let mut notes = Vec::new();

    for (section, keywords) in CV_SECTIONS {
        if keywords.iter().any(|k| lowercase.contains(k)) {
            score += SECTION_SCORE;
        } else {
            missing.push(section.to_string());
        }
    }

    let length = text.chars().count();
    if length > LONG_TEXT_CHARS {
        score += LONG_TEXT_BONUS;
    } else if length > SHORT_TEXT_CHARS {
        score += SHORT_TEXT_BONUS;
        notes.push("CV appears to be relatively short".to_string());
    } else {
        notes.push("CV contains minimal text".to_string());
    }

    QualityScore {
        score: score.min(100) as u8,
        missing,
        notes,
    }
}

/// True when the text carries one of the extractor failure markers.
pub fn has_failure_marker(text: &str) -> bool {
    FAILURE_MARKERS.iter().any(|m| text.contains(m))
}

/// The simplified "limited" check used for job text: absent, too short, or a
/// failure placeholder.
pub fn is_text_limited(text: Option<&str>, policy: &AssessmentPolicy) -> bool {
    match text {
        None => true,
        Some(t) => t.trim().chars().count() < policy.min_text_chars || has_failure_marker(t),
    }
}

/// CV text is limited when the text check fails or its quality score falls
/// below the policy cutoff.
pub fn is_cv_limited(text: Option<&str>, quality: &QualityScore, policy: &AssessmentPolicy) -> bool {
    is_text_limited(text, policy) || quality.score < policy.cv_limited_score
}

/// Prepends the limited-information note to a low-scoring CV.
/// Empty text, extraction placeholders and CVs at or above the cutoff are
/// returned unchanged.
pub fn annotate_cv(text: String, quality: &QualityScore, policy: &AssessmentPolicy) -> String {
    if text.is_empty() || has_failure_marker(&text) || quality.score >= policy.cv_limited_score {
        return text;
    }
    format!("{LIMITED_CV_NOTE} {}\n\n{text}", quality.issues())
}
