//! Relevance Classifier: decides whether extracted job text is actually about a job.
//!
//! Plain keyword counting, not NLP. A page that merely mentions "team" and
//! "company" a few times will pass, and a terse but real posting can fail.
//! Both outcomes are accepted approximations.

use serde::{Deserialize, Serialize};

use crate::assessment::policy::AssessmentPolicy;

pub const JOB_KEYWORDS: &[&str] = &[
    "job",
    "position",
    "work",
    "role",
    "responsibilities",
    "requirements",
    "qualifications",
    "skills",
    "experience",
    "company",
    "team",
    "organization",
    "mission",
    "values",
    "salary",
    "benefits",
    "location",
    "remote",
    "hybrid",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceVerdict {
    pub relevant: bool,
    pub matched_keywords: Vec<String>,
}

/// Distinct job keywords present in `text` (case-insensitive substring match).
pub fn matched_job_keywords(text: &str) -> Vec<&'static str> {
    let lowercase = text.to_lowercase();
    JOB_KEYWORDS
        .iter()
        .copied()
        .filter(|k| lowercase.contains(k))
        .collect()
}

/// Relevant iff the text is not limited and enough distinct keywords match.
pub fn classify_relevance(
    text: Option<&str>,
    limited: bool,
    policy: &AssessmentPolicy,
) -> RelevanceVerdict {
    let matched: Vec<String> = text
        .map(matched_job_keywords)
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .collect();

    RelevanceVerdict {
        relevant: !limited && matched.len() >= policy.relevance_min_matches,
        matched_keywords: matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_keywords_are_relevant() {
        let policy = AssessmentPolicy::default();
        let verdict = classify_relevance(Some("job position requirements skills"), false, &policy);
        assert!(verdict.relevant);
        assert_eq!(
            verdict.matched_keywords,
            vec!["job", "position", "requirements", "skills"]
        );
    }

    #[test]
    fn test_limited_text_is_never_relevant() {
        let policy = AssessmentPolicy::default();
        let verdict = classify_relevance(Some("job position requirements skills"), true, &policy);
        assert!(!verdict.relevant);
        assert_eq!(verdict.matched_keywords.len(), 4);
    }

    #[test]
    fn test_two_keywords_are_not_enough() {
        let policy = AssessmentPolicy::default();
        let verdict = classify_relevance(Some("Our Salary and Benefits"), false, &policy);
        assert!(!verdict.relevant);
        assert_eq!(verdict.matched_keywords, vec!["salary", "benefits"]);
    }

    #[test]
    fn test_keywords_counted_once() {
        assert_eq!(matched_job_keywords("JOB job Job jobs"), vec!["job"]);
    }

    #[test]
    fn test_absent_text_has_no_matches() {
        let policy = AssessmentPolicy::default();
        let verdict = classify_relevance(None, true, &policy);
        assert!(!verdict.relevant);
        assert!(verdict.matched_keywords.is_empty());
    }

    #[test]
    fn test_threshold_is_configurable() {
        let policy = AssessmentPolicy {
            relevance_min_matches: 5,
            ..AssessmentPolicy::default()
        };
        let verdict = classify_relevance(Some("job position requirements skills"), false, &policy);
        assert!(!verdict.relevant);
    }
}
