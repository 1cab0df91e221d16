//! Mode Selector: maps the assessment flags to one of four generation strategies.

use serde::{Deserialize, Serialize};

/// How strongly the generated letter leans on job-posting vs CV content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    Standard,
    CvFocused,
    JobFocused,
    Generic,
}

impl OperatingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingMode::Standard => "standard",
            OperatingMode::CvFocused => "cv_focused",
            OperatingMode::JobFocused => "job_focused",
            OperatingMode::Generic => "generic",
        }
    }

    /// Modes that can rely on specific details from the job posting.
    pub fn uses_job_details(&self) -> bool {
        matches!(self, OperatingMode::Standard | OperatingMode::JobFocused)
    }

    /// Modes that can rely on specific details from the CV.
    pub fn uses_cv_details(&self) -> bool {
        matches!(self, OperatingMode::Standard | OperatingMode::CvFocused)
    }
}

impl std::fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First matching rule wins: generic, then cv_focused, then job_focused,
/// then standard. A relevance failure outranks a limited CV.
pub fn select_mode(job_limited: bool, cv_limited: bool, job_relevant: bool) -> OperatingMode {
    if job_limited && cv_limited {
        OperatingMode::Generic
    } else if job_limited || !job_relevant {
        OperatingMode::CvFocused
    } else if cv_limited {
        OperatingMode::JobFocused
    } else {
        OperatingMode::Standard
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    Info,
    Warning,
}

/// User-facing explanation of why the letter may be less specific.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptiveNotice {
    pub severity: NoticeSeverity,
    pub title: String,
    pub message: String,
}

/// `None` when both inputs were good and the job text was relevant.
pub fn adaptive_notice(
    job_limited: bool,
    cv_limited: bool,
    job_relevant: bool,
) -> Option<AdaptiveNotice> {
    if !job_limited && !cv_limited && job_relevant {
        return None;
    }

    if (job_limited && cv_limited) || !job_relevant {
        return Some(AdaptiveNotice {
            severity: NoticeSeverity::Warning,
            title: "Limited Information Cover Letter".to_string(),
            message: "This cover letter was created with limited information. \
                We've used general professional content to fill in gaps."
                .to_string(),
        });
    }

    let message = if job_limited {
        "This cover letter was created with limited job information. \
            We focused more on your CV/resume content."
    } else {
        "This cover letter was created with limited CV information. \
            We focused more on the job requirements."
    };

    Some(AdaptiveNotice {
        severity: NoticeSeverity::Info,
        title: "Adaptive Cover Letter".to_string(),
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_table_is_total() {
        let cases = [
            ((true, true, true), OperatingMode::Generic),
            ((true, true, false), OperatingMode::Generic),
            ((true, false, true), OperatingMode::CvFocused),
            ((true, false, false), OperatingMode::CvFocused),
            ((false, false, false), OperatingMode::CvFocused),
            ((false, true, false), OperatingMode::CvFocused),
            ((false, true, true), OperatingMode::JobFocused),
            ((false, false, true), OperatingMode::Standard),
        ];
        for ((job_limited, cv_limited, relevant), expected) in cases {
            assert_eq!(
                select_mode(job_limited, cv_limited, relevant),
                expected,
                "({job_limited}, {cv_limited}, {relevant})"
            );
        }
    }

    #[test]
    fn test_relevance_failure_outranks_limited_cv() {
        assert_eq!(select_mode(false, true, false), OperatingMode::CvFocused);
    }

    #[test]
    fn test_mode_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&OperatingMode::CvFocused).unwrap(),
            r#""cv_focused""#
        );
        assert_eq!(OperatingMode::JobFocused.to_string(), "job_focused");
    }

    #[test]
    fn test_detail_flags() {
        assert!(OperatingMode::Standard.uses_job_details());
        assert!(OperatingMode::Standard.uses_cv_details());
        assert!(OperatingMode::JobFocused.uses_job_details());
        assert!(!OperatingMode::JobFocused.uses_cv_details());
        assert!(!OperatingMode::CvFocused.uses_job_details());
        assert!(OperatingMode::CvFocused.uses_cv_details());
        assert!(!OperatingMode::Generic.uses_job_details());
        assert!(!OperatingMode::Generic.uses_cv_details());
    }

    #[test]
    fn test_no_notice_for_good_inputs() {
        assert!(adaptive_notice(false, false, true).is_none());
    }

    #[test]
    fn test_warning_notice_for_irrelevant_job() {
        let notice = adaptive_notice(false, false, false).unwrap();
        assert_eq!(notice.severity, NoticeSeverity::Warning);
        assert_eq!(notice.title, "Limited Information Cover Letter");

        let notice = adaptive_notice(true, true, false).unwrap();
        assert_eq!(notice.severity, NoticeSeverity::Warning);
    }

    #[test]
    fn test_info_notice_names_limited_side() {
        let notice = adaptive_notice(false, true, true).unwrap();
        assert_eq!(notice.severity, NoticeSeverity::Info);
        assert!(notice.message.contains("limited CV information"));
    }
}
