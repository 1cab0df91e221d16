//! Prompt Composer: renders the system/user prompt pair for a generation mode.
//!
//! Pure and total: empty texts produce the same skeleton with empty sections.

use serde::Serialize;

use crate::assessment::mode::OperatingMode;
use crate::generation::prompts::*;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::CompletionRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptPair {
    pub system_prompt: String,
    pub user_prompt: String,
}

impl PromptPair {
    pub fn into_request(self) -> CompletionRequest {
        CompletionRequest::new(self.system_prompt, self.user_prompt)
    }
}

/// `language` is embedded verbatim in both prompts.
pub fn compose_prompts(
    mode: OperatingMode,
    job_text: &str,
    cv_text: &str,
    language: &str,
) -> PromptPair {
    PromptPair {
        system_prompt: system_prompt(mode, language),
        user_prompt: user_prompt(mode, job_text, cv_text, language),
    }
}

fn system_prompt(mode: OperatingMode, language: &str) -> String {
    let analysis_steps = match mode {
        OperatingMode::Standard => format!("{JOB_ANALYSIS_STEP}\n\n{STANDARD_CV_STEP}"),
        OperatingMode::JobFocused => format!("{JOB_ANALYSIS_STEP}\n\n{JOB_FOCUSED_CV_STEP}"),
        OperatingMode::CvFocused => CV_FOCUSED_STEPS.to_string(),
        OperatingMode::Generic => GENERIC_STEPS.to_string(),
    };

    let specific = mode.uses_job_details();
    let (greeting_rules, opening_focus) = if specific {
        (SPECIFIC_GREETING_RULES, SPECIFIC_OPENING_FOCUS)
    } else {
        (GENERIC_GREETING_RULES, GENERIC_OPENING_FOCUS)
    };
    let (paragraph_focus, closing_guidance) = if mode == OperatingMode::Standard {
        (JOB_PARAGRAPH_FOCUS, PERSONALIZED_GUIDANCE)
    } else {
        (PROFESSIONAL_PARAGRAPH_FOCUS, GAP_FILLING_GUIDANCE)
    };

    fill_template(
        SYSTEM_TEMPLATE,
        &[
            ("analysis_steps", analysis_steps.as_str()),
            ("greeting_rules", greeting_rules),
            ("language", language),
            ("opening_focus", opening_focus),
            ("paragraph_focus", paragraph_focus),
            ("closing_guidance", closing_guidance),
        ],
    )
}

fn user_prompt(mode: OperatingMode, job_text: &str, cv_text: &str, language: &str) -> String {
    let job_qualifier = if mode.uses_job_details() {
        JOB_DETAILED_QUALIFIER
    } else {
        JOB_LIMITED_QUALIFIER
    };
    let cv_qualifier = if mode.uses_cv_details() {
        CV_DETAILED_QUALIFIER
    } else {
        CV_LIMITED_QUALIFIER
    };

    let (salutation, opening) = if mode.uses_job_details() {
        (SPECIFIC_SALUTATION, SPECIFIC_OPENING)
    } else {
        (GENERIC_SALUTATION, GENERIC_OPENING)
    };
    let requirements = match mode {
        OperatingMode::Standard => MATCHED_REQUIREMENTS,
        OperatingMode::CvFocused => CV_QUALIFICATIONS,
        OperatingMode::JobFocused => JOB_REQUIREMENTS,
        OperatingMode::Generic => TRANSFERABLE_SKILLS,
    };
    let examples = if mode.uses_cv_details() {
        CONCRETE_EXAMPLES
    } else {
        WELL_ROUNDED
    };
    let closing_note = if mode == OperatingMode::Standard {
        PERSONALIZED_NOTE
    } else {
        LIMITED_NOTE
    };

    fill_template(
        USER_TEMPLATE,
        &[
            ("job_qualifier", job_qualifier),
            ("job_text", job_text),
            ("cv_qualifier", cv_qualifier),
            ("cv_text", cv_text),
            ("salutation", salutation),
            ("opening", opening),
            ("requirements", requirements),
            ("examples", examples),
            ("language", language),
            ("closing_note", closing_note),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODES: [OperatingMode; 4] = [
        OperatingMode::Standard,
        OperatingMode::CvFocused,
        OperatingMode::JobFocused,
        OperatingMode::Generic,
    ];

    #[test]
    fn test_language_is_embedded_verbatim() {
        for mode in ALL_MODES {
            let pair = compose_prompts(mode, "job", "cv", "Norsk (bokmål)");
            assert!(pair.system_prompt.contains("(Norsk (bokmål))"), "{mode}");
            assert!(pair.user_prompt.contains("5. Is written in Norsk (bokmål)"), "{mode}");
        }
    }

    #[test]
    fn test_no_placeholders_left() {
        for mode in ALL_MODES {
            let pair = compose_prompts(mode, "", "", "english");
            for key in ["{language}", "{job_text}", "{cv_text}", "{analysis_steps}"] {
                assert!(!pair.system_prompt.contains(key), "{mode} {key}");
                assert!(!pair.user_prompt.contains(key), "{mode} {key}");
            }
        }
    }

    #[test]
    fn test_standard_mode_cross_references() {
        let pair = compose_prompts(OperatingMode::Standard, "JOB", "CV", "english");
        assert!(pair.system_prompt.contains(JOB_ANALYSIS_STEP));
        assert!(pair.system_prompt.contains(STANDARD_CV_STEP));
        assert!(pair.system_prompt.contains(PERSONALIZED_GUIDANCE));
        assert!(pair.user_prompt.contains(JOB_DETAILED_QUALIFIER));
        assert!(pair.user_prompt.contains(CV_DETAILED_QUALIFIER));
        assert!(pair.user_prompt.contains(MATCHED_REQUIREMENTS));
        assert!(pair.user_prompt.contains(CONCRETE_EXAMPLES));
        assert!(pair.user_prompt.contains(PERSONALIZED_NOTE));
    }

    #[test]
    fn test_cv_focused_mode() {
        let pair = compose_prompts(OperatingMode::CvFocused, "JOB", "CV", "english");
        assert!(pair.system_prompt.contains(CV_FOCUSED_STEPS));
        assert!(pair.system_prompt.contains(GENERIC_GREETING_RULES));
        assert!(pair.system_prompt.contains(GAP_FILLING_GUIDANCE));
        assert!(pair.user_prompt.contains(JOB_LIMITED_QUALIFIER));
        assert!(pair.user_prompt.contains(CV_DETAILED_QUALIFIER));
        assert!(pair.user_prompt.contains(CV_QUALIFICATIONS));
        assert!(pair.user_prompt.contains(CONCRETE_EXAMPLES));
    }

    #[test]
    fn test_job_focused_mode() {
        let pair = compose_prompts(OperatingMode::JobFocused, "JOB", "CV", "english");
        assert!(pair.system_prompt.contains(JOB_ANALYSIS_STEP));
        assert!(pair.system_prompt.contains(JOB_FOCUSED_CV_STEP));
        assert!(pair.system_prompt.contains(SPECIFIC_GREETING_RULES));
        assert!(pair.system_prompt.contains(PROFESSIONAL_PARAGRAPH_FOCUS));
        assert!(pair.user_prompt.contains(JOB_DETAILED_QUALIFIER));
        assert!(pair.user_prompt.contains(CV_LIMITED_QUALIFIER));
        assert!(pair.user_prompt.contains(JOB_REQUIREMENTS));
        assert!(pair.user_prompt.contains(WELL_ROUNDED));
        assert!(pair.user_prompt.contains(LIMITED_NOTE));
    }

    #[test]
    fn test_generic_mode() {
        let pair = compose_prompts(OperatingMode::Generic, "", "", "english");
        assert!(pair.system_prompt.contains(GENERIC_STEPS));
        assert!(pair.system_prompt.contains(GENERIC_OPENING_FOCUS));
        assert!(pair.user_prompt.contains(JOB_LIMITED_QUALIFIER));
        assert!(pair.user_prompt.contains(CV_LIMITED_QUALIFIER));
        assert!(pair.user_prompt.contains(GENERIC_SALUTATION));
        assert!(pair.user_prompt.contains(TRANSFERABLE_SKILLS));
        assert!(pair.user_prompt.contains(WELL_ROUNDED));
    }

    #[test]
    fn test_texts_are_embedded_without_rescanning() {
        let pair = compose_prompts(
            OperatingMode::Standard,
            "Acme wants {language} skills",
            "Jane {cv_text}",
            "english",
        );
        assert!(pair.user_prompt.contains("Acme wants {language} skills"));
        assert!(pair.user_prompt.contains("Jane {cv_text}"));
    }

    #[test]
    fn test_into_request_keeps_both_prompts() {
        let pair = compose_prompts(OperatingMode::Generic, "", "", "english");
        let request = pair.clone().into_request();
        assert_eq!(request.system.as_deref(), Some(pair.system_prompt.as_str()));
        assert_eq!(request.user, pair.user_prompt);
        assert!(request.image.is_none());
    }
}
