//! Link Validator: advisory quality score for a job URL before it is fetched.
//!
//! Never blocks a submission. The hard server-side check lives in
//! `require_fetchable_url`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::assessment::upload::QualityTier;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)+([/?].*)?$")
        .expect("URL pattern is valid")
});

static HOST_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.com$|\.org$|\.net$|\.co\..*$|\.io$").expect("host suffix pattern is valid")
});

/// Job boards, matched as substrings of the lower-cased URL.
pub const KNOWN_JOB_SITES: &[&str] = &[
    "linkedin.com/jobs",
    "indeed.com",
    "monster.com",
    "glassdoor.com",
    "jobstreet.com",
    "careerbuilder.com",
    "simplyhired.com",
    "dice.com",
    "ziprecruiter.com",
];

pub const URL_JOB_KEYWORDS: &[&str] = &[
    "job",
    "career",
    "position",
    "opening",
    "vacancy",
    "apply",
    "employment",
    "work",
];

const BASE_SCORE: u8 = 20;
const KNOWN_SITE_SCORE: u8 = 40;
const KEYWORD_SCORE: u8 = 20;
const DEEP_PATH_SCORE: u8 = 10;
const QUERY_SCORE: u8 = 10;

pub const ISSUE_INVALID: &str = "Invalid URL format";
pub const ISSUE_UNKNOWN_SITE: &str = "URL is not from a known job posting site";
pub const ISSUE_NO_KEYWORDS: &str = "URL does not contain job-related keywords";
pub const ISSUE_HOMEPAGE: &str =
    "URL appears to be a homepage or generic page rather than a specific job posting";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAssessment {
    pub is_valid: bool,
    pub normalized_url: String,
    pub is_likely_job_posting: bool,
    pub quality_score: u8,
    pub potential_issues: Vec<String>,
    pub quality_tier: QualityTier,
    pub company_hint: String,
}

/// Scores a raw URL without dereferencing it.
pub fn assess_link(raw: &str) -> LinkAssessment {
    let raw = raw.trim();
    let normalized = if has_scheme(raw) {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };
    let is_valid = URL_PATTERN.is_match(raw) || URL_PATTERN.is_match(&normalized);

    if !is_valid {
        return LinkAssessment {
            is_valid: false,
            normalized_url: raw.to_string(),
            is_likely_job_posting: false,
            quality_score: 0,
            potential_issues: vec![ISSUE_INVALID.to_string()],
            quality_tier: QualityTier::Poor,
            company_hint: String::new(),
        };
    }

    let lowercase = normalized.to_lowercase();
    let has_keyword = URL_JOB_KEYWORDS.iter().any(|k| lowercase.contains(k));
    let known_site = is_known_job_site(&normalized);

    let mut issues = Vec::new();
    let mut score = BASE_SCORE;

    if known_site {
        score += KNOWN_SITE_SCORE;
    } else {
        issues.push(ISSUE_UNKNOWN_SITE.to_string());
    }

    if has_keyword {
        score += KEYWORD_SCORE;
    } else {
        issues.push(ISSUE_NO_KEYWORDS.to_string());
    }

    // The pattern is more permissive than a real URL parser; structural
    // bonuses only apply when the URL actually parses.
    if let Ok(parsed) = Url::parse(&normalized) {
        let segments = parsed
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).count())
            .unwrap_or(0);
        let has_query = parsed.query().is_some_and(|q| !q.is_empty());

        if segments > 1 {
            score += DEEP_PATH_SCORE;
        }
        if has_query {
            score += QUERY_SCORE;
        }
        if segments <= 1 && !has_query {
            issues.push(ISSUE_HOMEPAGE.to_string());
        }
    }

    let quality_score = score.min(100);

    LinkAssessment {
        is_valid: true,
        company_hint: company_hint(&normalized),
        normalized_url: normalized,
        is_likely_job_posting: has_keyword || known_site,
        quality_score,
        potential_issues: issues,
        quality_tier: link_tier(quality_score),
    }
}

fn has_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

pub fn is_known_job_site(url: &str) -> bool {
    let lowercase = url.to_lowercase();
    KNOWN_JOB_SITES.iter().any(|site| lowercase.contains(site))
}

/// Maps a link score onto the indicator tiers: 70+ good, 40+ limited, else poor.
pub fn link_tier(score: u8) -> QualityTier {
    match score {
        70.. => QualityTier::Good,
        40..=69 => QualityTier::Limited,
        _ => QualityTier::Poor,
    }
}

/// Best-effort company name from the host, e.g. `careers.acme.io` → `Careers`,
/// `www.acme.com` → `Acme`. Empty when the URL does not parse.
pub fn company_hint(url: &str) -> String {
    let with_scheme = if has_scheme(url) {
        url.to_string()
    } else {
        format!("https://{url}")
    };
    let Some(host) = Url::parse(&with_scheme)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
    else {
        return String::new();
    };

    let host = host.strip_prefix("www.").unwrap_or(&host);
    let domain = HOST_SUFFIX.replace(host, "");
    let main = domain.split('.').next().unwrap_or_default();

    let mut chars = main.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Hard check applied before fetching: the link must normalize to an
/// http(s) URL with a host. Returns the normalized URL.
pub fn require_fetchable_url(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let candidate = if has_scheme(raw) {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };
    Url::parse(&candidate)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
}
