//! Suggests a download filename for a generated letter from its salutation,
//! company and job title.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;

static COMPANY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)(?:at|for|join)\s+([A-Z][A-Za-z0-9\s&]+?)(?:\.|,|\s+as|\s+in)",
        r"(?i)(?:interest\s+in|applying\s+to)\s+([A-Z][A-Za-z0-9\s&]+?)(?:\.|,|\s+as|\s+in)",
        r"(?i)position\s+(?:at|with)\s+([A-Z][A-Za-z0-9\s&]+?)(?:\.|,|\s+as|\s+in)",
        r"(?i)Dear\s+([^,\n]+)",
    ])
});

static TITLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)(?:position\s+of|role\s+of|as\s+(?:an?|the))\s+([A-Z][A-Za-z0-9\s&]+?)(?:\s+at|\s+with|\s+in|\.)",
        r"(?i)(?:applying\s+for\s+the|interested\s+in\s+the)\s+([A-Z][A-Za-z0-9\s&]+?)(?:\s+at|\s+with|\s+in|\.)",
        r"(?i)(?:the|your)\s+([A-Z][A-Za-z0-9\s&]+?)\s+(?:position|opening|role|opportunity)",
    ])
});

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("non-word pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("filename pattern is valid"))
        .collect()
}

pub fn suggest_filename(content: &str) -> String {
    suggest_filename_on(content, Utc::now().date_naive())
}

/// `cover-letter-<title>-<company>`, falling back to whichever part was
/// found, then to `cover-letter-<date>`.
pub fn suggest_filename_on(content: &str, today: NaiveDate) -> String {
    let company = first_capture(&COMPANY_PATTERNS, content).map(|c| slug(&c));
    let title = first_capture(&TITLE_PATTERNS, content).map(|t| slug(&t));

    match (title.filter(|t| !t.is_empty()), company.filter(|c| !c.is_empty())) {
        (Some(title), Some(company)) => format!("cover-letter-{title}-{company}"),
        (None, Some(company)) => format!("cover-letter-{company}"),
        (Some(title), None) => format!("cover-letter-{title}"),
        (None, None) => format!("cover-letter-{}", today.format("%Y-%m-%d")),
    }
}

fn first_capture(patterns: &[Regex], content: &str) -> Option<String> {
    patterns
        .iter()
        .filter_map(|p| p.captures(content))
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .find(|s| !s.is_empty())
}

fn slug(raw: &str) -> String {
    let cleaned = NON_WORD.replace_all(raw, "");
    WHITESPACE
        .replace_all(cleaned.trim(), "-")
        .to_lowercase()
}
