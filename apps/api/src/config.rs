use std::str::FromStr;

use anyhow::{Context, Result};

use crate::assessment::policy::AssessmentPolicy;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub completion_model: String,
    pub vision_model: String,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub job_link_timeout_secs: u64,
    pub job_link_max_chars: usize,
    /// Lets job links reach loopback and private networks. Local use only.
    pub job_link_allow_private_hosts: bool,
    pub policy: AssessmentPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            completion_model: env_or("COMPLETION_MODEL", "o4-mini"),
            vision_model: env_or("VISION_MODEL", "o4-mini"),
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            job_link_timeout_secs: parse_env("JOB_LINK_TIMEOUT_SECS", 20)?,
            job_link_max_chars: parse_env("JOB_LINK_MAX_CHARS", 20_000)?,
            job_link_allow_private_hosts: parse_env("JOB_LINK_ALLOW_PRIVATE_HOSTS", false)?,
            policy: policy_from_env()?,
        })
    }
}

/// Threshold overrides. Anything unset keeps the default policy value.
fn policy_from_env() -> Result<AssessmentPolicy> {
    let defaults = AssessmentPolicy::default();
    Ok(AssessmentPolicy {
        min_text_chars: parse_env("JOB_MIN_TEXT_CHARS", defaults.min_text_chars)?,
        cv_limited_score: parse_env("CV_LIMITED_SCORE", defaults.cv_limited_score)?,
        relevance_min_matches: parse_env(
            "JOB_RELEVANCE_MIN_MATCHES",
            defaults.relevance_min_matches,
        )?,
        image_poor_bytes: parse_env("IMAGE_POOR_BYTES", defaults.image_poor_bytes)?,
        image_limited_bytes: parse_env("IMAGE_LIMITED_BYTES", defaults.image_limited_bytes)?,
        cv_poor_bytes: parse_env("CV_POOR_BYTES", defaults.cv_poor_bytes)?,
        cv_limited_bytes: parse_env("CV_LIMITED_BYTES", defaults.cv_limited_bytes)?,
    })
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for unit and router tests; never reads the environment.
    pub(crate) fn for_tests() -> Self {
        Config {
            openai_api_key: "sk-test".to_string(),
            openai_base_url: "https://llm.example.test/v1/".to_string(),
            completion_model: "letter-model".to_string(),
            vision_model: "vision-model".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            max_upload_bytes: 1024 * 1024,
            job_link_timeout_secs: 1,
            job_link_max_chars: 100,
            job_link_allow_private_hosts: false,
            policy: AssessmentPolicy::default(),
        }
    }
}
