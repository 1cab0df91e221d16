use std::sync::Arc;

use crate::config::Config;
use crate::extraction::link::JobLinkFetcher;
use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion provider used for both poster OCR and letter generation.
    pub provider: Arc<dyn CompletionProvider>,
    pub fetcher: JobLinkFetcher,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    pub(crate) fn for_tests(provider: Arc<dyn CompletionProvider>) -> Self {
        let config = Config::for_tests();
        let fetcher = JobLinkFetcher::new(
            std::time::Duration::from_secs(config.job_link_timeout_secs),
            config.job_link_max_chars,
            config.job_link_allow_private_hosts,
        )
        .expect("test fetcher builds");
        AppState {
            provider,
            fetcher,
            config,
        }
    }
}
