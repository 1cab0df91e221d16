mod assessment;
mod config;
mod errors;
mod extraction;
mod generation;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::link::JobLinkFetcher;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cover letter API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion provider
    let llm = LlmClient::new(&config)?;
    info!(
        "LLM client initialized (completion model: {}, vision model: {})",
        llm.completion_model(),
        config.vision_model
    );

    // Initialize job link fetcher
    let fetcher = JobLinkFetcher::new(
        Duration::from_secs(config.job_link_timeout_secs),
        config.job_link_max_chars,
        config.job_link_allow_private_hosts,
    )?;
    if config.job_link_allow_private_hosts {
        warn!("Job links may reach loopback and private addresses");
    }

    info!(
        "Assessment policy: min text {} chars, CV cutoff {}, relevance needs {} keywords",
        config.policy.min_text_chars,
        config.policy.cv_limited_score,
        config.policy.relevance_min_matches
    );

    // Build app state
    let state = AppState {
        provider: Arc::new(llm),
        fetcher,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
