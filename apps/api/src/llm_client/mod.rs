/// LLM Client: the single point of entry for all completion-provider calls.
///
/// ARCHITECTURAL RULE: No other module may call the provider's HTTP API directly.
/// Handlers and extractors depend on the `CompletionProvider` trait, which is
/// injected through `AppState`.
///
/// The default provider speaks the OpenAI Chat Completions protocol, so any
/// compatible endpoint can be targeted through `OPENAI_BASE_URL`.
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::Config;

pub mod prompts;
pub mod sse;

use sse::{SseEvent, SseLineBuffer};

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Stream interrupted: {0}")]
    Stream(String),
}

/// Lazy, finite, non-restartable sequence of text chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send>>;

/// An image sent alongside the user prompt (vision extraction).
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub mime: String,
    pub bytes: Bytes,
}

impl ImageAttachment {
    pub fn data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime, encoded)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub user: String,
    pub image: Option<ImageAttachment>,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            user: user.into(),
            image: None,
        }
    }

    pub fn with_image(user: impl Into<String>, image: ImageAttachment) -> Self {
        Self {
            system: None,
            user: user.into(),
            image: Some(image),
        }
    }
}

/// Black-box text completion. `AppState` holds an `Arc<dyn CompletionProvider>`
/// built at startup; tests swap in a canned implementation.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Single completion string.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;

    /// Incremental completion. Errors opening the stream are returned directly;
    /// errors after the first chunk surface as stream items.
    async fn stream(&self, request: &CompletionRequest) -> Result<ChunkStream, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if the model produced any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// LlmClient: default provider
// ────────────────────────────────────────────────────────────────────────────

/// OpenAI-compatible Chat Completions client with retry and SSE streaming.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
    completion_model: String,
    vision_model: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key: config.openai_api_key.clone(),
            endpoint: format!(
                "{}/chat/completions",
                config.openai_base_url.trim_end_matches('/')
            ),
            completion_model: config.completion_model.clone(),
            vision_model: config.vision_model.clone(),
        })
    }

    pub fn completion_model(&self) -> &str {
        &self.completion_model
    }

    fn build_body<'a>(&'a self, request: &'a CompletionRequest, stream: bool) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: MessageContent::Text(system),
            });
        }

        let (model, content) = match &request.image {
            Some(image) => (
                self.vision_model.as_str(),
                MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: &request.user,
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.data_url(),
                        },
                    },
                ]),
            ),
            None => (
                self.completion_model.as_str(),
                MessageContent::Text(&request.user),
            ),
        };
        messages.push(ChatMessage {
            role: "user",
            content,
        });

        ChatRequest {
            model,
            messages,
            stream,
        }
    }

    /// Sends a request, retrying on 429 (rate limit) and 5xx errors with
    /// exponential backoff. Any other non-success status fails immediately.
    async fn send_with_retry(&self, body: &ChatRequest<'_>) -> Result<reqwest::Response, LlmError> {
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let text = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, text);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: text,
                });
                continue;
            }

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&text)
                    .map(|e| e.error.message)
                    .unwrap_or(text);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = self.build_body(request, false);
        let response: ChatResponse = self.send_with_retry(&body).await?.json().await?;

        if let Some(usage) = &response.usage {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                body.model, usage.prompt_tokens, usage.completion_tokens
            );
        }

        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }

    async fn stream(&self, request: &CompletionRequest) -> Result<ChunkStream, LlmError> {
        let body = self.build_body(request, true);
        let response = self.send_with_retry(&body).await?;
        debug!("Streaming completion from model {}", body.model);

        let mut body_stream = response.bytes_stream();
        let chunks = async_stream::stream! {
            let mut buffer = SseLineBuffer::default();
            let mut chunk_count = 0usize;

            while let Some(next) = body_stream.next().await {
                let data = match next {
                    Ok(b) => b,
                    Err(e) => {
                        error!("Completion stream read error: {e}");
                        yield Err(LlmError::Stream(e.to_string()));
                        return;
                    }
                };

                for event in buffer.push(&data) {
                    match event {
                        SseEvent::Delta(text) => {
                            chunk_count += 1;
                            yield Ok(text);
                        }
                        SseEvent::Done => {
                            debug!("Completion stream finished after {chunk_count} chunks");
                            return;
                        }
                        SseEvent::Error(message) => {
                            error!("Completion provider error mid-stream: {message}");
                            yield Err(LlmError::Stream(message));
                            return;
                        }
                    }
                }
            }

            debug!("Completion stream closed after {chunk_count} chunks");
        };

        Ok(Box::pin(chunks))
    }
}
