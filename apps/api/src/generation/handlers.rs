//! Axum route handlers for the Cover Letter API.

use anyhow::Context;
use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderMap, HeaderName, HeaderValue,
    },
    response::{IntoResponse, Response},
    Json,
};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::assessment::analysis::InputAssessment;
use crate::assessment::mode::AdaptiveNotice;
use crate::assessment::quality::annotate_cv;
use crate::errors::AppError;
use crate::extraction::image::extract_job_poster;
use crate::extraction::{extract_cv, ExtractedText, Origin};
use crate::generation::composer::{compose_prompts, PromptPair};
use crate::generation::filename::suggest_filename;
use crate::generation::form::{GenerationForm, JobSource, ValidatedForm};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub request_id: Uuid,
    pub language: String,
    pub job_source: Origin,
    pub cv_source: Origin,
    pub assessment: InputAssessment,
    pub notice: Option<AdaptiveNotice>,
    pub prompts: PromptPair,
}

#[derive(Debug, Deserialize)]
pub struct FilenameRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct FilenameResponse {
    pub filename: String,
}

/// Everything needed to call the provider, derived from one validated form.
struct PreparedLetter {
    language: String,
    job: ExtractedText,
    cv_source: Origin,
    assessment: InputAssessment,
    prompts: PromptPair,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cover-letters/generate
///
/// Streams the letter as `text/plain`. The assessment outcome travels in the
/// `X-*` response headers so the client can explain a less specific letter.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let request_id = Uuid::new_v4();
    let form = GenerationForm::from_multipart(multipart).await?.validate()?;

    async move {
        let prepared = prepare(&state, form).await;
        let assessment = &prepared.assessment;

        info!(
            job_limited = assessment.job_limited,
            cv_limited = assessment.cv_limited,
            job_relevant = assessment.job_relevant,
            job_text_length = assessment.job_text_length,
            cv_text_length = assessment.cv_text_length,
            language = %prepared.language,
            "Generating cover letter in {} mode",
            assessment.mode
        );

        let headers = generation_headers(assessment, request_id)?;
        let chunks = state
            .provider
            .stream(&prepared.prompts.into_request())
            .await?;

        let body = Body::from_stream(chunks.inspect_err(move |e| {
            error!(%request_id, "Cover letter stream aborted: {e}");
        }));

        Ok::<_, AppError>((headers, body).into_response())
    }
    .instrument(info_span!("generate_cover_letter", %request_id))
    .await
}

/// POST /api/v1/cover-letters/analyze
///
/// Runs extraction, assessment and prompt composition without generating.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let form = GenerationForm::from_multipart(multipart).await?.validate()?;

    let prepared = prepare(&state, form)
        .instrument(info_span!("analyze_cover_letter", %request_id))
        .await;

    Ok(Json(AnalyzeResponse {
        request_id,
        notice: prepared.assessment.notice(),
        language: prepared.language,
        job_source: prepared.job.origin,
        cv_source: prepared.cv_source,
        assessment: prepared.assessment,
        prompts: prepared.prompts,
    }))
}

/// POST /api/v1/cover-letters/filename
pub async fn handle_suggest_filename(
    Json(request): Json<FilenameRequest>,
) -> Json<FilenameResponse> {
    Json(FilenameResponse {
        filename: suggest_filename(&request.content),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Extracts both inputs concurrently, assesses the raw text, then annotates
/// the CV and composes the prompt pair. Never fails: extraction problems
/// arrive here as placeholder text.
async fn prepare(state: &AppState, form: ValidatedForm) -> PreparedLetter {
    let ValidatedForm {
        language,
        job,
        cv,
        cv_format,
    } = form;

    let job_text = async {
        match job {
            JobSource::Poster(poster) => {
                extract_job_poster(
                    state.provider.as_ref(),
                    poster.bytes,
                    poster.content_type.as_deref(),
                )
                .await
            }
            JobSource::Link(url) => state.fetcher.fetch(&url).await,
        }
    };
    let (job, cv) = tokio::join!(job_text, extract_cv(cv_format, cv.bytes));

    let policy = &state.config.policy;
    let assessment = InputAssessment::evaluate(Some(&job.text), Some(&cv.text), policy);
    let cv_source = cv.origin;
    let cv_text = annotate_cv(cv.text, &assessment.cv_quality, policy);
    let prompts = compose_prompts(assessment.mode, &job.text, &cv_text, &language);

    PreparedLetter {
        language,
        job,
        cv_source,
        assessment,
        prompts,
    }
}

fn generation_headers(
    assessment: &InputAssessment,
    request_id: Uuid,
) -> Result<HeaderMap, AppError> {
    let flag = |b: bool| HeaderValue::from_static(if b { "true" } else { "false" });

    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(
        HeaderName::from_static("x-job-info-limited"),
        flag(assessment.job_limited),
    );
    headers.insert(
        HeaderName::from_static("x-cv-info-limited"),
        flag(assessment.cv_limited),
    );
    headers.insert(
        HeaderName::from_static("x-job-info-relevant"),
        flag(assessment.job_relevant),
    );
    headers.insert(
        HeaderName::from_static("x-generation-mode"),
        HeaderValue::from_static(assessment.mode.as_str()),
    );
    headers.insert(
        HeaderName::from_static("x-job-text-length"),
        HeaderValue::from(assessment.job_text_length),
    );
    headers.insert(
        HeaderName::from_static("x-cv-text-length"),
        HeaderValue::from(assessment.cv_text_length),
    );
    headers.insert(
        HeaderName::from_static("x-request-id"),
        HeaderValue::try_from(request_id.to_string())
            .context("request id is not a valid header value")?,
    );
    Ok(headers)
}
