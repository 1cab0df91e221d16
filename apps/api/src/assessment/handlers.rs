//! Axum route handlers for the standalone assessment endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::assessment::link::{assess_link, LinkAssessment};
use crate::assessment::upload::{upload_tier, QualityTier, UploadKind};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateLinkRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadQualityRequest {
    pub kind: UploadKind,
    pub size_bytes: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct UploadQualityResponse {
    pub kind: UploadKind,
    pub tier: QualityTier,
}

/// POST /api/v1/job-links/validate
///
/// Scores a job link without fetching it.
pub async fn handle_validate_link(
    Json(request): Json<ValidateLinkRequest>,
) -> Result<Json<LinkAssessment>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }
    Ok(Json(assess_link(&request.url)))
}

/// POST /api/v1/uploads/quality
pub async fn handle_upload_quality(
    State(state): State<AppState>,
    Json(request): Json<UploadQualityRequest>,
) -> Json<UploadQualityResponse> {
    let tier = upload_tier(request.kind, request.size_bytes, &state.config.policy);
    Json(UploadQualityResponse {
        kind: request.kind,
        tier,
    })
}
