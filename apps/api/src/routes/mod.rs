pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::errors::AppError;
use crate::generation::handlers as generation;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Cover letters
        .route(
            "/api/v1/cover-letters/generate",
            post(generation::handle_generate),
        )
        .route(
            "/api/v1/cover-letters/analyze",
            post(generation::handle_analyze),
        )
        .route(
            "/api/v1/cover-letters/filename",
            post(generation::handle_suggest_filename),
        )
        // Input checks shown before submission
        .route(
            "/api/v1/job-links/validate",
            post(assessment::handle_validate_link),
        )
        .route(
            "/api/v1/uploads/quality",
            post(assessment::handle_upload_quality),
        )
        .fallback(not_found)
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::{ChunkStream, CompletionProvider, CompletionRequest, LlmError};

    struct Unused;

    #[async_trait]
    impl CompletionProvider for Unused {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }

        async fn stream(&self, _request: &CompletionRequest) -> Result<ChunkStream, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn app() -> Router {
        build_router(AppState::for_tests(Arc::new(Unused)))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "coverletter-api");
    }

    #[tokio::test]
    async fn test_validate_job_link() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/job-links/validate",
                r#"{"url":"example.com"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["is_valid"], true);
        assert_eq!(body["normalized_url"], "https://example.com");
        assert_eq!(body["quality_score"], 20);
        assert_eq!(body["quality_tier"], "poor");
    }

    #[tokio::test]
    async fn test_validate_empty_link_is_rejected() {
        let response = app()
            .oneshot(post_json("/api/v1/job-links/validate", r#"{"url":"  "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_quality() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/uploads/quality",
                r#"{"kind":"cv","size_bytes":20480}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["kind"], "cv");
        assert_eq!(body["tier"], "limited");

        let response = app()
            .oneshot(post_json("/api/v1/uploads/quality", r#"{"kind":"image"}"#))
            .await
            .unwrap();
        assert_eq!(json(response).await["tier"], "unknown");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = app()
            .oneshot(Request::get("/api/v1/resumes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let boundary = "limit-boundary";
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"jobPoster\"; \
             filename=\"poster.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .into_bytes();
        body.extend(std::iter::repeat(b'x').take(2 * 1024 * 1024));
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/cover-letters/generate")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
