//! Axum router configuration for analysis endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{analyze_bug, generate_tests, health, identify_module, AnalysisAppState};

/// Create the analysis API router.
///
/// # Routes
///
/// - `POST /analyze` - Structured analysis of a bug report
/// - `POST /generate-tests` - Test cases for an analyzed bug
/// - `POST /identify-module` - Most likely affected module
pub fn analysis_routes() -> Router<AnalysisAppState> {
    Router::new()
        .route("/analyze", post(analyze_bug))
        .route("/generate-tests", post(generate_tests))
        .route("/identify-module", post(identify_module))
}

/// Create the complete application router.
///
/// Mounts the analysis routes at `/api/analysis` and the liveness check at `/health`.
pub fn analysis_router(state: AnalysisAppState) -> Router {
    Router::new()
        .nest("/api/analysis", analysis_routes())
        .route("/health", get(health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{FailoverInvoker, MockAIProvider, ProviderRegistry};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router_with(registry: ProviderRegistry) -> Router {
        analysis_router(AnalysisAppState::new(Arc::new(FailoverInvoker::new(registry))))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let registry = ProviderRegistry::new()
            .with_provider("groq", Arc::new(MockAIProvider::named("groq")));

        let response = router_with(registry)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn analyze_without_description_is_bad_request() {
        let response = router_with(ProviderRegistry::new())
            .oneshot(post_json("/api/analysis/analyze", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn analyze_without_providers_is_service_unavailable() {
        let response = router_with(ProviderRegistry::new())
            .oneshot(post_json("/api/analysis/analyze", r#"{"description":"Crash"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn generate_tests_requires_analysis() {
        let response = router_with(ProviderRegistry::new())
            .oneshot(post_json("/api/analysis/generate-tests", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = router_with(ProviderRegistry::new())
            .oneshot(Request::builder().uri("/api/bugs").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
