//! HTTP adapter for bug analysis endpoints.
//!
//! Exposes the analysis use cases via REST API:
//! - `POST /api/analysis/analyze` - Structured bug analysis
//! - `POST /api/analysis/generate-tests` - Test case drafting
//! - `POST /api/analysis/identify-module` - Affected module lookup
//! - `GET /health` - Liveness and registered providers

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{AnalysisApiError, AnalysisAppState};
pub use routes::{analysis_router, analysis_routes};
