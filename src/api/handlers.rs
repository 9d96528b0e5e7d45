use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::error::AnalyzerResult;

#[derive(Serialize, Debug)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

#[axum_macros::debug_handler]
pub(crate) async fn handle_analyze_request(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> AnalyzerResult<Response> {
    state.analyzer.respond(&method, &body).await
}

#[axum_macros::debug_handler]
pub(crate) async fn handle_health_request() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}
