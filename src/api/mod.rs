use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::{any, get};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::analysis::Analyzer;

pub(crate) mod handlers;

/// Path used when running as a standalone server
pub const ANALYZE_PATH: &str = "/ai-analyze";
/// Path the serverless deployment exposed, kept so clients work against either
pub const SERVERLESS_ANALYZE_PATH: &str = "/api/ai_analyze";

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route(ANALYZE_PATH, any(handlers::handle_analyze_request))
        .route(SERVERLESS_ANALYZE_PATH, any(handlers::handle_analyze_request))
        .route("/health", get(handlers::handle_health_request))
        // 1 MB limit
        .layer(DefaultBodyLimit::max(1_000_000))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
