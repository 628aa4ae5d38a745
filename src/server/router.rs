use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::config::defaults::default_cors_origins;
use crate::server::handlers::{ask, health, messages};
use crate::state::AppState;

/// Creates the application router with all routes and middleware.
///
/// - `GET /`, `GET /health`: liveness
/// - `GET /api/status`: snapshot and model info
/// - `GET /ask?question=...`: answer a question from the message corpus
/// - `POST /api/messages/refresh`: rebuild the corpus snapshot
pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = build_cors_layer(&state);
    Router::new()
        .route("/", get(health::health))
        .route("/health", get(health::health))
        .route("/api/status", get(health::get_status))
        .route("/ask", get(ask::ask))
        .route("/api/messages/refresh", post(messages::refresh_messages))
        .with_state(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}

fn build_cors_layer(state: &Arc<AppState>) -> CorsLayer {
    let configured = state
        .config
        .cors_allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();
    let origins = if configured.is_empty() {
        default_cors_origins()
    } else {
        configured
    };

    let allow_origin = AllowOrigin::list(
        origins
            .into_iter()
            .filter_map(|origin| HeaderValue::from_str(&origin).ok())
            .collect::<Vec<_>>(),
    );

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
}
