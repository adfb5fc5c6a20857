use axum::{
    extract::Request,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::Level;

use super::handlers::{health, status, AppState};
use crate::error::AppError;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no auth)
        .route("/health", get(health::health_check))
        // Token-authenticated status, with and without the trailing slash
        .route("/api/status/", status_routes())
        .route("/api/status", status_routes())
        .fallback(not_found)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    // Query strings carry tokens, so only the path is recorded.
                    tracing::span!(
                        Level::INFO,
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                })
                .on_request(|_request: &Request, _span: &tracing::Span| {
                    tracing::event!(Level::DEBUG, "received request");
                })
                .on_response(
                    |response: &axum::response::Response,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::event!(
                            Level::INFO,
                            status = response.status().as_u16(),
                            latency = ?latency,
                            "request completed"
                        );
                    },
                ),
        )
}

/// GET and POST only. HEAD is registered explicitly because `get` would
/// otherwise answer it.
fn status_routes() -> MethodRouter<AppState> {
    get(status::status_get)
        .post(status::status_post)
        .head(status::method_not_supported)
        .fallback(status::method_not_supported)
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
