use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::Method,
    Json,
};
use chrono::Utc;

use super::AppState;
use crate::{
    api::models::{StatusQuery, StatusResponse},
    error::{AppError, Result},
    models::TokenCredential,
};

/// GET /api/status/?token=...
pub async fn status_get(
    State(state): State<AppState>,
    query: std::result::Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<StatusResponse>> {
    // A query string that does not decode (e.g. a repeated `token`) is a
    // malformed credential, not a client syntax error.
    let credential = match query {
        Ok(Query(params)) => TokenCredential::from_query(params.token),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "undecodable status query");
            TokenCredential::Malformed
        }
    };
    check(&state, credential).await
}

/// POST /api/status/ with `{"token": "..."}`
pub async fn status_post(State(state): State<AppState>, body: Bytes) -> Result<Json<StatusResponse>> {
    let credential = TokenCredential::from_json_body(&body)?;
    check(&state, credential).await
}

/// Every other verb on the status route.
pub async fn method_not_supported(method: Method) -> AppError {
    tracing::debug!(%method, "rejected status request method");
    AppError::MethodNotAllowed
}

async fn check(state: &AppState, credential: TokenCredential) -> Result<Json<StatusResponse>> {
    let report = state.status_service.check(&credential, Utc::now()).await?;
    Ok(Json(report.into()))
}
