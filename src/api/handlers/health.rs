use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use super::AppState;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    // Check database connectivity and table existence
    let mut response = json!({
        "success": true,
        "status": "ok",
        "database": {
            "connected": false,
            "tables_exist": false,
        }
    });

    match state.repository.health_check().await {
        Ok((connected, tables_exist)) => {
            response["database"]["connected"] = json!(connected);
            response["database"]["tables_exist"] = json!(tables_exist);

            if !tables_exist {
                response["database"]["error"] =
                    json!("Token tables do not exist. Please run migrations.");
            }
        }
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            response["database"]["error"] = json!(format!("Database error: {}", e));
        }
    }

    let healthy = response["database"]["connected"].as_bool().unwrap_or(false)
        && response["database"]["tables_exist"].as_bool().unwrap_or(false);

    if healthy {
        return (StatusCode::OK, Json(response));
    }

    response["success"] = json!(false);
    response["status"] = json!("unavailable");
    response["message"] = json!("Database unavailable");
    (StatusCode::SERVICE_UNAVAILABLE, Json(response))
}
