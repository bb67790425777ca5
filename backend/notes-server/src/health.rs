use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET {base_path}
pub async fn server_up() -> Response {
    Json(json!({ "success": true, "message": "The server is up" })).into_response()
}

/// GET /health - liveness plus a database ping
pub async fn health(State(state): State<AppState>) -> Response {
    let database_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();

    let status = if database_ok {
        StatusCode::OK
    } else {
        log::error!("Health check: database ping failed");
        StatusCode::SERVICE_UNAVAILABLE
    };

    let health = json!({
        "status": if database_ok { "healthy" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "database": if database_ok { "operational" } else { "unavailable" },
            "federated": if state.authenticator.federated().is_some() { "enabled" } else { "disabled" },
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status, Json(health)).into_response()
}
