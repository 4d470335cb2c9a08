use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

/// Liveness endpoint. Does not touch the text provider.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "Server is running!",
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
        })),
    )
}
