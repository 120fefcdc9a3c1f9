// GET handlers: stats, version

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppState;

/// GET /api/stats — builds a fresh snapshot; fatal collection errors become 500 with the message.
pub(super) async fn stats_handler(State(state): State<AppState>) -> Response {
    match state.builder.clone().collect().await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Snapshot failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// GET /version — package name and version baked in at build time.
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
