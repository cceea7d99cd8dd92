use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde_json::json;

use super::ApiState;

/// Liveness plus the age of the latest snapshot. Never triggers a refresh.
pub async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let last_refresh = state
        .snapshot
        .read()
        .await
        .as_ref()
        .map(|snapshot| snapshot.generated_at);

    (
        [(header::CACHE_CONTROL, "no-store")],
        Json(json!({
            "status": "ok",
            "last_refresh": last_refresh,
            "history_days": state.engine.config().history_days,
        })),
    )
}
