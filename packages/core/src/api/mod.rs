//! HTTP API consumed by the display layer.

pub mod gas;
pub mod health;

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Router,
};

use crate::analytics::{AnalyticsSnapshot, GasAnalyticsEngine, SnapshotSlot};
use crate::metrics::AppMetrics;

/// Shared state for every route.
pub type ApiState = Arc<AppState>;

pub struct AppState {
    pub engine: Arc<GasAnalyticsEngine>,
    pub snapshot: SnapshotSlot,
    pub metrics: Arc<AppMetrics>,
}

impl AppState {
    /// Latest published snapshot, refreshing on demand when none exists yet.
    pub async fn latest_snapshot(&self) -> AnalyticsSnapshot {
        if let Some(current) = self.snapshot.read().await.as_ref() {
            return current.clone();
        }

        tracing::info!("No snapshot published yet; refreshing on demand");
        let fresh = self.engine.refresh().await;
        self.metrics.record_snapshot(&fresh);
        *self.snapshot.write().await = Some(fresh.clone());
        fresh
    }
}

/// Assemble the full router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/metrics", get(metrics))
        .route("/gas/current", get(gas::current_gas))
        .route("/gas/history", get(gas::gas_history))
        .route("/gas/optimal", get(gas::optimal_times))
        .with_state(state)
}

async fn metrics(State(state): State<ApiState>) -> Response {
    match state.metrics.render() {
        Ok(body) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/plain; version=0.0.4")
            .body(Body::from(body))
            .expect("metrics response should be valid"),
        Err(err) => {
            tracing::error!("Failed to render metrics: {}", err);
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Body::from("metrics error"))
                .expect("metrics error response should be valid")
        }
    }
}
