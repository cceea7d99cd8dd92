//! Integration tests for all API endpoints.
//!
//! Each test boots the full Axum router (same assembly as `main.rs`) using
//! `tower::ServiceExt::oneshot`; no live server or live upstream feed needed.
//!
//! `build_test_app()` wires together:
//! - wiremocked Etherscan gas oracle and gas station endpoints, served by
//!   the real HTTP clients
//! - a `GasAnalyticsEngine` generating two weeks of history
//! - Prometheus `AppMetrics`
//! - the complete `Router<()>` returned ready for `oneshot`

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use eth_gas_optimizer::{
    analytics::{AnalyticsConfig, GasAnalyticsEngine, PriceQuote, PriceReconciler, StationQuote},
    api::{self, AppState},
    metrics::AppMetrics,
    scheduler::refresh_once,
    services::{etherscan::EtherscanClient, gas_station::GasStationClient, mock::MockGasSource},
};

// ---- Helpers ----------------------------------------------------------------

const FAKE_GAS_ORACLE: &str = r#"{
    "status": "1",
    "message": "OK",
    "result": {
        "LastBlock": "19876543",
        "SafeGasPrice": "20",
        "ProposeGasPrice": "30",
        "FastGasPrice": "40"
    }
}"#;

const FAKE_GAS_STATION: &str = r#"{
    "fast": 600.0,
    "fastest": 800.0,
    "safeLow": 400.0,
    "average": 500.0
}"#;

fn make_state(engine: GasAnalyticsEngine) -> Arc<AppState> {
    Arc::new(AppState {
        engine: Arc::new(engine),
        snapshot: Arc::new(RwLock::new(None)),
        metrics: Arc::new(AppMetrics::new().unwrap()),
    })
}

/// Build the full router against wiremocked upstream feeds.
///
/// The `MockServer` must stay alive for the duration of the test because
/// the clients hold its URL.
async fn build_test_app() -> (Router, Arc<AppState>, MockServer) {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FAKE_GAS_ORACLE, "application/json"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ethgasAPI.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FAKE_GAS_STATION, "application/json"))
        .mount(&mock_server)
        .await;

    let reconciler = PriceReconciler::new(
        Arc::new(EtherscanClient::new(
            format!("{}/api", mock_server.uri()),
            "test-key".into(),
        )),
        Arc::new(GasStationClient::new(format!("{}/ethgasAPI.json", mock_server.uri()))),
    );
    let state = make_state(GasAnalyticsEngine::new(AnalyticsConfig::default(), reconciler));

    (api::create_router(state.clone()), state, mock_server)
}

/// Router whose upstream feeds both fail.
fn build_outage_app() -> Router {
    let reconciler = PriceReconciler::new(
        Arc::new(MockGasSource::<PriceQuote>::failing("oracle down")),
        Arc::new(MockGasSource::<StationQuote>::failing("station down")),
    );
    api::create_router(make_state(GasAnalyticsEngine::new(
        AnalyticsConfig::default().with_history_days(7),
        reconciler,
    )))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> Value {
    let (status, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK, "GET {} failed", uri);
    serde_json::from_slice(&body).unwrap()
}

// ---- /health ------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok_before_first_refresh() {
    let (app, _state, _server) = build_test_app().await;
    let json = get_json(&app, "/health").await;

    assert_eq!(json["status"], "ok");
    assert!(json["last_refresh"].is_null());
    assert_eq!(json["history_days"], 14);
}

// ---- /gas/current -------------------------------------------------------------

#[tokio::test]
async fn current_gas_blends_both_feeds() {
    let (app, _state, _server) = build_test_app().await;
    let json = get_json(&app, "/gas/current").await;

    // (20 + 40) / 2, (30 + 50) / 2, (40 + 60) / 2
    assert_eq!(json["safe"], 30.0);
    assert_eq!(json["standard"], 40.0);
    assert_eq!(json["fast"], 50.0);
    assert_eq!(json["origin"], "blended");
}

#[tokio::test]
async fn current_gas_falls_back_when_all_feeds_fail() {
    let app = build_outage_app();
    let json = get_json(&app, "/gas/current").await;

    assert_eq!(json["safe"], 30.0);
    assert_eq!(json["standard"], 45.0);
    assert_eq!(json["fast"], 60.0);
    assert_eq!(json["origin"], "fallback");
}

#[tokio::test]
async fn first_request_publishes_snapshot_for_later_requests() {
    let (app, state, server) = build_test_app().await;

    let first = get_json(&app, "/gas/current").await;
    let second = get_json(&app, "/gas/optimal").await;

    assert_eq!(first["updated_at"], second["generated_at"]);
    assert!(state.snapshot.read().await.is_some());
    // one refresh: one request per upstream feed
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

// ---- /gas/history -------------------------------------------------------------

#[tokio::test]
async fn history_defaults_to_smoothed_last_day() {
    let (app, _state, _server) = build_test_app().await;
    let json = get_json(&app, "/gas/history").await;

    assert_eq!(json["timeframe"], "24h");
    assert_eq!(json["smoothed"], true);
    // every hour of today plus yesterday's hours later than now
    let points = json["data_points"].as_u64().unwrap();
    assert!((24..=48).contains(&points), "unexpected 24h point count {}", points);
    assert_eq!(json["series"].as_array().unwrap().len() as u64, points);
}

#[tokio::test]
async fn history_fourteen_days_returns_full_raw_series() {
    let (app, _state, _server) = build_test_app().await;
    let json = get_json(&app, "/gas/history?timeframe=14d&smoothed=false").await;

    assert_eq!(json["timeframe"], "14d");
    assert_eq!(json["smoothed"], false);
    let series = json["series"].as_array().unwrap();
    assert_eq!(series.len(), 14 * 24);

    let mut previous = i64::MIN;
    for obs in series {
        let ts = obs["timestamp"].as_i64().unwrap();
        assert!(ts >= previous);
        previous = ts;
        let low = obs["low_fee"].as_f64().unwrap();
        let avg = obs["avg_fee"].as_f64().unwrap();
        let high = obs["high_fee"].as_f64().unwrap();
        assert!(3.0 <= low && low <= avg && avg <= high);
    }
}

#[tokio::test]
async fn history_unknown_timeframe_uses_last_day() {
    let (app, _state, _server) = build_test_app().await;
    let json = get_json(&app, "/gas/history?timeframe=1y").await;
    assert_eq!(json["timeframe"], "24h");
}

// ---- /gas/optimal -------------------------------------------------------------

#[tokio::test]
async fn optimal_returns_ranked_hours_days_and_next_moment() {
    let (app, _state, _server) = build_test_app().await;
    let json = get_json(&app, "/gas/optimal").await;

    let hours = json["best_hours"].as_array().unwrap();
    let days = json["best_days"].as_array().unwrap();
    assert_eq!(hours.len(), 5);
    assert_eq!(days.len(), 3);

    let fees: Vec<f64> = hours.iter().map(|h| h["avg_fee"].as_f64().unwrap()).collect();
    assert!(fees.windows(2).all(|pair| pair[0] <= pair[1]));
    let label = hours[0]["label"].as_str().unwrap();
    assert!(label.ends_with(":00 AM") || label.ends_with(":00 PM"), "bad label {}", label);
    assert!(days[0]["fee_label"].as_str().unwrap().ends_with(" Gwei"));

    let next = &json["next_optimal"];
    assert!(!next.is_null());
    let days_from_now = next["days_from_now"].as_u64().unwrap();
    assert!(days_from_now <= 7);
    if days_from_now == 0 {
        assert_eq!(next["day_label"], "Today");
        assert!(next["eta"].is_null());
    }
}

#[tokio::test]
async fn optimal_still_answers_during_outage() {
    let app = build_outage_app();
    let json = get_json(&app, "/gas/optimal").await;
    assert_eq!(json["best_hours"].as_array().unwrap().len(), 5);
}

// ---- /metrics -----------------------------------------------------------------

#[tokio::test]
async fn metrics_reflect_scheduler_refresh() {
    let (app, state, _server) = build_test_app().await;
    refresh_once(&state.engine, &state.snapshot, &state.metrics).await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(content_type, "text/plain; version=0.0.4");

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("eth_gas_optimizer_refreshes_total 1"));
    assert!(body.contains("origin=\"blended\""));
    assert!(body.contains("eth_gas_optimizer_series_points 336"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _state, _server) = build_test_app().await;
    let (status, _) = get(&app, "/fees/current").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
