//! Route-level tests against the axum router (no socket).

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use probedemo_core::clock::ManualClock;
use probedemo_server::app_state::AppState;
use probedemo_server::config::{self, ServiceConfig};
use probedemo_server::router::build_router;

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn app_with(cfg: ServiceConfig) -> (Arc<ManualClock>, AppState, Router) {
    let clock = Arc::new(ManualClock::new());
    let state = AppState::with_clock(cfg, clock.clone()).unwrap();
    let app = build_router(state.clone());
    (clock, state, app)
}

fn app() -> (Arc<ManualClock>, AppState, Router) {
    app_with(ServiceConfig::default())
}

#[tokio::test(start_paused = true)]
async fn greeting_scenario_counts_requests() {
    let (_clock, state, app) = app();

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Hello World! Request #1 at "), "{body}");

    let t0 = tokio::time::Instant::now();
    let (status, body) = get(&app, "/hello/Alice").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Hello Alice! Request #2 at "), "{body}");
    assert!(t0.elapsed() >= Duration::from_millis(50));

    assert_eq!(state.metrics().request_count(), 2);
    assert_eq!(state.metrics().active_connections(), 0);
}

#[tokio::test(start_paused = true)]
async fn named_greeting_echoes_unicode_names() {
    let (_clock, _state, app) = app();
    let (status, body) = get(&app, "/hello/%C5%BC%C3%B3%C5%82w").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Hello żółw! Request #1"), "{body}");
}

#[tokio::test]
async fn health_check_and_info_never_fail() {
    let (clock, _state, app) = app();

    for _ in 0..3 {
        let (status, body) = get(&app, "/health-check").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Service is healthy!");
    }

    clock.advance(Duration::from_secs(90));
    let (status, body) = get(&app, "/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "Probe Demo Service - Uptime: PT1M30S, Total Requests: 0, Active: 0"
    );
}

#[tokio::test]
async fn simulate_error_failure_is_500_json() {
    let cfg = config::load_from_str("version: 1\nchaos:\n  failure_probability: 1.0\n").unwrap();
    let (_clock, state, app) = app_with(cfg);

    let (status, body) = get(&app, "/simulate-error").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "SIMULATED_FAILURE");
    assert_eq!(json["message"], "Simulated error for testing!");
    assert_eq!(state.metrics().errors.get(), 1);
}

#[tokio::test]
async fn simulate_error_success_still_counts_error() {
    let cfg = config::load_from_str("version: 1\nchaos:\n  failure_probability: 0.0\n").unwrap();
    let (_clock, state, app) = app_with(cfg);

    let (status, body) = get(&app, "/simulate-error").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Error simulation - this time it worked!");
    assert_eq!(state.metrics().errors.get(), 1);
}

#[tokio::test]
async fn readiness_flips_after_grace_period() {
    let (clock, _state, app) = app();

    let (status, body) = get(&app, "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "DOWN");
    assert_eq!(json["details"]["message"], "Service is still starting up");

    clock.advance(Duration::from_millis(30_000));
    let (status, body) = get(&app, "/readyz").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "UP");
    assert_eq!(json["details"]["startup"], "ready");
    assert_eq!(json["details"]["uptime"], "30000ms");

    let (status, _) = get(&app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test(start_paused = true)]
async fn metrics_exposes_every_instrument() {
    let (_clock, _state, app) = app();
    get(&app, "/").await;
    get(&app, "/hello/averyverylongname").await;
    get(&app, "/health-check").await;
    get(&app, "/info").await;

    let (status, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    for line in [
        "hello_requests_total{endpoint=\"root\"} 1",
        "hello_errors_total{endpoint=\"root\"} 0",
        "hello_request_duration_seconds_count{endpoint=\"root\"} 2",
        "hello_active_connections 0",
        "hello_named_requests_total{endpoint=\"named\",name_length=\"long\"} 1",
        "hello_named_requests_total{endpoint=\"named\",name_length=\"short\"} 0",
        "health_check_requests_total{endpoint=\"health\"} 1",
        "info_requests_total{endpoint=\"info\"} 1",
        "# TYPE hello_service_uptime_seconds gauge",
    ] {
        assert!(body.contains(line), "missing {line:?} in\n{body}");
    }
}

#[tokio::test(start_paused = true)]
async fn shutdown_interrupts_pending_greeting_with_500() {
    let (_clock, state, app) = app();

    let pending = tokio::spawn({
        let app = app.clone();
        async move { get(&app, "/hello/somebody-with-a-long-name").await }
    });
    tokio::time::advance(Duration::from_millis(10)).await;
    state.shutdown_token().cancel();

    let (status, body) = pending.await.unwrap();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("INTERRUPTED"), "{body}");
    assert_eq!(state.metrics().errors.get(), 1);
    assert_eq!(state.metrics().active_connections(), 0);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (_clock, _state, app) = app();
    let (status, _) = get(&app, "/v1/nonexistent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
