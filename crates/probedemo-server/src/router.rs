//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{app_state::AppState, handlers, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .route("/hello/:name", get(handlers::hello_named))
        .route("/health-check", get(handlers::health_check))
        .route("/info", get(handlers::info))
        .route("/simulate-error", get(handlers::simulate_error))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
