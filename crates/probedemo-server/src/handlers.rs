//! Demo endpoints.
//!
//! - `/`               : root greeting
//! - `/hello/:name`    : named greeting
//! - `/health-check`   : static liveness text
//! - `/info`           : uptime and counters
//! - `/simulate-error` : fails half the time

use axum::extract::{Path, State};

use crate::app_state::AppState;
use crate::error::HttpError;

pub async fn hello(State(state): State<AppState>) -> Result<String, HttpError> {
    Ok(state.greeting().hello().await?)
}

pub async fn hello_named(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<String, HttpError> {
    Ok(state.greeting().hello_named(&name).await?)
}

pub async fn health_check(State(state): State<AppState>) -> &'static str {
    state.status().health_check()
}

pub async fn info(State(state): State<AppState>) -> String {
    state.status().info()
}

pub async fn simulate_error(State(state): State<AppState>) -> Result<&'static str, HttpError> {
    Ok(state.chaos().simulate_error()?)
}
