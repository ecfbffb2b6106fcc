//! Probe demo server library entry.
//!
//! Greeting endpoints with simulated latency, a startup-gated readiness probe
//! and an in-process metrics registry scraped at `/metrics`. Consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod handlers;
pub mod obs;
pub mod ops;
pub mod router;
pub mod services;
