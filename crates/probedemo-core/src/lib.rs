//! probedemo core: transport-agnostic primitives shared by the server.
//!
//! This crate holds the readiness evaluator, the process clock abstraction and
//! the error surface. It carries no HTTP or runtime dependencies so the
//! probe logic can be tested as plain functions.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `ProbeError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod clock;
pub mod error;
pub mod readiness;
pub mod uptime;

/// Shared result type.
pub use error::{Result, ProbeError};
