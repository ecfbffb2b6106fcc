//! Probe demo service.
//!
//! - Greeting endpoints with simulated work
//! - `/readyz` DOWN for the startup grace period, UP afterwards
//! - Prometheus metrics at `/metrics`
//! - Graceful shutdown interrupts in-flight simulated work

use std::net::SocketAddr;
use std::process::ExitCode;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use probedemo_core::error::{ProbeError, Result};
use probedemo_server::{app_state, config, obs::RegistryInspector, router};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.client_code().as_str(), "probedemo-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_from_env()?;
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .map_err(|e| ProbeError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}")))?;

    let state = app_state::AppState::new(cfg)?;
    let _inspector = RegistryInspector::new(state.registry());
    let shutdown = state.shutdown_token();
    let state_cfg = state.cfg().clone();
    let app = router::build_router(state);

    tracing::info!(
        %listen,
        startup_grace_ms = state_cfg.readiness.startup_grace_ms,
        failure_probability = state_cfg.chaos.failure_probability,
        "probedemo-server starting"
    );
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ProbeError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .map_err(|e| ProbeError::Internal(format!("server failed: {e}")))?;

    tracing::info!("probedemo-server stopped");
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
    shutdown.cancel();
}
