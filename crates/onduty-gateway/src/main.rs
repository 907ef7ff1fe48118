//! onduty gateway
//!
//! - `GET /status` polled by the public counter widget
//! - `POST /reset` guarded by `X-Admin-Token`
//! - `POST /v1/commands` for the chat adapter
//! - background sweep of idle members

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use onduty_core::error::{OndutyError, Result};
use onduty_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    // Loaded before the subscriber so `.env` can set RUST_LOG.
    let dotenv = config::dotenv_error(dotenvy::dotenv());
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    if let Some(e) = dotenv {
        tracing::warn!(error = %e, ".env could not be loaded, continuing without it");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "onduty-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let (path, required) = match std::env::var("ONDUTY_CONFIG") {
        Ok(p) => (PathBuf::from(p), true),
        Err(_) => (PathBuf::from(config::DEFAULT_CONFIG_PATH), false),
    };
    let cfg = config::load(&path, required)?;
    let listen = cfg.gateway.listen_addr()?;

    let state = AppState::new(cfg)?;
    let sweeper = state.spawn_sweeper();
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "onduty-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| OndutyError::Internal(format!("bind {listen} failed: {e}")))?;

    let draining = state.clone();
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            draining.set_draining();
        })
        .await;

    sweeper.shutdown().await;
    served.map_err(|e| OndutyError::Internal(format!("server failed: {e}")))?;
    tracing::info!("onduty-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl+C handler unavailable");
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
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
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
}
