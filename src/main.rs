//! One-Shot Cache - an in-memory key/value server with read-once values
//!
//! Values are removed on first read or when their lifetime ends.

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use one_shot_cache::{api::create_router, server, AppState, Config};

/// Main entry point for the One-Shot Cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the entry store
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured address
/// 6. Handle graceful shutdown on SIGINT/SIGTERM, bounded by `SHUTDOWN_TIMEOUT`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "one_shot_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting One-Shot Cache Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: http_addr={}, key_live_time={}s, request_timeout={}s, max_body_bytes={}, shutdown_timeout={}s",
        config.http_addr,
        config.key_live_time,
        config.request_timeout,
        config.max_body_bytes,
        config.shutdown_timeout
    );

    let state = AppState::from_config(&config);
    let app = create_router(state, &config);

    let listener = tokio::net::TcpListener::bind(&config.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.http_addr))?;
    info!("Server listening on http://{}", listener.local_addr()?);

    server::serve(listener, app, shutdown_signal(), config.shutdown_timeout()).await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
