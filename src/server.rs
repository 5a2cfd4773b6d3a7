//! Server Module
//!
//! Runs the router on a listener and bounds how long graceful shutdown may
//! take once the shutdown signal has fired.

use std::future::{Future, IntoFuture};
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// How the server stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// All in-flight requests finished within the shutdown timeout
    Graceful,
    /// The shutdown timeout elapsed with requests still in flight
    TimedOut,
}

/// Serves `app` until `signal` resolves, then waits at most
/// `shutdown_timeout` for in-flight requests before returning.
///
/// Connections still open after a timeout are closed when the runtime shuts
/// down.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    shutdown_timeout: Duration,
) -> anyhow::Result<ShutdownOutcome>
where
    F: Future<Output = ()> + Send + 'static,
{
    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            trigger.cancel();
        })
        .into_future();

    let deadline = async {
        shutdown.cancelled().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        result = server => {
            result.context("server error")?;
            Ok(ShutdownOutcome::Graceful)
        }
        _ = deadline => {
            warn!(
                "Graceful shutdown did not complete in {:?}, closing remaining connections",
                shutdown_timeout
            );
            Ok(ShutdownOutcome::TimedOut)
        }
    }
}
