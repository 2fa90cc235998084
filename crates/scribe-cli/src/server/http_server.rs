//! HTTP server startup and lifecycle management.

use std::future::{IntoFuture, pending};
use std::time::Instant;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::shutdown::shutdown_signal;
use super::{Result, ServerError};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Binds the listener and serves `app` until a shutdown signal arrives.
///
/// In-flight requests get `shutdown_timeout` to finish once the signal is
/// received; the server stops regardless after that.
pub async fn serve(app: Router, server_config: ServerConfig) -> Result<()> {
    server_config
        .validate()
        .map_err(|err| ServerError::InvalidConfig(err.to_string()))?;

    let server_addr = server_config.server_addr();
    let listener = TcpListener::bind(server_addr).await.map_err(|err| {
        let error = ServerError::BindError {
            address: server_addr.to_string(),
            source: err,
        };
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            error = %error,
            error_code = error.error_code(),
            suggestion = error.suggestion(),
            "failed to bind to address"
        );
        error
    })?;

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "server bound to all interfaces, ensure firewall rules are configured"
        );
    }

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        "server is listening for connections"
    );

    let start_time = Instant::now();
    let (signal_tx, signal_rx) = oneshot::channel::<()>();
    let graceful = async move {
        shutdown_signal().await;
        let _ = signal_tx.send(());
    };

    let shutdown_timeout = server_config.shutdown_timeout();
    let deadline = async move {
        if signal_rx.await.is_err() {
            pending::<()>().await;
        }
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            timeout_secs = shutdown_timeout.as_secs(),
            "graceful shutdown initiated"
        );
        tokio::time::sleep(shutdown_timeout).await;
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(graceful)
        .into_future();

    tokio::select! {
        result = server => result.map_err(ServerError::Runtime)?,
        () = deadline => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                "shutdown timeout elapsed, dropping remaining connections"
            );
        }
    }

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        uptime_secs = start_time.elapsed().as_secs(),
        "server shut down"
    );
    Ok(())
}
