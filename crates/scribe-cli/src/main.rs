#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod seed;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use scribe_server::handler::routes;
use scribe_server::middleware::{RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt};
use scribe_server::service::ServiceState;

use crate::config::{Cli, Command};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "scribe_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "scribe_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "scribe_cli::config";
pub const TRACING_TARGET_SEED: &str = "scribe_cli::seed";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    Cli::init_tracing();
    cli.log();

    match cli.command {
        Some(Command::Seed(ref args)) => seed::run(&cli.service, args).await,
        Some(Command::Serve) | None => serve(cli).await,
    }
}

/// Validates configuration and serves the API until shutdown.
async fn serve(cli: Cli) -> anyhow::Result<()> {
    cli.validate()?;

    let state = ServiceState::from_config(&cli.service)
        .context("failed to create service state")?;
    let router = create_router(state, &cli.middleware.recovery);

    server::serve(router, cli.server).await?;
    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost): catches panics and enforces timeouts
/// 2. Observability: request ids and tracing spans
/// 3. Routes (innermost)
fn create_router(state: ServiceState, recovery: &RecoveryConfig) -> Router {
    routes(state.clone())
        .with_state(state)
        .with_observability()
        .with_recovery(recovery)
}
