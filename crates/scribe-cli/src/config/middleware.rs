//! Middleware configuration for the HTTP server.

use clap::Args;
use scribe_server::middleware::RecoveryConfig;
use serde::{Deserialize, Serialize};

use super::TRACING_TARGET_CONFIG;

/// HTTP middleware configuration.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Request timeout and panic recovery.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout,
            "recovery configuration"
        );
    }
}
