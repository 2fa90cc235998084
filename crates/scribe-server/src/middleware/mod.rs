//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - [`RouterAuthExt`]: the bearer token gate in front of protected routes
//! - [`RouterObservabilityExt`]: request ids and request tracing
//! - [`RouterRecoveryExt`]: panic recovery and request timeouts

mod authentication;
mod observability;
mod recovery;

pub use authentication::{RouterAuthExt, require_authentication};
pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
