//! Request extractors with JSON error bodies.
//!
//! Every rejection produced here is a [`handler::Error`], so malformed
//! requests get the same `{"name","message"}` body as handler failures.
//!
//! - [`AuthState`]: verified session claims from a bearer token
//! - [`Json`] and [`ValidateJson`]: request bodies, optionally validated
//! - [`Path`] and [`Query`]: URL parameters
//!
//! [`handler::Error`]: crate::handler::Error

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{AuthHeader, AuthState};
pub use crate::extract::reject::{Json, Path, Query, ValidateJson};

/// Tracing target for authentication.
pub const TRACING_TARGET_AUTHENTICATION: &str = "scribe_server::extract::auth";
