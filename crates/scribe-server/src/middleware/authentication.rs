//! Authentication gate for protected routes.

use axum::Router;
use axum::extract::Request;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;

use crate::extract::AuthState;
use crate::service::ServiceState;

/// Tracing target for the authentication gate.
const TRACING_TARGET: &str = "scribe_server::middleware::authentication";

/// Extension trait for `axum::`[`Router`] to put routes behind the gate.
pub trait RouterAuthExt<S> {
    /// Requires a valid session token for every route of this router.
    fn with_authentication(self, state: ServiceState) -> Self;
}

impl<S> RouterAuthExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_authentication(self, state: ServiceState) -> Self {
        self.route_layer(from_fn_with_state(state, require_authentication))
    }
}

/// Rejects requests without a valid bearer token.
///
/// The verified [`AuthState`] stays cached in the request extensions, so
/// handlers extracting it again do not re-validate the token.
pub async fn require_authentication(
    auth_state: AuthState,
    request: Request,
    next: Next,
) -> Response {
    tracing::trace!(
        target: TRACING_TARGET,
        subject = %auth_state.username(),
        path = %request.uri().path(),
        "authenticated request"
    );

    next.run(request).await
}
