//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Routes live under `/api/v1`. Registration and login are public; every
//! other API route sits behind [`require_authentication`].
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler
//! [`require_authentication`]: crate::middleware::require_authentication

mod accounts;
mod authentication;
mod error;
mod monitors;
mod posts;
pub mod request;
pub mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::ErrorResponse;
use crate::middleware::RouterAuthExt;
use crate::service::ServiceState;

/// Prefix shared by every API route.
pub const API_PREFIX: &str = "/api/v1";

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

fn private_routes() -> Router<ServiceState> {
    Router::new()
        .merge(accounts::routes())
        .merge(posts::routes())
}

fn public_routes() -> Router<ServiceState> {
    Router::new().merge(authentication::routes())
}

/// Returns the complete application router.
///
/// The router still needs its state, see [`Router::with_state`].
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    let private_router = private_routes().with_authentication(state);

    let api_router = Router::new()
        .merge(private_router)
        .merge(public_routes());

    Router::new()
        .nest(API_PREFIX, api_router)
        .merge(monitors::routes())
        .fallback(handler)
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::Arc;

    use axum::Router;
    use axum_test::TestServer;

    use crate::handler::routes;
    use crate::service::{
        Clock, MemoryStore, PasswordHasher, ServiceState, SessionKeys, SessionKeysConfig,
        SystemClock,
    };

    pub const TEST_SECRET: &str = "test-secret";

    /// Session keys sharing the test secret, driven by the given clock.
    pub fn create_test_keys(clock: Arc<dyn Clock>) -> anyhow::Result<SessionKeys> {
        let config = SessionKeysConfig::new(TEST_SECRET);
        Ok(SessionKeys::with_clock(&config, clock)?)
    }

    /// State over an in-memory store with the cheapest hash cost.
    pub fn create_test_state() -> anyhow::Result<ServiceState> {
        let store = Arc::new(MemoryStore::new());
        let password_hasher = PasswordHasher::new(8)?;
        let session_keys = create_test_keys(Arc::new(SystemClock))?;

        Ok(ServiceState::with_stores(
            store.clone(),
            store,
            password_hasher,
            session_keys,
        ))
    }

    pub async fn create_test_server_with_router(
        router: impl Fn(ServiceState) -> Router<ServiceState>,
    ) -> anyhow::Result<TestServer> {
        let state = create_test_state()?;
        let router = router(state.clone());
        create_test_server_with_state(router, state).await
    }

    pub async fn create_test_server_with_state(
        router: Router<ServiceState>,
        state: ServiceState,
    ) -> anyhow::Result<TestServer> {
        let app = router.with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    pub async fn create_test_server() -> anyhow::Result<TestServer> {
        create_test_server_with_router(routes).await
    }

    /// Issues a session token for `username` with the state's keys.
    pub fn issue_token(state: &ServiceState, username: &str) -> anyhow::Result<String> {
        Ok(state.session_keys.issue(username)?)
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/api/v1/nothing-here").await;
        response.assert_status_not_found();

        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "not_found");
        Ok(())
    }
}
