//! Handlers for the authenticated account area.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;

use crate::extract::{AuthState, Json, Query};
use crate::handler::Result;
use crate::handler::request::Pagination;
use crate::handler::response::{Accounts, Dashboard};
use crate::service::{AccountService, ServiceState};

/// Tracing target for account operations.
const TRACING_TARGET: &str = "scribe_server::handler::accounts";

/// Greets the authenticated account.
#[tracing::instrument(skip_all)]
async fn dashboard(auth_state: AuthState) -> Result<(StatusCode, Json<Dashboard>)> {
    Ok((StatusCode::OK, Json(Dashboard::welcome(auth_state.username()))))
}

/// Lists registered accounts, newest first.
#[tracing::instrument(skip_all)]
async fn list_users(
    State(account_service): State<AccountService>,
    Query(pagination): Query<Pagination>,
) -> Result<(StatusCode, Json<Accounts>)> {
    let accounts = account_service.list_accounts(pagination.into()).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        account_count = accounts.len(),
        "accounts listed"
    );

    Ok((StatusCode::OK, Json(Accounts::from_models(accounts))))
}

pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/users", get(list_users))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{HeaderValue, header};

    use super::*;
    use crate::handler::test::{
        create_test_keys, create_test_server_with_state, create_test_state, issue_token,
    };
    use crate::middleware::RouterAuthExt;
    use crate::service::FixedClock;

    fn gated_routes(state: ServiceState) -> Router<ServiceState> {
        routes().with_authentication(state)
    }

    #[tokio::test]
    async fn dashboard_greets_token_subject() -> anyhow::Result<()> {
        let state = create_test_state()?;
        let token = issue_token(&state, "alice")?;
        let server = create_test_server_with_state(gated_routes(state.clone()), state).await?;

        let response = server.get("/dashboard").authorization_bearer(token).await;
        response.assert_status_ok();

        let dashboard = response.json::<Dashboard>();
        assert_eq!(dashboard.message, "Welcome to your dashboard!");
        assert_eq!(dashboard.username, "alice");
        Ok(())
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() -> anyhow::Result<()> {
        let state = create_test_state()?;
        let server = create_test_server_with_state(gated_routes(state.clone()), state).await?;

        let response = server.get("/dashboard").await;
        response.assert_status_unauthorized();

        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "unauthorized");
        assert_eq!(
            body["message"],
            "Invalid credentials. Authentication required."
        );
        Ok(())
    }

    #[tokio::test]
    async fn malformed_header_is_unauthorized() -> anyhow::Result<()> {
        let state = create_test_state()?;
        let server = create_test_server_with_state(gated_routes(state.clone()), state).await?;

        let response = server
            .get("/dashboard")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Basic YWxpY2U6cHc="))
            .await;
        response.assert_status_unauthorized();

        let response = server.get("/dashboard").authorization_bearer("garbage").await;
        response.assert_status_unauthorized();
        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() -> anyhow::Result<()> {
        let state = create_test_state()?;
        // Issued long ago with the same secret; the server clock is the real one.
        let stale_keys = create_test_keys(Arc::new(FixedClock::at_second(1_000_000)))?;
        let token = stale_keys.issue("alice")?;
        let server = create_test_server_with_state(gated_routes(state.clone()), state).await?;

        let response = server.get("/dashboard").authorization_bearer(token).await;
        response.assert_status_unauthorized();
        Ok(())
    }

    #[tokio::test]
    async fn users_lists_accounts_without_hashes() -> anyhow::Result<()> {
        let state = create_test_state()?;
        state
            .account_service
            .register("alice", "alice@x.com", "pw123")
            .await?;
        state
            .account_service
            .register("bob", "bob@x.com", "pw456")
            .await?;

        let token = issue_token(&state, "alice")?;
        let server = create_test_server_with_state(gated_routes(state.clone()), state).await?;

        let response = server.get("/users").authorization_bearer(token).await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        let users = body["users"].as_array().cloned().unwrap_or_default();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["username"], "bob");
        assert!(users.iter().all(|user| user.get("passwordHash").is_none()));
        Ok(())
    }

    #[tokio::test]
    async fn users_accepts_pagination() -> anyhow::Result<()> {
        let state = create_test_state()?;
        for name in ["a", "b", "c"] {
            state
                .account_service
                .register(name, &format!("{name}@x.com"), "pw")
                .await?;
        }

        let token = issue_token(&state, "a")?;
        let server = create_test_server_with_state(gated_routes(state.clone()), state).await?;

        let response = server
            .get("/users")
            .add_query_param("limit", 1)
            .add_query_param("offset", 1)
            .authorization_bearer(token)
            .await;
        response.assert_status_ok();

        let accounts = response.json::<Accounts>();
        assert_eq!(accounts.users.len(), 1);
        assert_eq!(accounts.users[0].username, "b");
        Ok(())
    }
}
