//! Registration and login handlers.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;

use crate::extract::{Json, ValidateJson};
use crate::handler::Result;
use crate::handler::request::{Login, Register};
use crate::handler::response::{Account, AccountCreated, AuthToken};
use crate::service::{AccountService, ServiceState};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "scribe_server::handler::authentication";

/// Creates a new account.
#[tracing::instrument(skip_all)]
async fn register(
    State(account_service): State<AccountService>,
    ValidateJson(request): ValidateJson<Register>,
) -> Result<(StatusCode, Json<AccountCreated>)> {
    tracing::debug!(target: TRACING_TARGET, username = %request.username, "registering account");

    let account = account_service
        .register(&request.username, &request.email, &request.password)
        .await?;

    let response = AccountCreated {
        user: Account::from_model(account),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchanges credentials for a session token.
#[tracing::instrument(skip_all)]
async fn login(
    State(account_service): State<AccountService>,
    ValidateJson(request): ValidateJson<Login>,
) -> Result<(StatusCode, Json<AuthToken>)> {
    let token = account_service
        .login(&request.email, &request.password)
        .await?;

    Ok((StatusCode::OK, Json(AuthToken { token })))
}

pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
