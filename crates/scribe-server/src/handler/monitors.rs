//! Service information handlers.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use crate::extract::Json;
use crate::handler::response::Welcome;
use crate::service::ServiceState;

/// Returns the API welcome document.
#[tracing::instrument(skip_all)]
async fn welcome() -> (StatusCode, Json<Welcome>) {
    (StatusCode::OK, Json(Welcome::default()))
}

pub fn routes() -> Router<ServiceState> {
    Router::new().route("/", get(welcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test::create_test_server_with_router;

    #[tokio::test]
    async fn root_returns_welcome() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.get("/").await;
        response.assert_status_ok();

        let welcome = response.json::<Welcome>();
        assert_eq!(welcome.version, env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}
