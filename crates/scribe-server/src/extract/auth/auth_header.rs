//! Bearer token extraction.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejectionReason;

use super::authentication_required;
use crate::extract::TRACING_TARGET_AUTHENTICATION;
use crate::handler::Error;

/// Unverified bearer token from the `Authorization` header.
///
/// The scheme must be `Bearer`. The token itself is not inspected here; use
/// [`AuthState`] to verify it.
///
/// [`AuthState`]: super::AuthState
#[must_use]
#[derive(Clone)]
pub struct AuthHeader(String);

impl AuthHeader {
    /// Returns the raw token.
    #[inline]
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AuthHeader").field(&"[REDACTED]").finish()
    }
}

impl<S> FromRequestParts<S> for AuthHeader
where
    S: Sync + Send,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        type BearerHeader = TypedHeader<Authorization<Bearer>>;

        match BearerHeader::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => Ok(Self(bearer.token().to_owned())),
            Err(rejection) => {
                let reason = match rejection.reason() {
                    TypedHeaderRejectionReason::Missing => "missing authorization header",
                    _ => "malformed authorization header",
                };
                tracing::debug!(target: TRACING_TARGET_AUTHENTICATION, reason, "request rejected");
                Err(authentication_required())
            }
        }
    }
}
