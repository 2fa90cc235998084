//! Verified session extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;

use super::{AuthHeader, authentication_required};
use crate::extract::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, Result};
use crate::service::{SessionClaims, SessionKeys};

/// Claims of a verified session token.
///
/// Extraction validates the bearer token with [`SessionKeys`] and caches the
/// result in the request extensions, so the authentication middleware and
/// the handler share one verification.
#[derive(Debug, Clone, Deref, PartialEq, Eq)]
pub struct AuthState(pub SessionClaims);

impl AuthState {
    /// Username of the authenticated account.
    #[inline]
    pub fn username(&self) -> &str {
        &self.0.subject
    }

    /// Verifies a raw token.
    pub fn from_header(auth_header: &AuthHeader, session_keys: &SessionKeys) -> Result<Self> {
        match session_keys.validate(auth_header.token()) {
            Ok(claims) => {
                tracing::debug!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    subject = %claims.subject,
                    expires_at = %claims.expires_at,
                    "session token accepted"
                );
                Ok(Self(claims))
            }
            Err(error) => {
                tracing::info!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    kind = %error.kind(),
                    error = %error,
                    "session token rejected"
                );
                Err(authentication_required())
            }
        }
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let auth_header = AuthHeader::from_request_parts(parts, state).await?;
        let session_keys = SessionKeys::from_ref(state);
        let auth_state = Self::from_header(&auth_header, &session_keys)?;

        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}

