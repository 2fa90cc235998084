//! Session token issuing and validation (HS256 JWT).
//!
//! [`SessionKeys`] is built once at startup from [`SessionKeysConfig`] and
//! shared through the application state. It holds the symmetric secret, the
//! token lifetime and the [`Clock`] used for both issuing and expiry checks.

use std::fmt;
use std::sync::Arc;

#[cfg(any(test, feature = "config"))]
use clap::Args;
use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::{Clock, SystemClock};
use crate::{Error, Result};

/// Tracing target for session key operations.
const TRACING_TARGET: &str = "scribe_server::service::session_keys";

/// Session token configuration.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
pub struct SessionKeysConfig {
    /// Symmetric secret used to sign and verify session tokens.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(
            long = "auth-secret",
            env = "AUTH_SECRET",
            default_value = "",
            hide_default_value = true,
            hide_env_values = true
        )
    )]
    #[serde(default)]
    pub auth_secret: String,

    /// Session token lifetime in seconds.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(
            long = "auth-token-lifetime-secs",
            env = "AUTH_TOKEN_LIFETIME_SECS",
            default_value = "86400"
        )
    )]
    #[serde(default = "SessionKeysConfig::default_token_lifetime_secs")]
    pub auth_token_lifetime_secs: u64,
}

impl SessionKeysConfig {
    /// Default token lifetime: 24 hours.
    pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 24 * 60 * 60;

    /// Creates a new configuration with the default token lifetime.
    pub fn new(auth_secret: impl Into<String>) -> Self {
        Self {
            auth_secret: auth_secret.into(),
            auth_token_lifetime_secs: Self::DEFAULT_TOKEN_LIFETIME_SECS,
        }
    }

    /// Sets the token lifetime in seconds.
    pub fn with_token_lifetime_secs(mut self, secs: u64) -> Self {
        self.auth_token_lifetime_secs = secs;
        self
    }

    /// Returns whether a non-empty secret is configured.
    #[inline]
    pub fn has_secret(&self) -> bool {
        !self.auth_secret.is_empty()
    }

    fn default_token_lifetime_secs() -> u64 {
        Self::DEFAULT_TOKEN_LIFETIME_SECS
    }
}

impl fmt::Debug for SessionKeysConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeysConfig")
            .field("auth_secret", &"[REDACTED]")
            .field("auth_token_lifetime_secs", &self.auth_token_lifetime_secs)
            .finish()
    }
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Username of the authenticated account.
    #[serde(rename = "sub")]
    pub subject: String,
    /// Issued at, in whole unix seconds.
    #[serde(rename = "iat", with = "jiff::fmt::serde::timestamp::second::required")]
    pub issued_at: Timestamp,
    /// Expires at, in whole unix seconds.
    #[serde(rename = "exp", with = "jiff::fmt::serde::timestamp::second::required")]
    pub expires_at: Timestamp,
}

/// Signing and verification keys for session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    has_secret: bool,
    token_lifetime: SignedDuration,
    clock: Arc<dyn Clock>,
}

impl SessionKeys {
    /// Creates session keys backed by the system clock.
    ///
    /// An empty secret is accepted here; every issue and validate call then
    /// fails. Startup configuration validation rejects it before serving.
    pub fn from_config(config: &SessionKeysConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates session keys with an explicit time source.
    pub fn with_clock(config: &SessionKeysConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let lifetime_secs = i64::try_from(config.auth_token_lifetime_secs)
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| Error::config("token lifetime must be a positive number of seconds"))?;

        let secret = config.auth_secret.as_bytes();
        if secret.is_empty() {
            tracing::warn!(
                target: TRACING_TARGET,
                "session keys created without a secret, tokens cannot be issued or validated"
            );
        }

        let inner = SessionKeysInner {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            has_secret: !secret.is_empty(),
            token_lifetime: SignedDuration::from_secs(lifetime_secs),
            clock,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns the configured token lifetime.
    #[inline]
    pub fn token_lifetime(&self) -> SignedDuration {
        self.inner.token_lifetime
    }

    /// Issues a signed token for the given subject.
    ///
    /// # Errors
    ///
    /// Returns a signing error if no secret is configured, the subject is
    /// blank, or encoding fails.
    pub fn issue(&self, subject: &str) -> Result<String> {
        if !self.inner.has_secret {
            return Err(Error::signing("no session secret configured"));
        }

        if subject.trim().is_empty() {
            return Err(Error::signing("session subject must not be blank"));
        }

        let now = self.inner.clock.now();
        let issued_at = Timestamp::from_second(now.as_second())
            .map_err(|e| Error::signing("current time is out of range").with_source(e))?;
        let expires_at = issued_at
            .checked_add(self.inner.token_lifetime)
            .map_err(|e| Error::signing("token expiry is out of range").with_source(e))?;

        let claims = SessionClaims {
            subject: subject.to_owned(),
            issued_at,
            expires_at,
        };

        let header = Header::new(Algorithm::HS256);
        let token = encode(&header, &claims, &self.inner.encoding_key).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "failed to encode session token"
            );
            Error::signing("failed to encode session token").with_source(e)
        })?;

        tracing::debug!(
            target: TRACING_TARGET,
            subject = %claims.subject,
            expires_at = %claims.expires_at,
            "session token issued"
        );

        Ok(token)
    }

    /// Validates a token and returns its claims.
    ///
    /// A token is valid while `now < exp`.
    ///
    /// # Errors
    ///
    /// - `InvalidToken`: signature mismatch, unexpected algorithm, or no secret configured.
    /// - `ExpiredToken`: the clock has reached `exp`.
    /// - `MalformedToken`: the token is not a structurally sound JWT with `sub` and `exp`.
    pub fn validate(&self, token: &str) -> Result<SessionClaims> {
        if !self.inner.has_secret {
            return Err(Error::invalid_token("no session secret configured"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the injected clock.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        let claims = decode::<SessionClaims>(token, &self.inner.decoding_key, &validation)
            .map_err(map_jwt_error)?
            .claims;

        let now = self.inner.clock.now();
        if now >= claims.expires_at {
            tracing::debug!(
                target: TRACING_TARGET,
                subject = %claims.subject,
                expires_at = %claims.expires_at,
                "session token expired"
            );
            return Err(Error::expired_token("session token has expired"));
        }

        Ok(claims)
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("algorithm", &Algorithm::HS256)
            .field("has_secret", &self.inner.has_secret)
            .field("token_lifetime", &self.inner.token_lifetime)
            .field("clock", &self.inner.clock)
            .finish_non_exhaustive()
    }
}

fn map_jwt_error(error: JwtError) -> Error {
    let mapped = match error.kind() {
        JwtErrorKind::InvalidSignature => Error::invalid_token("signature verification failed"),
        JwtErrorKind::InvalidAlgorithm => Error::invalid_token("unexpected signing algorithm"),
        JwtErrorKind::ExpiredSignature => Error::expired_token("session token has expired"),
        JwtErrorKind::InvalidToken => Error::malformed_token("token is not a three-part JWT"),
        JwtErrorKind::Base64(_) => Error::malformed_token("token contains invalid base64"),
        JwtErrorKind::Json(_) => Error::malformed_token("token contains invalid JSON"),
        JwtErrorKind::MissingRequiredClaim(claim) => {
            Error::malformed_token(format!("token is missing required claim: {claim}"))
        }
        _ => Error::invalid_token("token validation failed"),
    };

    tracing::debug!(
        target: TRACING_TARGET,
        error = %error,
        kind = %mapped.kind(),
        "session token rejected"
    );

    mapped.with_source(error)
}
