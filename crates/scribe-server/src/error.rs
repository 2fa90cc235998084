//! Service layer error types and utilities.
//!
//! Every fallible operation of the service layer returns [`Error`], a single
//! struct carrying an [`ErrorKind`], a human-readable message and an optional
//! source error. HTTP handlers translate the kind into a status code.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use scribe_postgres::PgError;

/// Type alias for boxed errors that are Send + Sync.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result type alias for service layer operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error kind enumeration for categorizing service layer errors.
///
/// Separated from [`Error`] to allow pattern matching on the category
/// without accessing the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Configuration-related errors.
    Config,
    /// Password hashing failed (salt generation or digest computation).
    Hashing,
    /// Session token signing failed.
    Signing,
    /// Session token signature or algorithm mismatch.
    InvalidToken,
    /// Session token is past its expiry.
    ExpiredToken,
    /// Session token is structurally corrupt.
    MalformedToken,
    /// Username or email address is already taken.
    DuplicateAccount,
    /// Unknown email or wrong password; deliberately indistinguishable.
    InvalidCredentials,
    /// Requested record does not exist.
    NotFound,
    /// Storage layer failure.
    Persistence,
    /// Internal service logic errors.
    Internal,
}

impl ErrorKind {
    /// Returns the error kind as a string for categorization.
    ///
    /// Useful for logging or error categorization.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Hashing => "hashing",
            Self::Signing => "signing",
            Self::InvalidToken => "invalid_token",
            Self::ExpiredToken => "expired_token",
            Self::MalformedToken => "malformed_token",
            Self::DuplicateAccount => "duplicate_account",
            Self::InvalidCredentials => "invalid_credentials",
            Self::NotFound => "not_found",
            Self::Persistence => "persistence",
            Self::Internal => "internal_service",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service layer error with structured information.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    /// The error category/type
    kind: ErrorKind,
    /// Human-readable error message
    message: Cow<'static, str>,
    /// Optional underlying error that caused this error
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    /// Creates a new [`Error`].
    #[inline]
    fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches a source error to this error, enabling error chain tracking.
    #[inline]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Creates a new configuration error.
    #[inline]
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// Creates a new password hashing error.
    #[inline]
    pub fn hashing(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Hashing, message)
    }

    /// Creates a new token signing error.
    #[inline]
    pub fn signing(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Signing, message)
    }

    /// Creates a new invalid token error.
    #[inline]
    pub fn invalid_token(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidToken, message)
    }

    /// Creates a new expired token error.
    #[inline]
    pub fn expired_token(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ExpiredToken, message)
    }

    /// Creates a new malformed token error.
    #[inline]
    pub fn malformed_token(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::MalformedToken, message)
    }

    /// Creates a new duplicate account error.
    #[inline]
    pub fn duplicate_account(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::DuplicateAccount, message)
    }

    /// Creates the uniform invalid credentials error.
    #[inline]
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "invalid email or password")
    }

    /// Creates a new not found error.
    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates a new persistence error.
    #[inline]
    pub fn persistence(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Persistence, message)
    }

    /// Creates a new internal service error.
    #[inline]
    pub fn internal(
        service: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let service_name = service.into();
        let msg = message.into();
        let full_message = format!("{}: {}", service_name, msg);
        Self::new(ErrorKind::Internal, full_message)
    }
}

impl From<PgError> for Error {
    fn from(err: PgError) -> Self {
        if err.is_unique_violation() {
            let message = match err.constraint() {
                Some(constraint) => format!("unique constraint violated: {constraint}"),
                None => "unique constraint violated".to_owned(),
            };
            return Error::duplicate_account(message).with_source(err);
        }

        Error::persistence(err.to_string()).with_source(err)
    }
}
