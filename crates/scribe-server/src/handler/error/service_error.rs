//! Service error to HTTP error conversion.

use super::http_error::{Error as HttpError, ErrorKind};
use crate::{Error as ServiceError, ErrorKind as ServiceErrorKind};

/// Tracing target for service error conversions.
const TRACING_TARGET: &str = "scribe_server::handler::service";

impl From<ServiceError> for HttpError<'static> {
    fn from(error: ServiceError) -> Self {
        match error.kind() {
            ServiceErrorKind::DuplicateAccount => {
                tracing::debug!(target: TRACING_TARGET, error = %error, "duplicate account");
                ErrorKind::Conflict
                    .with_message("Account already exists.")
                    .with_resource("account")
            }
            ServiceErrorKind::InvalidCredentials => {
                tracing::debug!(target: TRACING_TARGET, "invalid credentials");
                ErrorKind::Unauthorized.into_error()
            }
            ServiceErrorKind::InvalidToken
            | ServiceErrorKind::ExpiredToken
            | ServiceErrorKind::MalformedToken => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    error = %error,
                    kind = %error.kind(),
                    "session token rejected"
                );
                ErrorKind::Unauthorized.with_message("Authentication required.")
            }
            ServiceErrorKind::NotFound => {
                tracing::debug!(target: TRACING_TARGET, error = %error, "resource not found");
                ErrorKind::NotFound.into_error()
            }
            ServiceErrorKind::Config
            | ServiceErrorKind::Hashing
            | ServiceErrorKind::Signing
            | ServiceErrorKind::Persistence
            | ServiceErrorKind::Internal => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    kind = %error.kind(),
                    "service operation failed"
                );
                ErrorKind::InternalServerError.with_context(error.message().to_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_account_is_conflict() {
        let error = HttpError::from(ServiceError::duplicate_account("taken"));
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.resource(), Some("account"));
    }

    #[test]
    fn credential_and_token_failures_are_unauthorized() {
        let credentials = HttpError::from(ServiceError::invalid_credentials());
        assert_eq!(credentials.kind(), ErrorKind::Unauthorized);

        for error in [
            ServiceError::invalid_token("bad signature"),
            ServiceError::expired_token("expired"),
            ServiceError::malformed_token("garbage"),
        ] {
            let error = HttpError::from(error);
            assert_eq!(error.kind(), ErrorKind::Unauthorized);
            assert_eq!(error.message(), Some("Authentication required."));
        }
    }

    #[test]
    fn infrastructure_failures_are_internal() {
        for error in [
            ServiceError::hashing("salt"),
            ServiceError::signing("encode"),
            ServiceError::persistence("connection refused"),
            ServiceError::internal("postgres", "pool closed"),
        ] {
            let error = HttpError::from(error);
            assert_eq!(error.kind(), ErrorKind::InternalServerError);
            assert!(error.message().is_none());
        }
    }

    #[test]
    fn not_found_is_not_found() {
        let error = HttpError::from(ServiceError::not_found("post 1 not found"));
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }
}
