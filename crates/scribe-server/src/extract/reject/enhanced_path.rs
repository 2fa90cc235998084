//! Path parameter extractor.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// Path parameter extractor whose rejections are [`Error`] values.
///
/// A parameter that fails to parse, such as a post id that is not a UUID,
/// yields `400 Bad Request` instead of axum's plain-text rejection.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    /// Wraps already parsed path parameters.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the parsed path parameters.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let extractor =
            <AxumPath<T> as FromRequestParts<S>>::from_request_parts(parts, state).await;
        extractor.map(|x| Self(x.0)).map_err(Into::into)
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                let error_message = err.body_text();
                ErrorKind::BadRequest
                    .with_message("Invalid path parameter format.")
                    .with_context(format!(
                        "{} ({})",
                        sanitize_error_message(&error_message, 2, 150),
                        deserialization_hint(&error_message)
                    ))
            }
            PathRejection::MissingPathParams(err) => ErrorKind::MissingPathParam
                .with_context(sanitize_error_message(&err.body_text(), 2, 150)),
            other => ErrorKind::InternalServerError
                .with_context(format!("unexpected path rejection: {other:?}")),
        }
    }
}

/// Returns a hint matching the kind of parse failure.
fn deserialization_hint(error_message: &str) -> &'static str {
    let error_lower = error_message.to_lowercase();

    if error_lower.contains("uuid") || error_lower.contains("invalid character") {
        "expected a UUID such as 01890a5d-ac96-774b-bcce-b302099a8057"
    } else if error_lower.contains("invalid digit") || error_lower.contains("cannot parse") {
        "expected a number"
    } else {
        "check the parameter against the route"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_for_uuid_failures() {
        let hint = deserialization_hint("UUID parsing failed: invalid character");
        assert!(hint.contains("UUID"));
        assert_eq!(deserialization_hint("something else"), "check the parameter against the route");
    }
}
