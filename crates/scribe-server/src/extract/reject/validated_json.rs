//! JSON extractor that runs `validator` rules after deserialization.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// Tracing target for request validation.
const TRACING_TARGET: &str = "scribe_server::extract::validate";

/// Deserializes a JSON body with [`Json`] and validates it.
///
/// Validation failures become `400 Bad Request` with a message listing every
/// offending field.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Returns the validated body.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self(data))
    }
}

type Params = HashMap<Cow<'static, str>, serde_json::Value>;

fn param_as_u64(params: &Params, key: &str) -> Option<u64> {
    params.get(key).and_then(serde_json::Value::as_u64)
}

fn format_length_error(field: &str, params: &Params) -> String {
    match (param_as_u64(params, "min"), param_as_u64(params, "max")) {
        (Some(min), Some(max)) => {
            format!("Field '{field}' must be between {min} and {max} characters long")
        }
        (Some(min), None) => format!("Field '{field}' must be at least {min} characters long"),
        (None, Some(max)) => format!("Field '{field}' must be at most {max} characters long"),
        (None, None) => format!("Field '{field}' has invalid length"),
    }
}

fn format_validation_error(field: &str, error: &ValidationError) -> String {
    if let Some(custom_message) = &error.message {
        return format!("Field '{field}': {custom_message}");
    }

    match error.code.as_ref() {
        "length" => format_length_error(field, &error.params),
        "required" => format!("Field '{field}' is required"),
        "email" => format!("Field '{field}' must be a valid email address"),
        "range" => format!("Field '{field}' is out of range"),
        code => format!("Field '{field}' failed validation: {code}"),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();
        // Field order from the error map is unspecified.
        messages.sort();

        tracing::warn!(
            target: TRACING_TARGET,
            errors = ?errors.field_errors(),
            "request validation failed"
        );

        let message = if messages.is_empty() {
            "Validation failed.".to_owned()
        } else {
            format!("{}.", messages.join(". "))
        };

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("request")
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 3, max = 8))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn validation_errors_list_every_field() {
        let sample = Sample {
            name: "x".to_owned(),
            email: "nope".to_owned(),
        };

        let errors = sample.validate().expect_err("both fields are invalid");
        let error = Error::from(errors);

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.resource(), Some("request"));
        let message = error.message().unwrap_or_default();
        assert!(message.contains("Field 'name' must be between 3 and 8 characters long"));
        assert!(message.contains("Field 'email' must be a valid email address"));
    }
}
