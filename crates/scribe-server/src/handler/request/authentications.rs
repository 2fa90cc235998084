//! Authentication request types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validations::not_blank;

/// Request payload for registration.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    /// Unique username, stored trimmed.
    #[validate(length(min = 1, max = 64), custom(function = "not_blank"))]
    pub username: String,

    /// Unique email address.
    #[validate(email)]
    #[validate(length(max = 254))]
    pub email: String,

    /// Plaintext password, hashed before it is stored.
    #[validate(length(min = 1, max = 1000))]
    pub password: String,
}

/// Request payload for login.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    /// Email address of the account.
    #[validate(length(min = 1, max = 254))]
    pub email: String,

    /// Password of the account.
    #[validate(length(min = 1, max = 1000))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_invalid_email() {
        let request = Register {
            username: "alice".to_owned(),
            email: "not-an-email".to_owned(),
            password: "pw123".to_owned(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn register_accepts_valid_payload() {
        let request = Register {
            username: "alice".to_owned(),
            email: "alice@x.com".to_owned(),
            password: "pw123".to_owned(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn register_rejects_blank_username() {
        let request = Register {
            username: "   ".to_owned(),
            email: "blank@x.com".to_owned(),
            password: "pw".to_owned(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn login_requires_password() {
        let request = Login {
            email: "alice@x.com".to_owned(),
            password: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
