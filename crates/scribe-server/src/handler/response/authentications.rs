//! Authentication response types.

use serde::{Deserialize, Serialize};

/// Response returned after a successful login.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthToken {
    /// Signed session token for the `Authorization: Bearer` header.
    pub token: String,
}

/// Greeting returned by the dashboard.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct Dashboard {
    pub message: String,
    /// Username carried by the session token.
    pub username: String,
}

impl Dashboard {
    pub fn welcome(username: impl Into<String>) -> Self {
        Self {
            message: "Welcome to your dashboard!".to_owned(),
            username: username.into(),
        }
    }
}
