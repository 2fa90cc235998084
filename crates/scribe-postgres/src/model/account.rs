//! Account model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::accounts;

/// A registered user account.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Unique, human-readable handle; used as the session subject.
    pub username: String,
    /// Unique email address, stored lowercased.
    pub email_address: String,
    /// PHC-formatted password hash. Never the plaintext password.
    pub password_hash: String,
    /// Timestamp when the account was created.
    pub created_at: Timestamp,
    /// Timestamp when the account was last updated.
    pub updated_at: Timestamp,
    /// Timestamp when the account was soft-deleted.
    pub deleted_at: Option<Timestamp>,
}

/// Data for creating a new account.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAccount {
    /// Identifier assigned at creation (UUID v7).
    pub id: Uuid,
    /// Unique, human-readable handle.
    pub username: String,
    /// Unique email address.
    pub email_address: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

impl NewAccount {
    /// Creates a new account record with a fresh time-ordered identifier.
    ///
    /// The username is trimmed and the email address is trimmed and lowercased.
    pub fn new(
        username: impl AsRef<str>,
        email_address: impl AsRef<str>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: username.as_ref().trim().to_owned(),
            email_address: normalize_email(email_address.as_ref()),
            password_hash: password_hash.into(),
        }
    }
}

/// Normalizes an email address for storage and lookup.
#[inline]
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
